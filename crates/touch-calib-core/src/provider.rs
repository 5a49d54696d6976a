//! Snapshot of the input-provider registry.

use crate::EventKind;

/// Ordered mapping from provider-type name to the event kinds it can emit.
///
/// Built once from the host's provider registry and read-only afterwards.
/// Entry order is the registry's own iteration order; stages that fall back
/// to provider-type matching resolve first-match-wins against this order, so
/// it must be deterministic across runs of the same configuration.
#[derive(Clone, Debug, Default)]
pub struct ProviderMap {
    entries: Vec<ProviderEntry>,
}

#[derive(Clone, Debug)]
struct ProviderEntry {
    name: String,
    kinds: Vec<EventKind>,
}

impl ProviderMap {
    /// Build the snapshot from a registry enumeration.
    ///
    /// Providers that emit no event kinds at all are dropped; relative order
    /// of the rest is preserved.
    pub fn from_registry<I>(registry: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<EventKind>)>,
    {
        let entries = registry
            .into_iter()
            .filter(|(_, kinds)| !kinds.is_empty())
            .map(|(name, kinds)| ProviderEntry { name, kinds })
            .collect();
        Self { entries }
    }

    /// Iterate `(provider_name, emitted_kinds)` in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[EventKind])> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.kinds.as_slice()))
    }

    /// Number of retained providers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no provider emits any event kind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_providers_without_kinds() {
        let map = ProviderMap::from_registry([
            ("mtdev".to_string(), vec![EventKind::Touch]),
            ("probesysfs".to_string(), vec![]),
            ("mouse".to_string(), vec![EventKind::Mouse]),
        ]);
        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["mtdev", "mouse"]);
    }

    #[test]
    fn preserves_registry_order() {
        let map = ProviderMap::from_registry([
            ("hidinput".to_string(), vec![EventKind::Touch, EventKind::Stylus]),
            ("mtdev".to_string(), vec![EventKind::Touch]),
        ]);
        let names: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["hidinput", "mtdev"]);
        assert_eq!(map.len(), 2);
        assert!(!map.is_empty());
    }
}
