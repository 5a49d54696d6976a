//! Calibration table construction and lookup.

use std::collections::HashMap;

use log::error;
use serde::{Deserialize, Serialize};

/// Affine transform applied to an event's normalized position:
/// `sx' = sx * xratio + xoffset`, `sy' = sy * yratio + yoffset`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationEntry {
    /// Scale applied to the horizontal position.
    pub xratio: f64,
    /// Scale applied to the vertical position.
    pub yratio: f64,
    /// Offset added to the horizontal position after scaling.
    pub xoffset: f64,
    /// Offset added to the vertical position after scaling.
    pub yoffset: f64,
}

impl Default for CalibrationEntry {
    fn default() -> Self {
        Self {
            xratio: 1.0,
            yratio: 1.0,
            xoffset: 0.0,
            yoffset: 0.0,
        }
    }
}

impl CalibrationEntry {
    /// Apply the transform to a normalized position.
    #[inline]
    pub fn apply(&self, sx: f64, sy: f64) -> (f64, f64) {
        (
            sx * self.xratio + self.xoffset,
            sy * self.yratio + self.yoffset,
        )
    }
}

/// A malformed field inside one configuration entry.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParamError {
    #[error("unknown calibration field `{0}`")]
    UnknownField(String),
    #[error("invalid value `{value}` for calibration field `{field}`")]
    InvalidValue { field: String, value: String },
}

/// Mapping from calibration key to affine parameters.
///
/// Keys are either literal device ids (`"left"`) or parenthesized
/// provider-type names (`"(mtdev)"`). The table is built once at startup and
/// never mutated afterwards; key resolution fallback lives in the stage, not
/// here.
#[derive(Clone, Debug, Default)]
pub struct CalibrationTable {
    entries: HashMap<String, CalibrationEntry>,
}

impl CalibrationTable {
    /// Build the table from `(key, param_string)` configuration pairs.
    ///
    /// Each `param_string` is a comma-separated list of `name=value` tokens,
    /// e.g. `"xratio=0.3333,xoffset=0.3333"`. Fields left out keep their
    /// defaults (ratio 1.0, offset 0.0). A repeated key overwrites the
    /// earlier entry.
    ///
    /// Malformed input is never fatal: an unknown field name is logged and
    /// skipped, an unparseable numeric value is logged and stops parsing of
    /// that entry's remaining fields. Either way the entry is stored and the
    /// scan moves on to the next pair.
    pub fn from_config<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut entries = HashMap::new();
        for (key, params) in pairs {
            let key = key.into();
            let entry = parse_entry(&key, params.as_ref());
            entries.insert(key, entry);
        }
        Self { entries }
    }

    /// Exact-match lookup; no provider fallback.
    #[inline]
    pub fn lookup(&self, key: &str) -> Option<&CalibrationEntry> {
        self.entries.get(key)
    }

    /// Number of configured calibration entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no entries are configured; the stage treats such a table
    /// as a no-op.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse one entry's parameter string, field by field, left to right.
fn parse_entry(key: &str, params: &str) -> CalibrationEntry {
    let mut entry = CalibrationEntry::default();
    for token in params.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match apply_field(&mut entry, token) {
            Ok(()) => {}
            Err(err @ ParamError::UnknownField(_)) => {
                error!("calibration `{key}`: {err}");
            }
            Err(err) => {
                // A bad numeric value poisons the rest of the entry; fields
                // already parsed keep their values.
                error!("calibration `{key}`: {err}; remaining fields ignored");
                break;
            }
        }
    }
    entry
}

fn apply_field(entry: &mut CalibrationEntry, token: &str) -> Result<(), ParamError> {
    let (name, value) = token.split_once('=').unwrap_or((token, ""));
    let field = match name {
        "xratio" => &mut entry.xratio,
        "yratio" => &mut entry.yratio,
        "xoffset" => &mut entry.xoffset,
        "yoffset" => &mut entry.yoffset,
        _ => return Err(ParamError::UnknownField(name.to_string())),
    };
    *field = value
        .trim()
        .parse()
        .map_err(|_| ParamError::InvalidValue {
            field: name.to_string(),
            value: value.to_string(),
        })?;
    Ok(())
}
