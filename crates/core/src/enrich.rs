//! Signal enrichment: how a block's new fields combine with the incoming signal.

use serde::{Deserialize, Serialize};

use crate::signal::Signal;
use crate::value::Value;

/// Enrichment options shared by every block that emits derived signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichOptions {
    /// Emit only the new fields, dropping everything from the incoming signal.
    pub exclude_existing: bool,
    /// When non-empty, nest the new fields under this attribute instead of
    /// merging them at the top level.
    pub enrich_field: String,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            exclude_existing: true,
            enrich_field: String::new(),
        }
    }
}

impl EnrichOptions {
    /// Options that merge new fields into a copy of the incoming signal.
    pub const fn merge() -> Self {
        Self {
            exclude_existing: false,
            enrich_field: String::new(),
        }
    }

    /// Options that nest new fields under `field` in a copy of the incoming signal.
    pub fn nested(field: impl Into<String>) -> Self {
        Self {
            exclude_existing: false,
            enrich_field: field.into(),
        }
    }
}

/// Combine `new_fields` with `original` according to `options`.
pub fn merge(original: &Signal, new_fields: Signal, options: &EnrichOptions) -> Signal {
    if options.exclude_existing {
        return new_fields;
    }
    if options.enrich_field.is_empty() {
        original.merged_with(&new_fields)
    } else {
        original.with(options.enrich_field.clone(), Value::from(new_fields))
    }
}
