//! Core configuration for otio-timeline-core.

use serde::{Deserialize, Serialize};

/// Serialization settings. Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spaces per indentation level when writing JSON; `0` writes compact JSON.
    pub json_indent: usize,
    /// Reject documents containing schemas this crate does not know instead of
    /// preserving them as `UnknownSchema`.
    pub strict_schemas: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            json_indent: 4,
            strict_schemas: false,
        }
    }
}
