//! Template code generation configuration

use crate::config::keys;
use crate::config::sources::ConfigStore;

/// How template model code is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodegenMode {
    /// Regenerate in memory whenever templates change.
    #[default]
    Auto,
    /// Generate source files on demand from the back office.
    Manual,
    /// Code generation disabled entirely. This is the only mode allowed in
    /// production deployments.
    Nothing,
}

impl CodegenMode {
    /// Canonical string form, as stored in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Manual => "Manual",
            Self::Nothing => "Nothing",
        }
    }

    /// Parse the configured value; unknown strings yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("Auto") => Some(Self::Auto),
            v if v.eq_ignore_ascii_case("Manual") => Some(Self::Manual),
            v if v.eq_ignore_ascii_case("Nothing") => Some(Self::Nothing),
            _ => None,
        }
    }
}

impl std::fmt::Display for CodegenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Template engine configuration
#[derive(Debug, Clone, Default)]
pub struct TemplatesConfig {
    /// Code generation mode; falls back to [`CodegenMode::Auto`] when the
    /// configured value is missing or unrecognized.
    pub codegen_mode: CodegenMode,
}

impl TemplatesConfig {
    /// Build the config from the frozen store.
    pub fn from_store(store: &ConfigStore) -> Self {
        Self {
            codegen_mode: store
                .get_nonblank(keys::TEMPLATE_CODEGEN_MODE)
                .and_then(CodegenMode::parse)
                .unwrap_or_default(),
        }
    }
}
