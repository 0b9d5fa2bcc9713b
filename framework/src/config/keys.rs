//! Well-known configuration keys
//!
//! Settings are addressed by dotted, lower-case keys. Environment overrides
//! use the `PLINTH__` prefix with `__` standing in for the dot, so
//! `PLINTH__GLOBAL__FORCE_HTTPS` maps to `global.force_https`.

/// Public base URL of the site (`scheme://host`).
pub const PUBLIC_BASE_URL: &str = "global.public_base_url";

/// Whether HTTPS is enforced ("true"/"false" as strings).
pub const FORCE_HTTPS: &str = "global.force_https";

/// Template code generation mode, see `CodegenMode`.
pub const TEMPLATE_CODEGEN_MODE: &str = "templates.codegen_mode";

/// Physical root path for uploaded media.
pub const MEDIA_PHYSICAL_ROOT_PATH: &str = "media.physical_root_path";

/// Prefix marking an environment variable as a configuration override.
pub const ENV_PREFIX: &str = "PLINTH__";

/// Environment spelling of [`PUBLIC_BASE_URL`].
pub const ENV_PUBLIC_BASE_URL: &str = "PLINTH__GLOBAL__PUBLIC_BASE_URL";

/// Environment spelling of [`MEDIA_PHYSICAL_ROOT_PATH`].
pub const ENV_MEDIA_PHYSICAL_ROOT_PATH: &str = "PLINTH__MEDIA__PHYSICAL_ROOT_PATH";

/// What [`ENV_MEDIA_PHYSICAL_ROOT_PATH`] looks like after the hosting
/// platform silently clips over-length variable names. Checked as a
/// same-priority fallback for the primary name.
pub const ENV_MEDIA_PHYSICAL_ROOT_PATH_TRUNCATED: &str = "PLINTH__MEDIA__PHYSICAL_ROOT";

/// Hostname the platform assigned to this deployment.
pub const ENV_WEBSITE_HOSTNAME: &str = "WEBSITE_HOSTNAME";

/// Home directory the platform assigned to this deployment.
pub const ENV_HOME: &str = "HOME";
