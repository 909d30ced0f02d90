//! Discovery of the external tool binaries
//!
//! Resolution order for each tool:
//! 1. Explicit override (CLI flag)
//! 2. Environment variable, when it names an existing path
//! 3. Platform default under /usr/bin

use std::path::PathBuf;
use tracing::debug;

pub const SECURITY_ENV: &str = "KEYTRUST_SECURITY_PATH";
pub const OPENSSL_ENV: &str = "KEYTRUST_OPENSSL_PATH";

pub const DEFAULT_SECURITY: &str = "/usr/bin/security";
pub const DEFAULT_OPENSSL: &str = "/usr/bin/openssl";

/// Locations of the trust-store and certificate-inspection tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub security: PathBuf,
    pub openssl: PathBuf,
}

impl ToolPaths {
    /// Discover tool paths from the environment, falling back to defaults
    pub fn discover() -> Self {
        Self::discover_with_overrides(None, None)
    }

    /// Discover tool paths, preferring the given overrides
    pub fn discover_with_overrides(
        security: Option<PathBuf>,
        openssl: Option<PathBuf>,
    ) -> Self {
        Self {
            security: resolve("security", security, SECURITY_ENV, DEFAULT_SECURITY),
            openssl: resolve("openssl", openssl, OPENSSL_ENV, DEFAULT_OPENSSL),
        }
    }
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            security: PathBuf::from(DEFAULT_SECURITY),
            openssl: PathBuf::from(DEFAULT_OPENSSL),
        }
    }
}

fn resolve(tool: &str, cli_override: Option<PathBuf>, env_var: &str, default: &str) -> PathBuf {
    if let Some(path) = cli_override {
        debug!("Using {} from command line: {:?}", tool, path);
        return path;
    }

    if let Ok(value) = std::env::var(env_var) {
        let path = PathBuf::from(value);
        if path.exists() {
            debug!("Using {} from {}: {:?}", tool, env_var, path);
            return path;
        }
        debug!("{} points at missing path {:?}, ignoring", env_var, path);
    }

    PathBuf::from(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_without_environment() {
        std::env::remove_var(SECURITY_ENV);
        std::env::remove_var(OPENSSL_ENV);
        assert_eq!(ToolPaths::discover(), ToolPaths::default());
    }

    #[test]
    #[serial]
    fn test_environment_override_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("security");
        std::fs::write(&fake, "").unwrap();

        std::env::set_var(SECURITY_ENV, &fake);
        std::env::set_var(OPENSSL_ENV, dir.path().join("missing-openssl"));
        let paths = ToolPaths::discover();
        std::env::remove_var(SECURITY_ENV);
        std::env::remove_var(OPENSSL_ENV);

        assert_eq!(paths.security, fake);
        assert_eq!(paths.openssl, PathBuf::from(DEFAULT_OPENSSL));
    }

    #[test]
    #[serial]
    fn test_cli_override_wins() {
        std::env::set_var(SECURITY_ENV, "/bin/sh");
        let paths = ToolPaths::discover_with_overrides(Some(PathBuf::from("/opt/security")), None);
        std::env::remove_var(SECURITY_ENV);

        assert_eq!(paths.security, PathBuf::from("/opt/security"));
    }
}
