//! Wrapper around `/usr/bin/security`

use super::run_captured;
use crate::config::ToolPaths;
use crate::settings::{Settings, Subcommand};
use crate::Result;
use std::path::{Path, PathBuf};

/// The `security` trust-store tool
#[derive(Debug, Clone)]
pub struct SecurityTool {
    program: PathBuf,
}

impl SecurityTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_paths(paths: &ToolPaths) -> Self {
        Self::new(paths.security.clone())
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run `security <subcommand> <args...>` and return its combined output
    pub fn execute(&self, subcommand: &str, args: &[String]) -> Result<String> {
        let argv = std::iter::once(subcommand).chain(args.iter().map(String::as_str));
        run_captured(&self.program, argv)
    }

    /// Marshal `settings` for `subcommand` and run it
    pub fn run(&self, subcommand: Subcommand, settings: &Settings) -> Result<String> {
        let args = settings.marshal(subcommand)?;
        self.execute(subcommand.as_str(), &args)
    }

    pub fn verify_cert(&self, settings: &Settings) -> Result<String> {
        self.run(Subcommand::VerifyCert, settings)
    }

    pub fn add_trusted_cert(&self, settings: &Settings) -> Result<String> {
        self.run(Subcommand::AddTrustedCert, settings)
    }

    pub fn remove_trusted_cert(&self, settings: &Settings) -> Result<String> {
        self.run(Subcommand::RemoveTrustedCert, settings)
    }

    /// `security find-certificate -c <common_name> -m <keychain>`
    pub fn find_certificate(&self, common_name: &str, keychain: &Path) -> Result<String> {
        let args = [
            "-c".to_string(),
            common_name.to_string(),
            "-m".to_string(),
            keychain.to_string_lossy().into_owned(),
        ];
        self.execute("find-certificate", &args)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::os::unix::fs::PermissionsExt;

    /// A fake `security` that echoes its argv one per line
    fn echo_tool(dir: &Path) -> SecurityTool {
        let path = dir.join("security");
        std::fs::write(&path, "#!/bin/sh\nfor a in \"$@\"; do echo \"$a\"; done\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        SecurityTool::new(path)
    }

    #[test]
    #[serial]
    fn test_subcommand_precedes_marshaled_args() {
        let dir = tempfile::tempdir().unwrap();
        let tool = echo_tool(dir.path());
        let settings = Settings {
            quiet: true,
            ..Settings::for_cert("leaf.pem")
        };

        let out = tool.verify_cert(&settings).unwrap();
        assert_eq!(out, "verify-cert\n-c\nleaf.pem\n-q\n");

        let out = tool.remove_trusted_cert(&settings).unwrap();
        assert_eq!(out, "remove-trusted-cert\nleaf.pem\n");
    }

    #[test]
    #[serial]
    fn test_find_certificate_args() {
        let dir = tempfile::tempdir().unwrap();
        let tool = echo_tool(dir.path());
        let out = tool
            .find_certificate("dev.local", Path::new("/Users/me/Library/Keychains/login.keychain-db"))
            .unwrap();
        assert_eq!(
            out,
            "find-certificate\n-c\ndev.local\n-m\n/Users/me/Library/Keychains/login.keychain-db\n"
        );
    }
}
