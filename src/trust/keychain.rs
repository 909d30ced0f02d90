//! Trust store backed by the login keychain and the `security`/`openssl` tools

use super::subject::common_name;
use super::TrustStore;
use crate::command_executor::{run_captured, SecurityTool};
use crate::config::ToolPaths;
use crate::io::login_keychain;
use crate::settings::{AllowedError, Policy, Subcommand};
use crate::{KeytrustError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Marker `security find-certificate` prints when nothing matches.
///
/// Matching on English text is locale and version dependent; the tool offers
/// no structured error for this case.
pub const NOT_FOUND_MESSAGE: &str = "The specified item could not be found in the keychain.";

/// Production [`TrustStore`] that shells out to the macOS tools
#[derive(Debug, Clone)]
pub struct KeychainTrustStore {
    security: SecurityTool,
    openssl: PathBuf,
}

impl KeychainTrustStore {
    pub fn new(paths: &ToolPaths) -> Self {
        Self {
            security: SecurityTool::from_paths(paths),
            openssl: paths.openssl.clone(),
        }
    }

    /// Read the certificate subject with `openssl x509 -noout -subject`
    pub fn subject(&self, cert_path: &Path) -> Result<String> {
        run_captured(
            &self.openssl,
            [
                OsStr::new("x509"),
                OsStr::new("-noout"),
                OsStr::new("-subject"),
                OsStr::new("-in"),
                cert_path.as_os_str(),
            ],
        )
    }

    /// Arguments for the default insertion: SSL trust tolerating a hostname
    /// mismatch, written to the login keychain
    pub fn insertion_args(cert_path: &Path, home_dir: &Path) -> Vec<String> {
        vec![
            "-p".to_string(),
            Policy::Ssl.as_str().to_string(),
            "-e".to_string(),
            AllowedError::HostnameMismatch.as_str().to_string(),
            "-k".to_string(),
            login_keychain(home_dir).to_string_lossy().into_owned(),
            cert_path.to_string_lossy().into_owned(),
        ]
    }
}

impl Default for KeychainTrustStore {
    fn default() -> Self {
        Self::new(&ToolPaths::discover())
    }
}

impl TrustStore for KeychainTrustStore {
    fn find(&self, cert_path: &Path, home_dir: &Path) -> Result<()> {
        let subject = self.subject(cert_path)?;
        let name = common_name(&subject);
        let keychain = login_keychain(home_dir);
        debug!("Looking up '{}' in {}", name, keychain.display());

        match self.security.find_certificate(name, &keychain) {
            Ok(_) => {
                debug!("Certificate '{}' already present", name);
                Ok(())
            }
            Err(KeytrustError::CommandFailed(output)) if output.contains(NOT_FOUND_MESSAGE) => {
                debug!("Certificate '{}' not in keychain", name);
                Err(KeytrustError::NotFoundInKeychain)
            }
            Err(e) => Err(e),
        }
    }

    fn add(&self, cert_path: &Path, home_dir: &Path) -> Result<String> {
        info!(
            "Adding trusted certificate {} to {}",
            cert_path.display(),
            login_keychain(home_dir).display()
        );
        let args = Self::insertion_args(cert_path, home_dir);
        self.security
            .execute(Subcommand::AddTrustedCert.as_str(), &args)
    }
}
