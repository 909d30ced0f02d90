//! keytrust: certificate trust management over the macOS `security` tool

pub mod cli;
pub mod command_executor;
pub mod config;
pub mod error;
pub mod io;
pub mod settings;
pub mod trust;

pub use command_executor::SecurityTool;
pub use config::ToolPaths;
pub use error::{KeytrustError, Result};
pub use settings::{AllowedError, Policy, ResultType, Settings, Subcommand};
pub use trust::{EnsureTrusted, KeychainTrustStore, TrustOutcome, TrustStore};

/// Ensure `certificate` is trusted in the current user's login keychain,
/// using the tools found by [`ToolPaths::discover`].
pub fn ensure_trusted(certificate: &[u8]) -> Result<TrustOutcome> {
    EnsureTrusted::new(KeychainTrustStore::default()).ensure_trusted(certificate)
}
