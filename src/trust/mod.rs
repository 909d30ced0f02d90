//! Keychain trust management
//!
//! Looking up and inserting certificates goes through the [`TrustStore`]
//! capability so the ensure-trusted workflow can run against the real
//! keychain tools or a stub.

pub mod keychain;
pub mod subject;
pub mod workflow;

pub use keychain::KeychainTrustStore;
pub use workflow::{EnsureTrusted, TrustOutcome};

use crate::Result;
use std::path::Path;

/// Lookup and insertion against a certificate trust store
pub trait TrustStore {
    /// Check whether the certificate at `cert_path` is present in the store
    /// belonging to `home_dir`.
    ///
    /// Returns `Err(KeytrustError::NotFoundInKeychain)` when it is absent.
    fn find(&self, cert_path: &Path, home_dir: &Path) -> Result<()>;

    /// Insert the certificate at `cert_path` as trusted, returning the tool
    /// output.
    fn add(&self, cert_path: &Path, home_dir: &Path) -> Result<String>;
}

impl<T: TrustStore + ?Sized> TrustStore for &T {
    fn find(&self, cert_path: &Path, home_dir: &Path) -> Result<()> {
        (**self).find(cert_path, home_dir)
    }

    fn add(&self, cert_path: &Path, home_dir: &Path) -> Result<String> {
        (**self).add(cert_path, home_dir)
    }
}
