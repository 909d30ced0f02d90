//! Idempotent "ensure this certificate is trusted" workflow
//!
//! Check-then-act: the store is queried first and only mutated when the
//! certificate is absent. Nothing guards against another process changing the
//! keychain between the two steps.

use super::TrustStore;
use crate::io::{CurrentUser, ProfileResolver};
use crate::{KeytrustError, Result};
use serde::Serialize;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Which branch the workflow took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustOutcome {
    AlreadyTrusted,
    Added,
}

/// Adds a certificate to the login keychain unless it is already there
pub struct EnsureTrusted<S, P = CurrentUser> {
    store: S,
    profile: P,
}

impl<S: TrustStore> EnsureTrusted<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            profile: CurrentUser,
        }
    }
}

impl<S: TrustStore, P: ProfileResolver> EnsureTrusted<S, P> {
    /// Use `profile` to locate the home directory instead of the current user
    pub fn with_profile<Q: ProfileResolver>(self, profile: Q) -> EnsureTrusted<S, Q> {
        EnsureTrusted {
            store: self.store,
            profile,
        }
    }

    /// Make sure `certificate` is trusted.
    ///
    /// The bytes are written to a temporary file that is removed on every
    /// exit path. A lookup reporting [`KeytrustError::NotFoundInKeychain`]
    /// leads to insertion; any other failure is returned unchanged.
    #[tracing::instrument(skip_all, fields(bytes = certificate.len()))]
    pub fn ensure_trusted(&self, certificate: &[u8]) -> Result<TrustOutcome> {
        let mut temp = NamedTempFile::new()?;
        temp.write_all(certificate)?;
        temp.flush()?;
        let cert_path = temp.path();
        debug!("Wrote certificate to {}", cert_path.display());

        let home_dir = self.profile.home_dir()?;

        match self.store.find(cert_path, &home_dir) {
            Ok(()) => {
                info!("Certificate already trusted");
                return Ok(TrustOutcome::AlreadyTrusted);
            }
            Err(KeytrustError::NotFoundInKeychain) => {
                debug!("Certificate not found, adding");
            }
            Err(e) => return Err(e),
        }

        let output = self.store.add(cert_path, &home_dir)?;
        debug!("add-trusted-cert output: {}", output.trim_end());
        info!("Certificate added to trust store");
        Ok(TrustOutcome::Added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    /// Records every call; `find` answers from `present`.
    struct StubStore {
        present: RefCell<bool>,
        add_result: fn() -> Result<String>,
        finds: RefCell<Vec<(PathBuf, PathBuf)>>,
        adds: RefCell<Vec<(PathBuf, PathBuf)>>,
        seen_contents: RefCell<Vec<Vec<u8>>>,
    }

    impl StubStore {
        fn new(present: bool) -> Self {
            Self {
                present: RefCell::new(present),
                add_result: || Ok(String::new()),
                finds: RefCell::new(Vec::new()),
                adds: RefCell::new(Vec::new()),
                seen_contents: RefCell::new(Vec::new()),
            }
        }
    }

    impl TrustStore for StubStore {
        fn find(&self, cert_path: &Path, home_dir: &Path) -> Result<()> {
            self.finds
                .borrow_mut()
                .push((cert_path.to_path_buf(), home_dir.to_path_buf()));
            self.seen_contents
                .borrow_mut()
                .push(std::fs::read(cert_path)?);
            if *self.present.borrow() {
                Ok(())
            } else {
                Err(KeytrustError::NotFoundInKeychain)
            }
        }

        fn add(&self, cert_path: &Path, home_dir: &Path) -> Result<String> {
            self.adds
                .borrow_mut()
                .push((cert_path.to_path_buf(), home_dir.to_path_buf()));
            let out = (self.add_result)()?;
            *self.present.borrow_mut() = true;
            Ok(out)
        }
    }

    fn workflow(store: &StubStore) -> EnsureTrusted<&StubStore, PathBuf> {
        EnsureTrusted::new(store).with_profile(PathBuf::from("/Users/test"))
    }

    #[test]
    fn test_not_found_adds_once_with_same_paths() {
        let store = StubStore::new(false);
        let outcome = workflow(&store).ensure_trusted(b"testcert").unwrap();

        assert_eq!(outcome, TrustOutcome::Added);
        let finds = store.finds.borrow();
        let adds = store.adds.borrow();
        assert_eq!(adds.len(), 1);
        assert_eq!(adds[0], finds[0]);
        assert_eq!(adds[0].1, PathBuf::from("/Users/test"));
        assert_eq!(store.seen_contents.borrow()[0], b"testcert".to_vec());
    }

    #[test]
    fn test_present_skips_add() {
        let store = StubStore::new(true);
        let outcome = workflow(&store).ensure_trusted(b"testcert").unwrap();

        assert_eq!(outcome, TrustOutcome::AlreadyTrusted);
        assert_eq!(store.finds.borrow().len(), 1);
        assert!(store.adds.borrow().is_empty());
    }

    #[test]
    fn test_second_run_takes_present_branch() {
        let store = StubStore::new(false);
        let flow = workflow(&store);

        assert_eq!(flow.ensure_trusted(b"pem").unwrap(), TrustOutcome::Added);
        assert_eq!(
            flow.ensure_trusted(b"pem").unwrap(),
            TrustOutcome::AlreadyTrusted
        );
        assert_eq!(store.adds.borrow().len(), 1);
    }

    #[test]
    fn test_add_failure_propagates_and_cleans_up() {
        let mut store = StubStore::new(false);
        store.add_result = || {
            Err(KeytrustError::CommandFailed(
                "SecTrustSettingsSetTrustSettings: The authorization was denied.".into(),
            ))
        };
        let err = workflow(&store).ensure_trusted(b"pem").unwrap_err();

        assert_eq!(
            err.to_string(),
            "SecTrustSettingsSetTrustSettings: The authorization was denied."
        );
        let adds = store.adds.borrow();
        assert!(!adds[0].0.exists());
    }

    #[test]
    fn test_temp_file_removed_after_success() {
        let store = StubStore::new(true);
        workflow(&store).ensure_trusted(b"pem").unwrap();
        assert!(!store.finds.borrow()[0].0.exists());
    }

    /// Lookup fails with something other than "not found"
    #[derive(Default)]
    struct FailingStore {
        finds: RefCell<Vec<PathBuf>>,
    }

    impl TrustStore for FailingStore {
        fn find(&self, cert_path: &Path, _: &Path) -> Result<()> {
            self.finds.borrow_mut().push(cert_path.to_path_buf());
            Err(KeytrustError::CommandFailed("unable to load certificate".into()))
        }

        fn add(&self, _: &Path, _: &Path) -> Result<String> {
            panic!("add must not run after a lookup failure");
        }
    }

    #[test]
    fn test_lookup_failure_propagates_and_cleans_up() {
        let store = FailingStore::default();
        let err = EnsureTrusted::new(&store)
            .with_profile(PathBuf::from("/Users/test"))
            .ensure_trusted(b"garbage")
            .unwrap_err();

        assert!(
            matches!(err, KeytrustError::CommandFailed(ref out) if out == "unable to load certificate")
        );
        let finds = store.finds.borrow();
        assert_eq!(finds.len(), 1);
        assert!(!finds[0].exists());
    }

    struct NoHome;

    impl ProfileResolver for NoHome {
        fn home_dir(&self) -> Result<PathBuf> {
            Err(KeytrustError::Path("no home".into()))
        }
    }

    #[test]
    fn test_home_resolution_failure_stops_before_lookup() {
        let store = StubStore::new(false);
        let err = EnsureTrusted::new(&store)
            .with_profile(NoHome)
            .ensure_trusted(b"pem")
            .unwrap_err();
        assert!(matches!(err, KeytrustError::Path(_)));
        assert!(store.finds.borrow().is_empty());
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TrustOutcome::AlreadyTrusted).unwrap(),
            "\"already_trusted\""
        );
    }
}
