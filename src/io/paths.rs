use crate::{KeytrustError, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Path of the user's login keychain below `home_dir`
pub fn login_keychain(home_dir: &Path) -> PathBuf {
    home_dir
        .join("Library")
        .join("Keychains")
        .join("login.keychain-db")
}

/// Resolves the home directory whose login keychain is used
pub trait ProfileResolver {
    fn home_dir(&self) -> Result<PathBuf>;
}

/// The user running this process
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentUser;

impl ProfileResolver for CurrentUser {
    fn home_dir(&self) -> Result<PathBuf> {
        let dirs = BaseDirs::new().ok_or_else(|| {
            KeytrustError::Path("Failed to determine the current user's home directory".to_string())
        })?;
        Ok(dirs.home_dir().to_path_buf())
    }
}

/// A fixed home directory
impl ProfileResolver for PathBuf {
    fn home_dir(&self) -> Result<PathBuf> {
        Ok(self.clone())
    }
}
