use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeytrustError {
    /// The option schema holds a value kind the marshaler cannot render.
    #[error("type has not been implemented: field '{field}' of kind {kind}")]
    NotImplemented {
        field: &'static str,
        kind: &'static str,
    },

    /// An external tool exited non-zero; carries its captured output verbatim.
    #[error("{0}")]
    CommandFailed(String),

    /// The trust store has no certificate matching the lookup.
    #[error("item was not found in keychain")]
    NotFoundInKeychain,

    #[error("failed to start {}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path error: {0}")]
    Path(String),
}

impl KeytrustError {
    /// True for the distinguished "not in keychain" lookup result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, KeytrustError::NotFoundInKeychain)
    }
}

pub type Result<T> = std::result::Result<T, KeytrustError>;
