//! Option schema for the `security` trust subcommands
//!
//! `Settings` holds every option the trust subcommands of `/usr/bin/security`
//! understand. Which options apply to which subcommand lives in the static
//! field table in [`schema`]; [`marshal`] walks that table to build argv.

pub mod marshal;
pub mod schema;

use clap::ValueEnum;
use std::fmt;

pub use marshal::marshal;
pub use schema::{FieldSpec, FieldValue, OptionSchema};

use crate::Result;

/// Trust subcommands of the `security` tool driven by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
    VerifyCert,
    AddTrustedCert,
    RemoveTrustedCert,
}

impl Subcommand {
    pub const ALL: [Subcommand; 3] = [
        Subcommand::VerifyCert,
        Subcommand::AddTrustedCert,
        Subcommand::RemoveTrustedCert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subcommand::VerifyCert => "verify-cert",
            Subcommand::AddTrustedCert => "add-trusted-cert",
            Subcommand::RemoveTrustedCert => "remove-trusted-cert",
        }
    }

    /// Whether the certificate path is passed as a trailing positional argument
    /// rather than through `-c`.
    pub fn takes_positional_cert(&self) -> bool {
        matches!(
            self,
            Subcommand::AddTrustedCert | Subcommand::RemoveTrustedCert
        )
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trust policy (`-p`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    #[value(name = "ssl")]
    Ssl,
    #[value(name = "smime")]
    Smime,
    #[value(name = "codeSign")]
    CodeSign,
    #[value(name = "IPSec")]
    IpSec,
    #[value(name = "iChat")]
    IChat,
    #[value(name = "basic")]
    Basic,
    #[value(name = "swUpdate")]
    SwUpdate,
    #[value(name = "pkgSign")]
    PkgSign,
    #[value(name = "pkinitClient")]
    PkinitClient,
    #[value(name = "pkinitServer")]
    PkinitServer,
    #[value(name = "eap")]
    Eap,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Ssl => "ssl",
            Policy::Smime => "smime",
            Policy::CodeSign => "codeSign",
            Policy::IpSec => "IPSec",
            Policy::IChat => "iChat",
            Policy::Basic => "basic",
            Policy::SwUpdate => "swUpdate",
            Policy::PkgSign => "pkgSign",
            Policy::PkinitClient => "pkinitClient",
            Policy::PkinitServer => "pkinitServer",
            Policy::Eap => "eap",
        }
    }
}

/// Trust result recorded by `add-trusted-cert` (`-r`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResultType {
    #[value(name = "trustRoot")]
    TrustRoot,
    #[value(name = "trustAsRoot")]
    TrustAsRoot,
    #[value(name = "deny")]
    Deny,
    #[value(name = "unspecified")]
    Unspecified,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::TrustRoot => "trustRoot",
            ResultType::TrustAsRoot => "trustAsRoot",
            ResultType::Deny => "deny",
            ResultType::Unspecified => "unspecified",
        }
    }
}

/// Verification error tolerated by a trust setting (`-e`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AllowedError {
    #[value(name = "certExpired")]
    CertExpired,
    #[value(name = "hostnameMismatch")]
    HostnameMismatch,
}

impl AllowedError {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllowedError::CertExpired => "certExpired",
            AllowedError::HostnameMismatch => "hostnameMismatch",
        }
    }
}

/// Options for one `security` trust operation.
///
/// Text fields left empty and enumerations left `None` are treated as unset
/// and never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub cert_file: String,
    pub root_cert_file: String,
    pub policy: Option<Policy>,
    pub keychain: String,
    pub no_keychains: bool,
    pub local_only: bool,
    pub is_leaf: bool,
    pub email_address: String,
    pub ssl_host: String,
    pub quiet: bool,
    pub add_to_admin: bool,
    pub result_type: Option<ResultType>,
    pub app_path: String,
    pub policy_string: String,
    pub allowed_error: Option<AllowedError>,
    pub key_usage: String,
    pub settings_file_in: String,
    pub settings_file_out: String,
    pub default_setting: bool,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for a single certificate file
    pub fn for_cert(cert_file: impl Into<String>) -> Self {
        Self {
            cert_file: cert_file.into(),
            ..Self::default()
        }
    }

    /// Render these settings as the argument vector for `subcommand`
    pub fn marshal(&self, subcommand: Subcommand) -> Result<Vec<String>> {
        marshal(self, subcommand)
    }
}
