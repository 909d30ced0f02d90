use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::settings::{AllowedError, Policy, ResultType, Settings};

/// keytrust: manage certificate trust in the macOS keychain
#[derive(Parser, Debug)]
#[command(name = "keytrust")]
#[command(version)]
#[command(about = "Manage certificate trust in the macOS keychain")]
#[command(
    long_about = "keytrust drives /usr/bin/security to verify, add and remove trusted certificates, and can idempotently ensure a certificate is trusted in the login keychain."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Override the security binary path
    #[arg(long, global = true)]
    pub security_path: Option<PathBuf>,

    /// Override the openssl binary path
    #[arg(long, global = true)]
    pub openssl_path: Option<PathBuf>,
}

/// Log levels
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify one or more certificates (security verify-cert)
    Verify(VerifyArgs),

    /// Add a trusted certificate (security add-trusted-cert)
    Add(AddArgs),

    /// Remove trust settings for a certificate (security remove-trusted-cert)
    Remove(RemoveArgs),

    /// Add a PEM certificate to the login keychain unless it is already present
    Ensure {
        /// PEM-encoded certificate file
        cert_file: PathBuf,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Verify(_) => "verify",
            Commands::Add(_) => "add",
            Commands::Remove(_) => "remove",
            Commands::Ensure { .. } => "ensure",
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// Certificate to verify
    #[arg(long)]
    pub cert: Option<String>,

    /// Root certificate to verify against
    #[arg(long)]
    pub root_cert: Option<String>,

    /// Verification policy
    #[arg(long, value_enum)]
    pub policy: Option<Policy>,

    /// Keychain to search for intermediate certificates
    #[arg(long)]
    pub keychain: Option<String>,

    /// Do not search any keychains
    #[arg(long)]
    pub no_keychains: bool,

    /// Use local certificates only
    #[arg(long)]
    pub local_only: bool,

    /// Only verify the leaf certificate
    #[arg(long)]
    pub leaf: bool,

    /// Email address for the S/MIME policy
    #[arg(long)]
    pub email: Option<String>,

    /// SSL host name for the SSL policy
    #[arg(long)]
    pub ssl_host: Option<String>,

    /// Quiet, no stdout or stderr
    #[arg(long)]
    pub quiet: bool,
}

impl VerifyArgs {
    pub fn to_settings(&self) -> Settings {
        Settings {
            cert_file: self.cert.clone().unwrap_or_default(),
            root_cert_file: self.root_cert.clone().unwrap_or_default(),
            policy: self.policy,
            keychain: self.keychain.clone().unwrap_or_default(),
            no_keychains: self.no_keychains,
            local_only: self.local_only,
            is_leaf: self.leaf,
            email_address: self.email.clone().unwrap_or_default(),
            ssl_host: self.ssl_host.clone().unwrap_or_default(),
            quiet: self.quiet,
            ..Settings::new()
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Certificate file to trust
    pub cert: Option<String>,

    /// Add to the admin cert store instead of the user store
    #[arg(long)]
    pub admin: bool,

    /// Trust result for this setting
    #[arg(long, value_enum)]
    pub result_type: Option<ResultType>,

    /// Policy constraint
    #[arg(long, value_enum)]
    pub policy: Option<Policy>,

    /// Application constraint
    #[arg(long)]
    pub app_path: Option<String>,

    /// Policy-specific string
    #[arg(long)]
    pub policy_string: Option<String>,

    /// Allowed verification error
    #[arg(long, value_enum)]
    pub allowed_error: Option<AllowedError>,

    /// Key usage
    #[arg(long)]
    pub key_usage: Option<String>,

    /// Keychain to add the certificate to
    #[arg(long)]
    pub keychain: Option<String>,

    /// Read trust settings from this file
    #[arg(long)]
    pub settings_in: Option<PathBuf>,

    /// Write trust settings to this file
    #[arg(long)]
    pub settings_out: Option<PathBuf>,
}

impl AddArgs {
    pub fn to_settings(&self) -> Settings {
        Settings {
            cert_file: self.cert.clone().unwrap_or_default(),
            policy: self.policy,
            keychain: self.keychain.clone().unwrap_or_default(),
            add_to_admin: self.admin,
            result_type: self.result_type,
            app_path: self.app_path.clone().unwrap_or_default(),
            policy_string: self.policy_string.clone().unwrap_or_default(),
            allowed_error: self.allowed_error,
            key_usage: self.key_usage.clone().unwrap_or_default(),
            settings_file_in: path_text(&self.settings_in),
            settings_file_out: path_text(&self.settings_out),
            ..Settings::new()
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct RemoveArgs {
    /// Certificate file whose trust settings are removed
    pub cert: Option<String>,

    /// Remove from the admin cert store instead of the user store
    #[arg(long)]
    pub admin: bool,

    /// Remove the default trust setting
    #[arg(long)]
    pub default_setting: bool,
}

impl RemoveArgs {
    pub fn to_settings(&self) -> Settings {
        Settings {
            cert_file: self.cert.clone().unwrap_or_default(),
            add_to_admin: self.admin,
            default_setting: self.default_setting,
            ..Settings::new()
        }
    }
}

fn path_text(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Subcommand as TrustSubcommand;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("keytrust").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_add_args_marshal() {
        let cli = parse(&[
            "add",
            "--policy",
            "ssl",
            "--result-type",
            "trustAsRoot",
            "--allowed-error",
            "hostnameMismatch",
            "test.pem",
        ]);
        let Commands::Add(args) = cli.command else {
            panic!("Expected add command");
        };
        assert_eq!(
            args.to_settings()
                .marshal(TrustSubcommand::AddTrustedCert)
                .unwrap(),
            vec!["-p", "ssl", "-r", "trustAsRoot", "-e", "hostnameMismatch", "test.pem"]
        );
    }

    #[test]
    fn test_verify_args_marshal() {
        let cli = parse(&["verify", "--cert", "test.pem", "--no-keychains"]);
        let Commands::Verify(args) = cli.command else {
            panic!("Expected verify command");
        };
        assert_eq!(
            args.to_settings()
                .marshal(TrustSubcommand::VerifyCert)
                .unwrap(),
            vec!["-c", "test.pem", "-n"]
        );
    }

    #[test]
    fn test_remove_args() {
        let cli = parse(&["remove", "--admin", "old.pem"]);
        assert_eq!(cli.command.name(), "remove");
        let Commands::Remove(args) = cli.command else {
            panic!("Expected remove command");
        };
        assert_eq!(
            args.to_settings()
                .marshal(TrustSubcommand::RemoveTrustedCert)
                .unwrap(),
            vec!["-d", "old.pem"]
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&[
            "ensure",
            "dev.pem",
            "--json",
            "--log-level",
            "debug",
            "--security-path",
            "/opt/bin/security",
        ]);
        assert!(matches!(cli.log_level, LogLevel::Debug));
        assert_eq!(cli.security_path, Some(PathBuf::from("/opt/bin/security")));
        assert!(matches!(cli.command, Commands::Ensure { json: true, .. }));
    }

    #[test]
    fn test_policy_names_match_tool() {
        let cli = parse(&["verify", "--policy", "codeSign"]);
        let Commands::Verify(args) = cli.command else {
            panic!("Expected verify command");
        };
        assert_eq!(args.policy, Some(Policy::CodeSign));
        assert!(Cli::try_parse_from(["keytrust", "verify", "--policy", "code-sign"]).is_err());
    }
}
