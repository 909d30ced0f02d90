//! Static field table describing how each option is rendered

use super::{Settings, Subcommand};

use super::Subcommand::{AddTrustedCert, RemoveTrustedCert, VerifyCert};

/// The value of one schema field, typed by how it renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Free text; empty means unset
    Text(&'a str),
    /// Bare switch
    Flag(bool),
    /// Closed enumeration rendered as its text value
    Choice(Option<&'static str>),
    /// Numeric option. No trust subcommand takes one and the marshaler
    /// rejects it.
    Integer(i64),
}

impl FieldValue<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Flag(_) => "bool",
            FieldValue::Choice(_) => "choice",
            FieldValue::Integer(_) => "integer",
        }
    }
}

/// Metadata for a single option
pub struct FieldSpec<S> {
    /// Field name, used in error messages
    pub name: &'static str,
    /// Flag identifier without the leading dash. Fields without one are
    /// never rendered.
    pub flag: Option<&'static str>,
    /// Subcommands for which the option is meaningful
    pub subcommands: &'static [Subcommand],
    /// Rendered as the trailing positional argument on subcommands that take
    /// the certificate positionally
    pub positional: bool,
    pub value: fn(&S) -> FieldValue<'_>,
}

impl<S> FieldSpec<S> {
    pub fn applies_to(&self, subcommand: Subcommand) -> bool {
        self.subcommands.contains(&subcommand)
    }
}

/// A record whose fields can be marshaled into a `security` argument vector.
///
/// `fields` returns the table in declaration order; that order is the order
/// flags appear on the command line.
pub trait OptionSchema: Sized + 'static {
    fn fields() -> &'static [FieldSpec<Self>];
}

impl OptionSchema for Settings {
    fn fields() -> &'static [FieldSpec<Self>] {
        &SETTINGS_FIELDS
    }
}

const fn field(
    name: &'static str,
    flag: &'static str,
    subcommands: &'static [Subcommand],
    value: fn(&Settings) -> FieldValue<'_>,
) -> FieldSpec<Settings> {
    FieldSpec {
        name,
        flag: Some(flag),
        subcommands,
        positional: false,
        value,
    }
}

static SETTINGS_FIELDS: [FieldSpec<Settings>; 19] = [
    FieldSpec {
        name: "cert_file",
        flag: Some("c"),
        subcommands: &[VerifyCert, AddTrustedCert, RemoveTrustedCert],
        positional: true,
        value: |s| FieldValue::Text(&s.cert_file),
    },
    field("root_cert_file", "r", &[VerifyCert], |s| {
        FieldValue::Text(&s.root_cert_file)
    }),
    field("policy", "p", &[VerifyCert, AddTrustedCert], |s| {
        FieldValue::Choice(s.policy.map(|p| p.as_str()))
    }),
    field("keychain", "k", &[VerifyCert, AddTrustedCert], |s| {
        FieldValue::Text(&s.keychain)
    }),
    field("no_keychains", "n", &[VerifyCert], |s| {
        FieldValue::Flag(s.no_keychains)
    }),
    field("local_only", "L", &[VerifyCert], |s| {
        FieldValue::Flag(s.local_only)
    }),
    field("is_leaf", "l", &[VerifyCert], |s| FieldValue::Flag(s.is_leaf)),
    field("email_address", "e", &[VerifyCert], |s| {
        FieldValue::Text(&s.email_address)
    }),
    field("ssl_host", "s", &[VerifyCert], |s| {
        FieldValue::Text(&s.ssl_host)
    }),
    field("quiet", "q", &[VerifyCert], |s| FieldValue::Flag(s.quiet)),
    field("add_to_admin", "d", &[AddTrustedCert, RemoveTrustedCert], |s| {
        FieldValue::Flag(s.add_to_admin)
    }),
    field("result_type", "r", &[AddTrustedCert], |s| {
        FieldValue::Choice(s.result_type.map(|r| r.as_str()))
    }),
    field("app_path", "a", &[AddTrustedCert], |s| {
        FieldValue::Text(&s.app_path)
    }),
    field("policy_string", "s", &[AddTrustedCert], |s| {
        FieldValue::Text(&s.policy_string)
    }),
    field("allowed_error", "e", &[AddTrustedCert], |s| {
        FieldValue::Choice(s.allowed_error.map(|e| e.as_str()))
    }),
    field("key_usage", "u", &[AddTrustedCert], |s| {
        FieldValue::Text(&s.key_usage)
    }),
    field("settings_file_in", "i", &[AddTrustedCert], |s| {
        FieldValue::Text(&s.settings_file_in)
    }),
    field("settings_file_out", "o", &[AddTrustedCert], |s| {
        FieldValue::Text(&s.settings_file_out)
    }),
    field("default_setting", "D", &[RemoveTrustedCert], |s| {
        FieldValue::Flag(s.default_setting)
    }),
];
