//! Argument marshaling: option schema to `security` argv

use super::schema::{FieldValue, OptionSchema};
use super::Subcommand;
use crate::{KeytrustError, Result};

/// Build the argument vector for `subcommand` from `schema`.
///
/// Fields are visited in table order. A field is rendered only when it has a
/// flag identifier and lists `subcommand`. Empty text and unset choices are
/// skipped, `false` switches are skipped, `true` switches render as a bare
/// flag. The certificate path on `add-trusted-cert`/`remove-trusted-cert` is
/// held back and appended last as a positional argument.
pub fn marshal<S: OptionSchema>(schema: &S, subcommand: Subcommand) -> Result<Vec<String>> {
    let mut flags = Vec::new();
    let mut positional: Option<&str> = None;

    for field in S::fields() {
        let Some(flag) = field.flag else {
            continue;
        };
        if !field.applies_to(subcommand) {
            continue;
        }

        let text = match (field.value)(schema) {
            FieldValue::Text(value) => value,
            FieldValue::Choice(value) => value.unwrap_or(""),
            FieldValue::Flag(set) => {
                if set {
                    flags.push(format!("-{flag}"));
                }
                continue;
            }
            other => {
                return Err(KeytrustError::NotImplemented {
                    field: field.name,
                    kind: other.kind(),
                })
            }
        };

        if text.is_empty() {
            continue;
        }

        if field.positional && subcommand.takes_positional_cert() {
            positional = Some(text);
        } else {
            flags.push(format!("-{flag}"));
            flags.push(text.to_string());
        }
    }

    if let Some(arg) = positional {
        flags.push(arg.to_string());
    }

    Ok(flags)
}
