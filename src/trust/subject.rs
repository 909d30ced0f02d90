//! Common-name extraction from `openssl x509 -noout -subject` output
//!
//! Only the legacy one-line format `subject= /CN=<name>` is understood. The
//! prefix is matched literally; there is no RFC 2253 parsing.

use tracing::warn;

pub const SUBJECT_PREFIX: &str = "subject= /CN=";

/// Extract the common name from inspection tool output.
///
/// When the output does not start with [`SUBJECT_PREFIX`] the text is
/// returned with only surrounding newlines removed.
pub fn common_name(output: &str) -> &str {
    let name = match output.strip_prefix(SUBJECT_PREFIX) {
        Some(rest) => rest,
        None => {
            warn!(
                "Unexpected subject format from certificate inspection: {:?}",
                output
            );
            output
        }
    };
    name.trim_matches('\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_subject_line() {
        assert_eq!(common_name("subject= /CN=localhost\n"), "localhost");
    }

    #[test]
    fn test_name_with_spaces_is_kept() {
        assert_eq!(
            common_name("subject= /CN=Dev Proxy CA\n"),
            "Dev Proxy CA"
        );
    }

    #[test]
    fn test_missing_trailing_newline() {
        assert_eq!(common_name("subject= /CN=api.internal"), "api.internal");
    }

    #[test]
    fn test_other_rdns_are_not_split() {
        // Only a literal prefix is stripped; trailing RDNs stay in the name.
        assert_eq!(
            common_name("subject= /CN=host/O=Acme\n"),
            "host/O=Acme"
        );
    }

    #[test]
    fn test_modern_openssl_format_passes_through() {
        assert_eq!(
            common_name("subject=CN = localhost\n"),
            "subject=CN = localhost"
        );
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(common_name(""), "");
        assert_eq!(common_name("\n"), "");
    }
}
