// Library crate exposing internals for the binary, benchmarks and fuzzing

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod evr;
pub mod software;
pub mod version;

pub use error::{Error, Result};
pub use evr::ParsedVersion;
pub use version::{latest, Version};

use software::SourceType;

/// Parse a software argument, extracting optional source prefix.
/// e.g., "pypi:requests" -> (Some(Pypi), "requests")
///       "nginx" -> (None, "nginx")
#[must_use]
pub fn parse_software_arg(arg: &str) -> (Option<SourceType>, String) {
    if let Some((prefix, rest)) = arg.split_once(':') {
        // Only treat as source prefix if it's a known source name
        if let Some(source) = SourceType::from_name(prefix) {
            return (Some(source), rest.to_string());
        }
    }
    (None, arg.to_string())
}


#[cfg(test)]
mod proptests {
    use super::{parse_software_arg, ParsedVersion};
    use proptest::prelude::*;

    // Strategy for fields free of the ':' and '-' separators
    fn field() -> impl Strategy<Value = String> {
        "[0-9a-zA-Z.~+_]{1,8}"
    }

    proptest! {
        // Parsing accepts any input
        #[test]
        fn parse_never_panics(s in "\\PC*") {
            let p = ParsedVersion::parse(&s);
            let _ = p.to_string();
        }

        // Without separators the whole string is the version
        #[test]
        fn parse_plain_is_version(s in "[^:-]*") {
            prop_assert_eq!(ParsedVersion::parse(&s), ParsedVersion::new(None, &s, None));
        }

        #[test]
        fn parse_full_label(e in field(), v in field(), r in field()) {
            let raw = format!("{e}:{v}-{r}");
            prop_assert_eq!(ParsedVersion::parse(&raw), ParsedVersion::new(Some(&e), &v, Some(&r)));
        }

        // Only the last '-' separates the release
        #[test]
        fn parse_last_dash(a in field(), b in field(), c in field()) {
            let raw = format!("{a}-{b}-{c}");
            let expected_version = format!("{a}-{b}");
            prop_assert_eq!(ParsedVersion::parse(&raw), ParsedVersion::new(None, &expected_version, Some(&c)));
        }

        // Formatting restores any string whose epoch and release are non-empty
        #[test]
        fn format_restores_labels(e in field(), v in field(), r in field()) {
            for raw in [format!("{e}:{v}-{r}"), format!("{v}-{r}"), format!("{e}:{v}"), v.clone()] {
                prop_assert_eq!(ParsedVersion::parse(&raw).to_string(), raw);
            }
        }

        // parse_software_arg never panics
        #[test]
        fn parse_software_arg_never_panics(s in "\\PC*") {
            let _ = parse_software_arg(&s);
        }

        // parse_software_arg: if no source returned, name equals input
        #[test]
        fn parse_software_arg_no_source_preserves_input(s in "\\PC*") {
            let (source, name) = parse_software_arg(&s);
            if source.is_none() {
                prop_assert_eq!(name, s);
            }
        }

        // parse_software_arg: if source returned, input must have had a colon
        #[test]
        fn parse_software_arg_source_requires_colon(s in "\\PC*") {
            let (source, _) = parse_software_arg(&s);
            if source.is_some() {
                prop_assert!(s.contains(':'));
            }
        }
    }
}
