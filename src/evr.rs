//! Splitting of `[epoch:]version[-release]` strings

use std::fmt;

/// The three logical fields of a raw version string.
///
/// Parsing never fails: every string, including the empty one, maps to a
/// triple. The first `:` ends the epoch and the last `-` after it starts the
/// release, so `1.0-rc1-2` has version `1.0-rc1` and release `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedVersion<'a> {
    pub epoch: Option<&'a str>,
    pub version: &'a str,
    pub release: Option<&'a str>,
}

impl<'a> ParsedVersion<'a> {
    #[must_use]
    pub const fn new(epoch: Option<&'a str>, version: &'a str, release: Option<&'a str>) -> Self {
        Self { epoch, version, release }
    }

    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        let (epoch, rest) = match raw.split_once(':') {
            Some((epoch, rest)) => (Some(epoch), rest),
            None => (None, raw),
        };
        let (version, release) = match rest.rsplit_once('-') {
            Some((version, release)) => (version, Some(release)),
            None => (rest, None),
        };
        Self { epoch, version, release }
    }

    /// True when a non-empty epoch or release is present.
    ///
    /// Empty fields count as absent here, matching how they are dropped when
    /// the triple is formatted back into a string.
    #[must_use]
    pub fn has_label(&self) -> bool {
        is_set(self.epoch) || is_set(self.release)
    }
}

fn is_set(field: Option<&str>) -> bool {
    field.is_some_and(|f| !f.is_empty())
}

/// Formats as `epoch:version-release`, leaving out empty or missing parts.
///
/// `"1.0-"` parses with an empty release and formats back as `"1.0"`; that
/// loss is kept as-is.
impl fmt::Display for ParsedVersion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(epoch) = self.epoch.filter(|e| !e.is_empty()) {
            write!(f, "{epoch}:")?;
        }
        f.write_str(self.version)?;
        if let Some(release) = self.release.filter(|r| !r.is_empty()) {
            write!(f, "-{release}")?;
        }
        Ok(())
    }
}
