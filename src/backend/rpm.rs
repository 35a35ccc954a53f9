use super::{parse_sign, run, Backend, BackendKind};
use crate::error::{Error, Result};
use crate::evr::ParsedVersion;
use std::cmp::Ordering;

/// RPM ordering via the `rpm.vercmp` binding of rpm's embedded Lua.
///
/// Only segment comparison is delegated; epochs and releases are split off
/// here, as `labelCompare` does.
pub struct RpmBackend;

impl Backend for RpmBackend {
    fn kind(&self) -> BackendKind { BackendKind::Rpm }

    fn probe(&self) -> bool {
        self.vercmp("1.10", "1.9").is_ok_and(|s| s > 0)
            && self.vercmp("1.0-2", "1.0-10").is_ok_and(|s| s < 0)
            && self.vercmp_labelled("1:1.0-1", "2.0-1").is_ok_and(|s| s > 0)
    }

    fn vercmp(&self, a: &str, b: &str) -> Result<i32> {
        let output = run("rpm", &["--eval", &vercmp_macro(&segments(a), &segments(b))])?;
        parse_sign(BackendKind::Rpm, &output)
    }

    fn vercmp_labelled(&self, a: &str, b: &str) -> Result<i32> {
        label_compare(&ParsedVersion::parse(a), &ParsedVersion::parse(b), |x, y| self.vercmp(x, y))
    }
}

/// Epoch as an integer, then version, then release when both sides have one.
fn label_compare(
    a: &ParsedVersion<'_>,
    b: &ParsedVersion<'_>,
    vercmp: impl Fn(&str, &str) -> Result<i32>,
) -> Result<i32> {
    match epoch(a.epoch)?.cmp(&epoch(b.epoch)?) {
        Ordering::Equal => {}
        other => return Ok(other as i32),
    }
    let rc = vercmp(a.version, b.version)?;
    if rc != 0 {
        return Ok(rc);
    }
    match (a.release.filter(|r| !r.is_empty()), b.release.filter(|r| !r.is_empty())) {
        (Some(ra), Some(rb)) => vercmp(ra, rb),
        _ => Ok(0),
    }
}

/// Missing and empty epochs count as 0.
fn epoch(field: Option<&str>) -> Result<u64> {
    match field.filter(|e| !e.is_empty()) {
        None => Ok(0),
        Some(e) => e.parse().map_err(|_| Error::Malformed {
            backend: BackendKind::Rpm,
            message: format!("epoch '{e}' is not a number"),
        }),
    }
}

/// Wrap a bare version as `0:VERSION-` so that rpm releases which parse
/// EVR strings in `rpm.vercmp` see it whole as the version, while older
/// ones comparing plain segments ignore the extra separators.
fn segments(version: &str) -> String {
    format!("0:{version}-")
}

fn vercmp_macro(a: &str, b: &str) -> String {
    format!("%{{lua: print(rpm.vercmp({}, {}))}}", lua_string(a), lua_string(b))
}

/// Quote `s` as a single-quoted Lua string literal.
fn lua_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        match c {
            '\\' | '\'' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}
