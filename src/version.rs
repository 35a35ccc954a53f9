//! Comparable version values backed by a platform oracle

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::evr::ParsedVersion;
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Which strings are handed to the backend for a pair of versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonPath {
    /// Both sides carry an epoch or release: compare the full labels.
    Labelled,
    /// At least one side is a plain version: compare bare versions only, so
    /// `2.0` scraped upstream matches a packaged `1:2.0-3`.
    Bare,
}

#[must_use]
pub fn comparison_path(a: &ParsedVersion<'_>, b: &ParsedVersion<'_>) -> ComparisonPath {
    if a.has_label() && b.has_label() { ComparisonPath::Labelled } else { ComparisonPath::Bare }
}

/// A raw version string paired with the oracle that orders it.
#[derive(Clone)]
pub struct Version {
    text: String,
    backend: Arc<dyn Backend>,
}

impl Version {
    pub fn new(text: impl Into<String>, backend: Arc<dyn Backend>) -> Self {
        Self { text: text.into(), backend }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn parsed(&self) -> ParsedVersion<'_> {
        ParsedVersion::parse(&self.text)
    }

    /// Order `self` against `other` using `self`'s backend.
    ///
    /// Backend errors (e.g. a string the oracle rejects) are returned as-is.
    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        let (a, b) = (self.parsed(), other.parsed());
        let sign = match comparison_path(&a, &b) {
            ComparisonPath::Labelled => self.backend.vercmp_labelled(&self.text, &other.text)?,
            ComparisonPath::Bare => self.backend.vercmp(a.version, b.version)?,
        };
        Ok(sign.cmp(&0))
    }

    /// Compare against a value of unknown type.
    ///
    /// Anything other than a `Version` fails with [`Error::TypeMismatch`]
    /// before either string is looked at.
    pub fn compare_any(&self, other: &dyn Operand) -> Result<Ordering> {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => self.compare(other),
            None => Err(Error::TypeMismatch { left: std::any::type_name::<Self>(), right: other.type_name() }),
        }
    }

    pub fn eq(&self, other: &Self) -> Result<bool> {
        self.compare(other).map(Ordering::is_eq)
    }

    pub fn ne(&self, other: &Self) -> Result<bool> {
        self.compare(other).map(Ordering::is_ne)
    }

    pub fn lt(&self, other: &Self) -> Result<bool> {
        self.compare(other).map(Ordering::is_lt)
    }

    pub fn gt(&self, other: &Self) -> Result<bool> {
        self.compare(other).map(Ordering::is_gt)
    }

    pub fn le(&self, other: &Self) -> Result<bool> {
        self.compare(other).map(Ordering::is_le)
    }

    pub fn ge(&self, other: &Self) -> Result<bool> {
        self.compare(other).map(Ordering::is_ge)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version('{}')", self.text)
    }
}

/// Any value that can be offered to [`Version::compare_any`].
pub trait Operand: Any {
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> Operand for T {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The greatest version. Among equal versions the last one wins, which is
/// the element a stable ascending sort would put at the end.
pub fn latest(versions: &[Version]) -> Result<&Version> {
    let (first, rest) = versions.split_first().ok_or(Error::NoCandidates)?;
    rest.iter().try_fold(first, |best, v| Ok(if v.ge(best)? { v } else { best }))
}

/// Stable ascending merge sort. Stops at the first backend error.
///
/// Bare and labelled pairs are ordered on different strings, so the
/// comparison need not be a total order; any permutation it settles on is
/// returned rather than rejected.
pub fn sort(mut versions: Vec<Version>) -> Result<Vec<Version>> {
    if versions.len() < 2 {
        return Ok(versions);
    }
    let right = sort(versions.split_off(versions.len() / 2))?;
    let left = sort(versions)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut left, mut right) = (left.into_iter().peekable(), right.into_iter().peekable());
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Ties keep the left element first
        if r.lt(l)? {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}
