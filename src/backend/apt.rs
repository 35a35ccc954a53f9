use super::{malformed, reject_options, run, Backend, BackendKind};
use crate::error::Result;

/// Debian ordering via `dpkg --compare-versions`.
pub struct AptBackend;

impl AptBackend {
    /// Evaluate `a <op> b`. dpkg exits 0 for true and 1 for false; anything
    /// else is a syntax error in one of the versions.
    fn holds(a: &str, op: &str, b: &str) -> Result<bool> {
        let output = run("dpkg", &["--compare-versions", a, op, b])?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(malformed(BackendKind::Apt, &output)),
        }
    }
}

impl Backend for AptBackend {
    fn kind(&self) -> BackendKind { BackendKind::Apt }

    fn probe(&self) -> bool {
        run("dpkg", &["--version"]).is_ok_and(|o| o.status.success())
    }

    fn vercmp(&self, a: &str, b: &str) -> Result<i32> {
        reject_options(BackendKind::Apt, &[a, b])?;
        if Self::holds(a, "lt", b)? {
            Ok(-1)
        } else if Self::holds(a, "gt", b)? {
            Ok(1)
        } else {
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_option_like_versions_rejected() {
        // Checked before dpkg is run, so this holds without dpkg installed
        let err = AptBackend.vercmp("1.0", "--version").unwrap_err();
        assert!(matches!(err, Error::Malformed { backend: BackendKind::Apt, .. }));
        assert!(AptBackend.vercmp("-1", "1.0").is_err());
    }

    #[test]
    fn test_apt_ordering() {
        let apt = AptBackend;
        if !apt.probe() { return; }
        assert_eq!(apt.vercmp("1.0", "1.1").unwrap(), -1);
        assert_eq!(apt.vercmp("1.10", "1.9").unwrap(), 1);
        assert_eq!(apt.vercmp("1.0~rc1", "1.0").unwrap(), -1);
        assert_eq!(apt.vercmp("1.0", "1.0").unwrap(), 0);
        assert_eq!(apt.vercmp_labelled("1:1.0-1", "2.0-1").unwrap(), 1);
        assert_eq!(apt.vercmp_labelled("7.88.1-10+deb12u5", "7.88.1-10+deb12u4").unwrap(), 1);
    }

    #[test]
    fn test_apt_trichotomy() {
        let apt = AptBackend;
        if !apt.probe() { return; }
        let samples = ["1.0", "1.0a", "1.0~b1", "2", "1.0.0", "0:1.0-1"];
        for a in samples {
            for b in samples {
                assert_eq!(apt.vercmp(a, b).unwrap(), -apt.vercmp(b, a).unwrap(), "{a} vs {b}");
            }
        }
    }
}
