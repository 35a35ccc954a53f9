use super::{Backend, BackendKind};
use crate::error::Result;
use crate::evr::ParsedVersion;

/// In-process ordering by numeric components only (`1.10` > `1.9`, letters
/// ignored). Never probed by [`super::detect`]; it stands in for a platform
/// oracle in tests and benchmarks and reports itself as rpm.
pub struct NumericBackend;

fn numbers(s: &str) -> Vec<u64> {
    s.split(|c: char| !c.is_ascii_digit()).filter_map(|n| n.parse().ok()).collect()
}

impl Backend for NumericBackend {
    fn kind(&self) -> BackendKind { BackendKind::Rpm }

    fn probe(&self) -> bool { true }

    fn vercmp(&self, a: &str, b: &str) -> Result<i32> {
        Ok(numbers(a).cmp(&numbers(b)) as i32)
    }

    /// Epoch first, then version, then release.
    fn vercmp_labelled(&self, a: &str, b: &str) -> Result<i32> {
        let key = |s: &str| {
            let p = ParsedVersion::parse(s);
            (numbers(p.epoch.unwrap_or("0")), numbers(p.version), numbers(p.release.unwrap_or("")))
        };
        Ok(key(a).cmp(&key(b)) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ordering() {
        assert_eq!(NumericBackend.vercmp("1.10", "1.9").unwrap(), 1);
        assert_eq!(NumericBackend.vercmp("1.0", "1.0rc1").unwrap(), -1);
        assert_eq!(NumericBackend.vercmp("1.02", "1.2").unwrap(), 0);
    }

    #[test]
    fn test_numeric_epoch_first() {
        assert_eq!(NumericBackend.vercmp_labelled("1:1.0-1", "9.0-1").unwrap(), 1);
        assert_eq!(NumericBackend.vercmp_labelled("1.0-2", "1.0-10").unwrap(), -1);
    }
}
