//! Simple file-based cache for fetched version lists

use serde::{Deserialize, Serialize};
use std::fs;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

const DEFAULT_TTL_SECS: u64 = 3600; // 1 hour

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    versions: Vec<String>,
    timestamp: u64,
}

/// Get the cache directory (~/.cache/toleo/)
fn cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("toleo"))
}

/// Cache key for one lookup: a readable prefix plus a digest of everything
/// that shapes the result (source, name, url, pattern, trim).
#[must_use]
pub fn key(source: &str, software: &str, inputs: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in [source, software].iter().chain(inputs) {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    let digest = format!("{:x}", hasher.finalize());
    format!("{source}-{}-{}", sanitize(software), &digest[..16])
}

fn now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

/// Get cached versions if valid (not expired)
#[must_use]
pub fn get(key: &str) -> Option<Vec<String>> {
    get_in(&cache_dir()?, key)
}

fn get_in(dir: &Path, key: &str) -> Option<Vec<String>> {
    let path = dir.join(format!("{key}.json"));
    let content = fs::read_to_string(&path).ok()?;
    let entry: CacheEntry = serde_json::from_str(&content).ok()?;

    if now().saturating_sub(entry.timestamp) < DEFAULT_TTL_SECS {
        debug!(key, "cache hit");
        Some(entry.versions)
    } else {
        // Expired - remove stale cache file
        let _ = fs::remove_file(&path);
        None
    }
}

/// Store versions in cache
pub fn set(key: &str, versions: &[String]) {
    if let Some(dir) = cache_dir() {
        set_in(&dir, key, versions);
    }
}

fn set_in(dir: &Path, key: &str, versions: &[String]) {
    let _ = fs::create_dir_all(dir);
    let path = dir.join(format!("{key}.json"));

    let entry = CacheEntry { versions: versions.to_vec(), timestamp: now() };
    if let Ok(content) = serde_json::to_string(&entry) {
        if let Err(e) = fs::write(&path, content) {
            warn!(path = %path.display(), "could not write cache: {e}");
        }
    }
}

/// Sanitize software name for use in filename
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("nginx"), "nginx");
        assert_eq!(sanitize("python/cpython"), "python_cpython");
        assert_eq!(sanitize("zope.interface"), "zope_interface");
    }

    #[test]
    fn test_key_separates_sanitized_collisions() {
        assert_eq!(sanitize("a/b_c"), sanitize("a_b/c"));
        assert_ne!(key("github", "a/b_c", &[]), key("github", "a_b/c", &[]));
        assert!(key("github", "a/b_c", &[]).starts_with("github-a_b_c-"));
    }

    #[test]
    fn test_key_covers_inputs() {
        let base = key("generic", "nginx", &["https://nginx.org/download/", "", ""]);
        assert_eq!(base, key("generic", "nginx", &["https://nginx.org/download/", "", ""]));
        assert_ne!(base, key("generic", "nginx", &["https://mirror.example/nginx/", "", ""]));
        assert_ne!(base, key("generic", "nginx", &["https://nginx.org/download/", "nginx-(.*).tar.gz", ""]));
        // Boundaries between inputs are part of the key
        assert_ne!(key("github", "x", &["ab", "c"]), key("github", "x", &["a", "bc"]));
    }

    #[test]
    fn test_changed_trim_misses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://api.github.com/repos/nginx/nginx/tags";
        let with_v = key("github", "nginx/nginx", &[url, "", "v"]);
        set_in(dir.path(), &with_v, &["1.27.0".to_string()]);

        assert_eq!(get_in(dir.path(), &with_v), Some(vec!["1.27.0".to_string()]));
        assert_eq!(get_in(dir.path(), &key("github", "nginx/nginx", &[url, "", "release-"])), None);
    }

    #[test]
    fn test_expired_entry_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pypi-toleo-0.json");
        fs::write(&path, r#"{"versions":["1.0"],"timestamp":0}"#).unwrap();
        assert_eq!(get_in(dir.path(), "pypi-toleo-0"), None);
        assert!(!path.exists());
    }
}
