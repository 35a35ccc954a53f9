use super::Source;

pub struct PypiSource {
    name: String,
}

impl PypiSource {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Source for PypiSource {
    fn name(&self) -> &'static str { "pypi" }

    fn url(&self) -> String {
        format!("https://pypi.org/pypi/{}/json", urlencoding::encode(&self.name))
    }

    fn parse(&self, body: &str) -> Vec<String> {
        parse_pypi_releases(body)
    }
}

/// Release keys of the PyPI JSON API
fn parse_pypi_releases(json: &str) -> Vec<String> {
    serde_json::from_str::<serde_json::Value>(json)
        .ok()
        .and_then(|v| v.get("releases")?.as_object().map(|r| r.keys().cloned().collect()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pypi_releases() {
        let json = r#"{"info":{"name":"requests"},"releases":{"2.31.0":[],"2.32.3":[{}],"2.9.0":[]}}"#;
        let mut releases = parse_pypi_releases(json);
        releases.sort();
        assert_eq!(releases, vec!["2.31.0", "2.32.3", "2.9.0"]);
    }

    #[test]
    fn test_parse_pypi_releases_missing() {
        assert!(parse_pypi_releases(r#"{"info":{}}"#).is_empty());
        assert!(parse_pypi_releases("not json").is_empty());
    }

    #[test]
    fn test_pypi_url() {
        assert_eq!(PypiSource::new("zope.interface").url(), "https://pypi.org/pypi/zope.interface/json");
    }
}
