use super::Source;
use regex::Regex;
use std::sync::LazyLock;

static RELEASE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<v>\s*([^<]*?)\s*</v>").ok());

pub struct PeclSource {
    name: String,
}

impl PeclSource {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Source for PeclSource {
    fn name(&self) -> &'static str { "pecl" }

    fn url(&self) -> String {
        format!("https://pecl.php.net/rest/r/{}/allreleases.xml", urlencoding::encode(&self.name.to_lowercase()))
    }

    fn parse(&self, body: &str) -> Vec<String> {
        parse_pecl_releases(body)
    }
}

/// Text of every `<v>` element in an allreleases.xml document
fn parse_pecl_releases(xml: &str) -> Vec<String> {
    let Some(re) = RELEASE.as_ref() else { return Vec::new() };
    re.captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
