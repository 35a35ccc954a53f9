use super::Source;
use crate::error::Result;
use regex::{Regex, RegexBuilder};

/// Scrapes release archive names (`name-1.2.tar.gz`, `name_1.2.zip`, ...)
/// out of a download listing.
pub struct GenericSource {
    url: String,
    pattern: Regex,
}

impl GenericSource {
    pub fn new(name: &str, url: &str, pattern: Option<&str>) -> Result<Self> {
        let pattern = match pattern {
            Some(p) => p.to_string(),
            None => default_pattern(name),
        };
        let pattern = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(Self { url: url.to_string(), pattern })
    }
}

fn default_pattern(name: &str) -> String {
    format!(r"{}[-_]([\d.]+)\.(?:t(?:ar\.)?(?:[glx]z|bz2?)|zip)", regex::escape(name))
}

impl Source for GenericSource {
    fn name(&self) -> &'static str { "generic" }

    fn url(&self) -> String { self.url.clone() }

    fn parse(&self, body: &str) -> Vec<String> {
        self.pattern
            .captures_iter(body)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
