use super::{owner_repo, trim_tag, Source};
use crate::error::Result;

/// Tags of a GitHub repository.
pub struct GitHubSource {
    owner: String,
    repo: String,
    trim: String,
}

impl GitHubSource {
    pub fn new(name: &str, trim: String) -> Result<Self> {
        let (owner, repo) = owner_repo(name)?;
        Ok(Self { owner, repo, trim })
    }
}

impl Source for GitHubSource {
    fn name(&self) -> &'static str { "github" }

    fn url(&self) -> String {
        format!("https://api.github.com/repos/{}/{}/tags?per_page=100", self.owner, self.repo)
    }

    fn parse(&self, body: &str) -> Vec<String> {
        parse_github_tags(body).iter().map(|tag| trim_tag(tag, &self.trim)).collect()
    }
}

/// `name` of each entry in a tags API response
fn parse_github_tags(json: &str) -> Vec<String> {
    let Ok(serde_json::Value::Array(tags)) = serde_json::from_str::<serde_json::Value>(json) else { return Vec::new() };
    tags.iter().filter_map(|t| t.get("name")?.as_str()).map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAGS: &str = r#"[
        {"name": "v3.13.0", "commit": {"sha": "abc"}},
        {"name": "v3.12.4", "commit": {"sha": "def"}},
        {"commit": {"sha": "0ff"}}
    ]"#;

    #[test]
    fn test_parse_github_tags() {
        assert_eq!(parse_github_tags(TAGS), vec!["v3.13.0", "v3.12.4"]);
        assert!(parse_github_tags(r#"{"message": "Not Found"}"#).is_empty());
    }

    #[test]
    fn test_trimmed_tags() {
        let source = GitHubSource::new("python/cpython", "v".to_string()).unwrap();
        assert_eq!(source.parse(TAGS), vec!["3.13.0", "3.12.4"]);
    }

    #[test]
    fn test_github_url() {
        let source = GitHubSource::new("python/cpython", String::new()).unwrap();
        assert_eq!(source.url(), "https://api.github.com/repos/python/cpython/tags?per_page=100");
        assert_eq!(source.name(), "github");
    }
}
