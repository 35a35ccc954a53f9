use super::{owner_repo, trim_tag, Source};
use crate::error::Result;

/// Tags of a Bitbucket repository.
pub struct BitbucketSource {
    owner: String,
    repo: String,
    trim: String,
}

impl BitbucketSource {
    pub fn new(name: &str, trim: String) -> Result<Self> {
        let (owner, repo) = owner_repo(name)?;
        Ok(Self { owner, repo, trim })
    }
}

impl Source for BitbucketSource {
    fn name(&self) -> &'static str { "bitbucket" }

    fn url(&self) -> String {
        format!("https://api.bitbucket.org/2.0/repositories/{}/{}/refs/tags?pagelen=100", self.owner, self.repo)
    }

    fn parse(&self, body: &str) -> Vec<String> {
        parse_bitbucket_tags(body).iter().map(|tag| trim_tag(tag, &self.trim)).collect()
    }
}

fn parse_bitbucket_tags(json: &str) -> Vec<String> {
    let parsed: serde_json::Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };
    parsed
        .get("values")
        .and_then(|v| v.as_array())
        .map(|values| values.iter().filter_map(|t| t.get("name")?.as_str()).map(String::from).collect())
        .unwrap_or_default()
}
