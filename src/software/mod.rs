mod bitbucket;
mod generic;
mod github;
mod pecl;
mod pypi;

pub use bitbucket::BitbucketSource;
pub use generic::GenericSource;
pub use github::GitHubSource;
pub use pecl::PeclSource;
pub use pypi::PypiSource;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Generic,
    Pypi,
    Pecl,
    Github,
    Bitbucket,
}

impl SourceType {
    /// Parse a source name string
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "generic" => Some(Self::Generic),
            "pypi" => Some(Self::Pypi),
            "pecl" => Some(Self::Pecl),
            "github" => Some(Self::Github),
            "bitbucket" => Some(Self::Bitbucket),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Pypi => "pypi",
            Self::Pecl => "pecl",
            Self::Github => "github",
            Self::Bitbucket => "bitbucket",
        }
    }
}

/// A piece of software and where to look for its releases.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Software {
    pub name: String,
    pub source: SourceType,
    /// Page to scrape (generic only)
    #[serde(default)]
    pub url: Option<String>,
    /// Regex overriding the default file-name pattern (generic only)
    #[serde(default)]
    pub pattern: Option<String>,
    /// Text removed from tag names, e.g. `v` (github and bitbucket)
    #[serde(default)]
    pub trim: Option<String>,
}

impl Software {
    #[must_use]
    pub fn new(name: impl Into<String>, source: SourceType) -> Self {
        Self { name: name.into(), source, url: None, pattern: None, trim: None }
    }

    /// Create the Source that collects this software's versions
    pub fn create(&self) -> Result<Box<dyn Source>> {
        let trim = self.trim.clone().unwrap_or_default();
        Ok(match self.source {
            SourceType::Generic => {
                let url = self.url.as_deref().ok_or_else(|| {
                    Error::Definition(format!("{}: generic software requires a url", self.name))
                })?;
                Box::new(GenericSource::new(&self.name, url, self.pattern.as_deref())?)
            }
            SourceType::Pypi => Box::new(PypiSource::new(&self.name)),
            SourceType::Pecl => Box::new(PeclSource::new(&self.name)),
            SourceType::Github => Box::new(GitHubSource::new(&self.name, trim)?),
            SourceType::Bitbucket => Box::new(BitbucketSource::new(&self.name, trim)?),
        })
    }
}

pub trait Source: Send + Sync {
    fn name(&self) -> &'static str;

    /// The page or API endpoint holding the release list
    fn url(&self) -> String;

    /// Pull raw version strings out of a fetched body
    fn parse(&self, body: &str) -> Vec<String>;

    /// Fetch and parse, dropping duplicates
    fn versions(&self) -> Result<Vec<String>> {
        let body = fetch(&self.url())?;
        Ok(dedup(self.parse(&body)))
    }
}

/// Download `url` with curl.
pub fn fetch(url: &str) -> Result<String> {
    debug!(url, "fetching");
    let output = Command::new("curl")
        .args(["-sfL", "-m", "10", url])
        .output()
        .map_err(|source| Error::Spawn { program: "curl", source })?;

    if !output.status.success() {
        return Err(Error::Fetch { url: url.to_string(), reason: format!("curl {}", output.status) });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Drop repeated strings, keeping first occurrences in order.
#[must_use]
pub fn dedup(versions: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    versions.into_iter().filter(|v| seen.insert(v.clone())).collect()
}

/// Split `owner/repo`.
fn owner_repo(name: &str) -> Result<(String, String)> {
    match name.split('/').collect::<Vec<_>>()[..] {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok((owner.to_string(), repo.to_string())),
        _ => Err(Error::Definition(format!("{name}: name must be in \"owner/repo\" format"))),
    }
}

/// Strip every occurrence of `trim` from a tag name.
fn trim_tag(tag: &str, trim: &str) -> String {
    if trim.is_empty() { tag.to_string() } else { tag.replace(trim, "") }
}
