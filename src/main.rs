use clap::{ArgAction, Parser};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use toleo::backend::{self, Backend, BackendKind};
use toleo::config::Config;
use toleo::software::Software;
use toleo::{cache, parse_software_arg, version, Version};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "toleo", version)]
#[command(about = "Find the latest upstream version of software using your distribution's version ordering")]
struct Cli {
    /// Software to check as SOURCE:NAME (generic, pypi, pecl, github, bitbucket)
    /// or a name from the config file (if empty, checks all configured software)
    software: Vec<String>,

    /// Page to scrape for generic:NAME
    #[arg(long)]
    url: Option<String>,

    /// Regex with one capture group for generic:NAME
    #[arg(long)]
    pattern: Option<String>,

    /// Text to strip from tag names for github:/bitbucket: (e.g. "v")
    #[arg(long)]
    trim: Option<String>,

    /// Use this comparison backend instead of probing
    #[arg(short, long, value_enum)]
    backend: Option<BackendKind>,

    /// List every version found, oldest first
    #[arg(short, long)]
    all: bool,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Only show version number
    #[arg(short, long)]
    quiet: bool,

    /// Bypass cache (always fetch fresh data)
    #[arg(long)]
    no_cache: bool,

    /// Config file (default: ~/.config/toleo/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// ─────────────────────────────────────────────────────────────────────────────
// Result types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(serde::Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Status {
    Found,
    NotFound,
    Failed,
}

#[derive(serde::Serialize, Debug)]
struct SoftwareResult {
    software: String,
    source: &'static str,
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    versions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl SoftwareResult {
    fn new(software: &Software, status: Status) -> Self {
        Self {
            software: software.name.clone(),
            source: software.source.name(),
            status,
            latest: None,
            versions: Vec::new(),
            error: None,
        }
    }

    fn found(software: &Software, latest: String, versions: Vec<String>) -> Self {
        Self { latest: Some(latest), versions, ..Self::new(software, Status::Found) }
    }

    fn not_found(software: &Software) -> Self {
        Self::new(software, Status::NotFound)
    }

    fn failed(software: &Software, error: &toleo::Error) -> Self {
        Self { error: Some(error.to_string()), ..Self::new(software, Status::Failed) }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Core logic
// ─────────────────────────────────────────────────────────────────────────────

/// Turn command-line arguments (or the config file) into software entries
fn resolve(cli: &Cli, config: &Config) -> Result<Vec<Software>, String> {
    if cli.software.is_empty() {
        if config.software.is_empty() {
            return Err("No software given. Usage: toleo <SOURCE:NAME> [...]".to_string());
        }
        return Ok(config.software.clone());
    }

    cli.software
        .iter()
        .map(|arg| match parse_software_arg(arg) {
            (Some(source), name) => Ok(Software {
                url: cli.url.clone(),
                pattern: cli.pattern.clone(),
                trim: cli.trim.clone(),
                ..Software::new(name, source)
            }),
            (None, name) => config
                .find(&name)
                .cloned()
                .ok_or_else(|| format!("Unknown software: {name} (use SOURCE:NAME or add it to the config file)")),
        })
        .collect()
}

/// Fetch raw versions for one software, with optional caching
fn query_versions(software: &Software, use_cache: bool) -> toleo::Result<Vec<String>> {
    let source = software.create()?;
    let url = source.url();
    let key = cache::key(
        source.name(),
        &software.name,
        &[&url, software.pattern.as_deref().unwrap_or_default(), software.trim.as_deref().unwrap_or_default()],
    );
    if use_cache {
        if let Some(cached) = cache::get(&key) {
            return Ok(cached);
        }
    }
    let versions = source.versions()?;
    if use_cache && !versions.is_empty() {
        cache::set(&key, &versions);
    }
    Ok(versions)
}

/// Pick the latest of `raw`, or every version in ascending order when `all`
fn rank(raw: Vec<String>, backend: &Arc<dyn Backend>, all: bool) -> toleo::Result<(String, Vec<String>)> {
    let candidates: Vec<_> = raw.into_iter().map(|v| Version::new(v, backend.clone())).collect();
    if all {
        let sorted = version::sort(candidates)?;
        let latest = sorted.last().ok_or(toleo::Error::NoCandidates)?.to_string();
        Ok((latest, sorted.iter().map(ToString::to_string).collect()))
    } else {
        Ok((version::latest(&candidates)?.to_string(), Vec::new()))
    }
}

fn check(software: &Software, backend: &Arc<dyn Backend>, use_cache: bool, all: bool) -> SoftwareResult {
    let raw = match query_versions(software, use_cache) {
        Ok(raw) if raw.is_empty() => return SoftwareResult::not_found(software),
        Ok(raw) => raw,
        Err(e) => return SoftwareResult::failed(software, &e),
    };
    match rank(raw, backend, all) {
        Ok((latest, versions)) => SoftwareResult::found(software, latest, versions),
        Err(e) => SoftwareResult::failed(software, &e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output formatting
// ─────────────────────────────────────────────────────────────────────────────

fn format_problem(r: &SoftwareResult) -> String {
    match (&r.status, &r.error) {
        (Status::Failed, Some(e)) => format!("{}: {}", r.software, e),
        _ => format!("{}: not found", r.software),
    }
}

fn output_results(cli: &Cli, results: &[SoftwareResult]) {
    if cli.json {
        let out = match results {
            [single] => serde_json::to_string_pretty(single),
            _ => serde_json::to_string_pretty(results),
        };
        match out {
            Ok(out) => println!("{out}"),
            Err(e) => eprintln!("could not serialize results: {e}"),
        }
        return;
    }

    let multi = results.len() > 1;
    for r in results {
        let Some(latest) = &r.latest else {
            eprintln!("{}", format_problem(r));
            continue;
        };
        if cli.all {
            if multi { println!("{}:", r.software); }
            for v in &r.versions {
                println!("{}{}", if multi { "  " } else { "" }, v);
            }
        } else if cli.quiet || !multi {
            println!("{latest}");
        } else {
            println!("{}: {}", r.software, latest);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load(cli.config.as_deref());

    let software = match resolve(&cli, &config) {
        Ok(software) => software,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    };

    let order = cli.backend.map_or_else(|| config.backends.clone(), |kind| vec![kind]);
    let backend = match backend::detect(&order) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(3);
        }
    };

    let use_cache = !cli.no_cache;
    let results: Vec<_> = software
        .par_iter()
        .map(|s| check(s, &backend, use_cache, cli.all))
        .collect();

    output_results(&cli, &results);

    let code = i32::from(results.iter().any(|r| r.status != Status::Found));
    std::process::exit(code);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use toleo::backend::NumericBackend;
    use toleo::software::SourceType;

    fn numeric() -> Arc<dyn Backend> {
        Arc::new(NumericBackend)
    }

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("toleo").chain(args.iter().copied()))
    }

    #[test]
    fn test_rank_latest() {
        let (latest, versions) = rank(strings(&["1.0", "1.10", "1.9"]), &numeric(), false).unwrap();
        assert_eq!(latest, "1.10");
        assert!(versions.is_empty());
    }

    #[test]
    fn test_rank_all() {
        let (latest, versions) = rank(strings(&["1.0", "1.10", "1.9"]), &numeric(), true).unwrap();
        assert_eq!(latest, "1.10");
        assert_eq!(versions, vec!["1.0", "1.9", "1.10"]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(matches!(rank(Vec::new(), &numeric(), false), Err(toleo::Error::NoCandidates)));
    }

    #[test]
    fn test_resolve_prefixed() {
        let cli = cli(&["--trim", "v", "github:python/cpython", "pypi:requests"]);
        let software = resolve(&cli, &Config::default()).unwrap();
        assert_eq!(software[0].source, SourceType::Github);
        assert_eq!(software[0].trim.as_deref(), Some("v"));
        assert_eq!(software[1].name, "requests");
    }

    #[test]
    fn test_resolve_from_config() {
        let config = Config { software: vec![Software::new("requests", SourceType::Pypi)], ..Config::default() };
        assert_eq!(resolve(&cli(&["requests"]), &config).unwrap()[0].source, SourceType::Pypi);
        assert_eq!(resolve(&cli(&[]), &config).unwrap().len(), 1);
    }

    #[test]
    fn test_resolve_unknown() {
        let err = resolve(&cli(&["nginx"]), &Config::default()).unwrap_err();
        assert!(err.contains("Unknown software: nginx"));
        assert!(resolve(&cli(&[]), &Config::default()).is_err());
    }

    #[test]
    fn test_format_problem() {
        let software = Software::new("requests", SourceType::Pypi);
        assert_eq!(format_problem(&SoftwareResult::not_found(&software)), "requests: not found");
        let failed = SoftwareResult::failed(&software, &toleo::Error::NoCandidates);
        assert_eq!(format_problem(&failed), "requests: no candidate versions to choose from");
    }

    #[test]
    fn test_result_json_shape() {
        let software = Software::new("requests", SourceType::Pypi);
        let json = serde_json::to_value(SoftwareResult::found(&software, "2.32.3".into(), Vec::new())).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["source"], "pypi");
        assert_eq!(json["latest"], "2.32.3");
        assert!(json.get("versions").is_none());
        assert!(json.get("error").is_none());
    }
}
