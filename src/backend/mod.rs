//! Platform version-ordering oracles
//!
//! Each distribution family defines its own ordering for versions like
//! `1.0~rc1`, `1.0a` or `1.0.0`, so comparisons are delegated to the
//! reference tool of exactly one of them. The oracle is chosen once at
//! startup by [`detect`] and then shared by every [`crate::version::Version`].

mod apt;
mod numeric;
mod pacman;
mod rpm;

pub use apt::AptBackend;
pub use numeric::NumericBackend;
pub use pacman::PacmanBackend;
pub use rpm::RpmBackend;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::process::{Command, Output};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Rpm,
    Apt,
    Pacman,
}

impl BackendKind {
    /// Create a boxed Backend from this kind
    #[must_use]
    pub fn create(self) -> Box<dyn Backend> {
        match self {
            Self::Rpm => Box::new(RpmBackend),
            Self::Apt => Box::new(AptBackend),
            Self::Pacman => Box::new(PacmanBackend),
        }
    }

    /// Parse a backend name string
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rpm" => Some(Self::Rpm),
            "apt" => Some(Self::Apt),
            "pacman" => Some(Self::Pacman),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rpm => "rpm",
            Self::Apt => "apt",
            Self::Pacman => "pacman",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Probe order used when nothing is configured.
#[must_use]
pub fn default_order() -> Vec<BackendKind> {
    vec![BackendKind::Rpm, BackendKind::Apt, BackendKind::Pacman]
}

pub trait Backend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Returns true if the oracle can be used on this system
    fn probe(&self) -> bool;

    /// Compare two bare version strings. The sign of the result orders `a`
    /// relative to `b`.
    fn vercmp(&self, a: &str, b: &str) -> Result<i32>;

    /// Compare two strings that both carry an epoch or release.
    fn vercmp_labelled(&self, a: &str, b: &str) -> Result<i32> {
        self.vercmp(a, b)
    }
}

/// Probe the given backend kinds in order and return the first usable one.
pub fn detect(order: &[BackendKind]) -> Result<Arc<dyn Backend>> {
    detect_with(order.iter().map(|kind| kind.create()))
}

/// Like [`detect`], over caller-supplied implementations.
pub fn detect_with(candidates: impl IntoIterator<Item = Box<dyn Backend>>) -> Result<Arc<dyn Backend>> {
    let mut tried = Vec::new();
    for backend in candidates {
        let kind = backend.kind();
        if backend.probe() {
            info!(backend = %kind, "selected version comparison backend");
            return Ok(Arc::from(backend));
        }
        debug!(backend = %kind, "backend unavailable");
        tried.push(kind);
    }
    Err(Error::NoBackend { tried })
}

/// Run an oracle command, capturing its output.
fn run(program: &'static str, args: &[&str]) -> Result<Output> {
    debug!(program, ?args, "running");
    Command::new(program).args(args).output().map_err(|source| Error::Spawn { program, source })
}

/// Returns true if `program` runs successfully and prints `expected`.
fn prints(program: &'static str, args: &[&str], expected: &str) -> bool {
    run(program, args)
        .is_ok_and(|o| o.status.success() && String::from_utf8_lossy(&o.stdout).trim() == expected)
}

/// Read a signed comparison result from an oracle's stdout.
fn parse_sign(kind: BackendKind, output: &Output) -> Result<i32> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        return Err(malformed(kind, output));
    }
    stdout.trim().parse::<i32>().map(i32::signum).map_err(|_| Error::Malformed {
        backend: kind,
        message: format!("unexpected output {:?}", stdout.trim()),
    })
}

/// Refuse versions that a command-line oracle would read as options.
fn reject_options(kind: BackendKind, versions: &[&str]) -> Result<()> {
    match versions.iter().find(|v| v.starts_with('-')) {
        Some(v) => Err(Error::Malformed { backend: kind, message: format!("version '{v}' starts with '-'") }),
        None => Ok(()),
    }
}

fn malformed(kind: BackendKind, output: &Output) -> Error {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = match stderr.trim() {
        "" => format!("exited with {}", output.status),
        msg => msg.to_string(),
    };
    Error::Malformed { backend: kind, message }
}
