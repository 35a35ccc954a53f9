use super::{parse_sign, prints, reject_options, run, Backend, BackendKind};
use crate::error::Result;

/// Arch ordering via pacman's `vercmp` utility.
pub struct PacmanBackend;

impl Backend for PacmanBackend {
    fn kind(&self) -> BackendKind { BackendKind::Pacman }

    fn probe(&self) -> bool {
        prints("vercmp", &["0", "0"], "0")
    }

    fn vercmp(&self, a: &str, b: &str) -> Result<i32> {
        reject_options(BackendKind::Pacman, &[a, b])?;
        let output = run("vercmp", &[a, b])?;
        parse_sign(BackendKind::Pacman, &output)
    }
}
