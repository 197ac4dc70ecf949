//! Workflow phase tracking with guard checks.
//!
//! Terraform itself rejects out-of-order calls (`plan` before `init`), but
//! only after a subprocess round-trip with an opaque error. Tfpilot keeps an
//! explicit phase marker per working directory and refuses ill-ordered
//! commands up front with a precondition error instead.

use crate::core::error::Error;
use crate::core::types::CommandKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Marker file holding the phase, relative to the working directory.
pub const PHASE_FILE: &str = ".tfpilot-phase.json";

/// How far the working directory has progressed through the workflow.
/// Ordering follows declaration order: a command is admissible when the
/// current phase is at or past its requirement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Uninitialized,
    Initialized,
    Validated,
    Planned,
    Applied,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Initialized => write!(f, "initialized"),
            Self::Validated => write!(f, "validated"),
            Self::Planned => write!(f, "planned"),
            Self::Applied => write!(f, "applied"),
        }
    }
}

/// On-disk shape of the phase marker.
#[derive(Debug, Serialize, Deserialize)]
struct PhaseMarker {
    phase: Phase,
}

fn marker_path(workdir: &Path) -> PathBuf {
    workdir.join(PHASE_FILE)
}

/// Load the phase for a working directory. A missing or unparseable marker
/// means the directory must be treated as fresh.
pub fn load_phase(workdir: &Path) -> Phase {
    let path = marker_path(workdir);
    let Ok(content) = std::fs::read_to_string(&path) else {
        return Phase::Uninitialized;
    };
    serde_json::from_str::<PhaseMarker>(&content)
        .map(|m| m.phase)
        .unwrap_or(Phase::Uninitialized)
}

/// Persist the phase atomically (write to temp, then rename).
pub fn save_phase(workdir: &Path, phase: Phase) -> Result<(), Error> {
    let path = marker_path(workdir);
    let json = serde_json::to_string(&PhaseMarker { phase })
        .map_err(|e| Error::io("serialize phase marker", e.into()))?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json)
        .map_err(|e| Error::io(format!("cannot write {}", tmp_path.display()), e))?;
    std::fs::rename(&tmp_path, &path)
        .map_err(|e| Error::io(format!("cannot rename to {}", path.display()), e))?;
    Ok(())
}

/// Drop back to `Uninitialized` — the definition file changed under us.
pub fn reset_phase(workdir: &Path) -> Result<(), Error> {
    save_phase(workdir, Phase::Uninitialized)
}

/// Minimum phase a command needs. `init` and `force-unlock` run from
/// anywhere.
pub fn required_phase(cmd: &CommandKind) -> Option<Phase> {
    match cmd {
        CommandKind::Init | CommandKind::ForceUnlock { .. } => None,
        CommandKind::Validate => Some(Phase::Initialized),
        CommandKind::Plan => Some(Phase::Validated),
        CommandKind::Apply => Some(Phase::Planned),
    }
}

/// Phase the working directory reaches once a command succeeds.
/// `force-unlock` does not move the workflow.
pub fn reached_phase(cmd: &CommandKind) -> Option<Phase> {
    match cmd {
        CommandKind::Init => Some(Phase::Initialized),
        CommandKind::Validate => Some(Phase::Validated),
        CommandKind::Plan => Some(Phase::Planned),
        CommandKind::Apply => Some(Phase::Applied),
        CommandKind::ForceUnlock { .. } => None,
    }
}

/// Guard check: reject a command whose required phase has not been reached.
/// Returns the current phase so callers can advance it after success.
pub fn check_phase(workdir: &Path, cmd: &CommandKind) -> Result<Phase, Error> {
    let current = load_phase(workdir);
    if let Some(required) = required_phase(cmd) {
        if current < required {
            return Err(Error::PhaseNotReached {
                command: cmd.to_string(),
                required,
                current,
            });
        }
    }
    Ok(current)
}
