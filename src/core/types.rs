//! Shared types: terraform command kinds and flattened resource records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// File the generator and upload path both write into the working directory.
pub const DEFINITION_FILE: &str = "main.tf";

/// State artifact terraform deposits in the working directory.
pub const STATE_FILE: &str = "terraform.tfstate";

/// Sentinel for attribute keys absent from an instance.
pub const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// Terraform commands
// ============================================================================

/// The fixed set of terraform invocations this tool drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Init,
    Validate,
    Plan,
    Apply,
    ForceUnlock { lock_id: String },
}

impl CommandKind {
    /// Argument vector passed to the terraform binary.
    pub fn argv(&self) -> Vec<String> {
        match self {
            Self::Init => vec!["init".into()],
            Self::Validate => vec!["validate".into()],
            Self::Plan => vec!["plan".into()],
            Self::Apply => vec!["apply".into(), "-auto-approve".into()],
            Self::ForceUnlock { lock_id } => {
                vec!["force-unlock".into(), "-force".into(), lock_id.clone()]
            }
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "terraform init"),
            Self::Validate => write!(f, "terraform validate"),
            Self::Plan => write!(f, "terraform plan"),
            Self::Apply => write!(f, "terraform apply"),
            Self::ForceUnlock { .. } => write!(f, "terraform force-unlock"),
        }
    }
}

// ============================================================================
// Resource records
// ============================================================================

/// One (resource, instance) pair flattened out of the state artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Resource type (e.g. "aws_vpc")
    pub resource_type: String,

    /// Declared resource name
    pub name: String,

    /// Provider-assigned identifier, or "N/A"
    pub id: String,

    /// CIDR block attribute, or "N/A"
    pub cidr_block: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argv_init() {
        assert_eq!(CommandKind::Init.argv(), vec!["init"]);
    }

    #[test]
    fn test_argv_apply_auto_approves() {
        assert_eq!(CommandKind::Apply.argv(), vec!["apply", "-auto-approve"]);
    }

    #[test]
    fn test_argv_force_unlock_carries_lock_id() {
        let cmd = CommandKind::ForceUnlock {
            lock_id: "abc-123".to_string(),
        };
        assert_eq!(cmd.argv(), vec!["force-unlock", "-force", "abc-123"]);
    }

    #[test]
    fn test_command_display() {
        assert_eq!(CommandKind::Plan.to_string(), "terraform plan");
        assert_eq!(
            CommandKind::ForceUnlock { lock_id: "x".into() }.to_string(),
            "terraform force-unlock"
        );
    }

    #[test]
    fn test_resource_record_serde_roundtrip() {
        let record = ResourceRecord {
            resource_type: "aws_vpc".to_string(),
            name: "main".to_string(),
            id: "vpc-1".to_string(),
            cidr_block: "10.0.0.0/16".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ResourceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
