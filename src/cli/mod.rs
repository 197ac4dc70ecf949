//! CLI subcommands — generate, upload, init, validate, plan, apply,
//! unlock, resources, status.

use crate::core::codegen::Generator;
use crate::core::config::Config;
use crate::core::error::Error;
use crate::core::runner::{self, Invocation};
use crate::core::types::{CommandKind, ResourceRecord};
use crate::core::{state, workflow};
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a definition file from a natural-language description
    Generate {
        /// Infrastructure description, e.g. "a VPC with two subnets"
        prompt: String,

        /// Path to tfpilot.toml
        #[arg(short, long, default_value = "tfpilot.toml")]
        config: PathBuf,
    },

    /// Copy an existing .tf file into the working directory
    Upload {
        /// File to copy in as the definition
        file: PathBuf,

        /// Path to tfpilot.toml
        #[arg(short, long, default_value = "tfpilot.toml")]
        config: PathBuf,
    },

    /// Run `terraform init` in the working directory
    Init {
        /// Path to tfpilot.toml
        #[arg(short, long, default_value = "tfpilot.toml")]
        config: PathBuf,
    },

    /// Run `terraform validate` (requires init)
    Validate {
        /// Path to tfpilot.toml
        #[arg(short, long, default_value = "tfpilot.toml")]
        config: PathBuf,
    },

    /// Run `terraform plan` (requires validate)
    Plan {
        /// Path to tfpilot.toml
        #[arg(short, long, default_value = "tfpilot.toml")]
        config: PathBuf,
    },

    /// Run `terraform apply -auto-approve` (requires plan)
    Apply {
        /// Path to tfpilot.toml
        #[arg(short, long, default_value = "tfpilot.toml")]
        config: PathBuf,
    },

    /// Force-unlock a stuck state lock
    Unlock {
        /// Lock ID from the terraform error message
        lock_id: String,

        /// Path to tfpilot.toml
        #[arg(short, long, default_value = "tfpilot.toml")]
        config: PathBuf,
    },

    /// Render the resource inventory from the state artifact
    Resources {
        /// Path to tfpilot.toml
        #[arg(short, long, default_value = "tfpilot.toml")]
        config: PathBuf,
    },

    /// Show workflow phase and working-directory contents
    Status {
        /// Path to tfpilot.toml
        #[arg(short, long, default_value = "tfpilot.toml")]
        config: PathBuf,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), Error> {
    match cmd {
        Commands::Generate { prompt, config } => cmd_generate(&Config::load(&config)?, &prompt),
        Commands::Upload { file, config } => cmd_upload(&Config::load(&config)?, &file),
        Commands::Init { config } => run_terraform(&Config::load(&config)?, CommandKind::Init),
        Commands::Validate { config } => {
            run_terraform(&Config::load(&config)?, CommandKind::Validate)
        }
        Commands::Plan { config } => run_terraform(&Config::load(&config)?, CommandKind::Plan),
        Commands::Apply { config } => run_terraform(&Config::load(&config)?, CommandKind::Apply),
        Commands::Unlock { lock_id, config } => {
            run_terraform(&Config::load(&config)?, CommandKind::ForceUnlock { lock_id })
        }
        Commands::Resources { config } => cmd_resources(&Config::load(&config)?),
        Commands::Status { config } => cmd_status(&Config::load(&config)?),
    }
}

fn cmd_generate(config: &Config, prompt: &str) -> Result<(), Error> {
    let generator = Generator::new(config.api.clone());
    // On failure nothing is written; the previous definition stays intact.
    let code = generator.generate(prompt)?;

    write_definition(config, code.as_bytes())?;

    println!("Generated {}:", config.definition_path().display());
    println!();
    println!("{}", code);
    Ok(())
}

fn cmd_upload(config: &Config, file: &Path) -> Result<(), Error> {
    let content = std::fs::read(file)
        .map_err(|e| Error::io(format!("cannot read {}", file.display()), e))?;

    write_definition(config, &content)?;

    println!(
        "Uploaded {} as {}",
        file.display(),
        config.definition_path().display()
    );
    Ok(())
}

/// Overwrite the definition file and reset the workflow: a new definition
/// invalidates everything terraform did for the old one.
fn write_definition(config: &Config, content: &[u8]) -> Result<(), Error> {
    std::fs::create_dir_all(&config.working_dir).map_err(|e| {
        Error::io(
            format!("cannot create {}", config.working_dir.display()),
            e,
        )
    })?;
    let path = config.definition_path();
    std::fs::write(&path, content)
        .map_err(|e| Error::io(format!("cannot write {}", path.display()), e))?;
    workflow::reset_phase(&config.working_dir)
}

/// Shared driver for the terraform subcommands: phase guard, one blocking
/// invocation, outcome echoed, phase advanced on success.
fn run_terraform(config: &Config, kind: CommandKind) -> Result<(), Error> {
    let definition = config.definition_path();
    if !matches!(kind, CommandKind::ForceUnlock { .. }) && !definition.exists() {
        return Err(Error::MissingDefinition(definition));
    }

    workflow::check_phase(&config.working_dir, &kind)?;

    let outcome = runner::run(&Invocation::terraform(config, &kind));

    if outcome.success() {
        println!("{} succeeded", kind);
        if !outcome.stdout.trim().is_empty() {
            println!("{}", outcome.stdout.trim_end());
        }
        if let Some(reached) = workflow::reached_phase(&kind) {
            workflow::save_phase(&config.working_dir, reached)?;
        }
        Ok(())
    } else {
        eprintln!("{} failed", kind);
        if !outcome.stderr.trim().is_empty() {
            eprintln!("{}", outcome.stderr.trim_end());
        }
        Err(Error::CommandFailed {
            command: kind.to_string(),
            exit_code: outcome.exit_code,
        })
    }
}

fn cmd_resources(config: &Config) -> Result<(), Error> {
    match state::read_state(&config.state_path())? {
        None => {
            println!(
                "No state artifact at {}. Run `tfpilot apply` to create resources.",
                config.state_path().display()
            );
        }
        Some(records) if records.is_empty() => {
            println!("State artifact holds no resources.");
        }
        Some(records) => print_records(&records),
    }
    Ok(())
}

/// Render records as an aligned table.
fn print_records(records: &[ResourceRecord]) {
    let mut type_w = "TYPE".len();
    let mut name_w = "NAME".len();
    let mut id_w = "ID".len();
    for r in records {
        type_w = type_w.max(r.resource_type.len());
        name_w = name_w.max(r.name.len());
        id_w = id_w.max(r.id.len());
    }

    println!(
        "{:<type_w$}  {:<name_w$}  {:<id_w$}  CIDR BLOCK",
        "TYPE", "NAME", "ID"
    );
    for r in records {
        println!(
            "{:<type_w$}  {:<name_w$}  {:<id_w$}  {}",
            r.resource_type, r.name, r.id, r.cidr_block
        );
    }
    println!();
    println!("{} resource instance(s).", records.len());
}

fn cmd_status(config: &Config) -> Result<(), Error> {
    let definition = config.definition_path();
    let state_path = config.state_path();
    let phase = workflow::load_phase(&config.working_dir);

    println!("Working directory: {}", config.working_dir.display());
    println!("Phase: {}", phase);
    println!(
        "Definition file: {}",
        if definition.exists() {
            "present"
        } else {
            "missing — generate or upload one"
        }
    );
    println!(
        "State artifact: {}",
        if state_path.exists() { "present" } else { "missing" }
    );
    Ok(())
}
