//! Tfpilot — a workflow front-end for Terraform.
//!
//! Generate HCL from a prompt (or take an existing file), drive
//! `terraform init/validate/plan/apply` with explicit phase guards,
//! and render the resulting state inventory.

pub mod cli;
pub mod core;
