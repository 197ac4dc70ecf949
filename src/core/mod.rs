//! Core logic: configuration, code generation, command running,
//! state reading, and workflow phase tracking.

pub mod codegen;
pub mod config;
pub mod error;
pub mod runner;
pub mod state;
pub mod types;
pub mod workflow;
