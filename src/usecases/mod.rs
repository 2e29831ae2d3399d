//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates the repository ports into the operations callers
//! actually perform.
//!
//! Use cases:
//! - `ConfigService`: Id checks and logging in front of a repository
//! - `ConfigSnapshot`: All configuration documents read together

pub mod config_service;
pub mod snapshot;
