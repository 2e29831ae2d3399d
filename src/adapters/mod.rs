//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (file I/O, JSON, JSON Schema). Each sub-module
//! groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `persistence`: JSON document store, entity mapping, repositories

pub mod persistence;
