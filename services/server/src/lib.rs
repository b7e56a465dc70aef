//! Roster board document service.
//!
//! This crate primarily ships a `roster-server` binary, but we expose a small
//! library surface to enable integration testing and reuse.

pub mod api;
pub mod config;
pub mod state;
pub mod store;
