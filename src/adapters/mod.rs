//! Infrastructure adapters. Implement ports and drive use cases.
//!
//! Audit storage, CSV export, terminal UI, HTTP API. Map errors to DomainError.

pub mod export;
pub mod http;
pub mod persistence;
pub mod ui;
