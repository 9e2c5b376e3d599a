//! Cross-cutting configuration shared by the binary and adapters.

pub mod config;
