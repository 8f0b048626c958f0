//! Shared helpers for the fixture binaries.

pub mod bootstrap;
