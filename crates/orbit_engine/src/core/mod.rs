//! Core engine services
//!
//! Currently hosts the configuration system.

pub mod config;
