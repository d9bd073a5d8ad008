//! Command-line host for the tax declaration wizard.

pub mod app;
pub mod config;
pub mod export;
pub mod logging;
pub mod render;
