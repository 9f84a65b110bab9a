//! Data models for receipts and scanner configuration.

pub mod config;
pub mod receipt;
