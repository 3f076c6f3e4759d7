//! Mercwatch - party finder merc run notifier

pub mod commands;
pub mod config;
pub mod error;
pub mod listing;
pub mod notify;
pub mod page;
pub mod source;
pub mod telemetry;
pub mod tracker;
pub mod watcher;
