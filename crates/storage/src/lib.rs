//! Storage layer for YouTube OneClick
//!
//! This crate provides the settings value and its on-disk persistence.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod persistence;
pub mod settings;

pub use persistence::{Result, SettingsStore, StorageError};
pub use settings::OneClickSettings;
