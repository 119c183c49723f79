//! YouTube OneClick
//!
//! Click a `play 12:34` link in a note and the YouTube video embedded in the
//! same note jumps to that time.
//!
//! This crate bundles [`oneclick_core`] and [`storage`] for hosts that want a
//! single dependency.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use oneclick_core;
pub use storage;

pub use oneclick_core::{ClickHandler, ClickOutcome, FrameContainer, NoticeSink};
pub use storage::{OneClickSettings, SettingsStore};
