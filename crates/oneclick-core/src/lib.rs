//! Core logic for YouTube OneClick
//!
//! This crate parses timestamp links such as `play 1:23:45`, finds the
//! embedded YouTube player in a rendered document, and drives it with
//! command messages.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod click;
pub mod command;
pub mod commands;
pub mod controller;
pub mod frame;
pub mod player;
pub mod timestamp;

pub use click::{ClickError, ClickHandler, ClickOutcome, NoticeSink, AUTOPLAY_DELAY};
pub use frame::{EmbedFrame, FrameContainer, MessageTarget};
pub use player::{Player, PlayerError};
pub use timestamp::ParsedTimestamp;
