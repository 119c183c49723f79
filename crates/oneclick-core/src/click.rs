//! Timestamp link click handling
//!
//! Turns a click on a timestamp link into a seek on the first embedded
//! player of the active document view, optionally followed by a delayed
//! play command.

use crate::frame::FrameContainer;
use crate::player::{self, Player, PlayerError};
use crate::timestamp::{self, ParsedTimestamp};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use storage::OneClickSettings;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Delay between the seek and the auto-play command
///
/// The player never acknowledges commands, so this only gives it time to
/// process the seek. Ordering is not guaranteed.
pub const AUTOPLAY_DELAY: Duration = Duration::from_millis(100);

/// Receiver for user-visible notices
#[cfg_attr(test, mockall::automock)]
pub trait NoticeSink: Send + Sync {
    /// Show a short message to the user
    fn notify(&self, message: &str);
}

/// Notice sink that keeps every message
#[derive(Debug, Default)]
pub struct RecordingNotices {
    notices: Mutex<Vec<String>>,
}

impl RecordingNotices {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages shown so far, oldest first
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().clone()
    }
}

impl NoticeSink for RecordingNotices {
    fn notify(&self, message: &str) {
        self.notices.lock().push(message.to_string());
    }
}

/// Failures surfaced to the user after a timestamp link was intercepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClickError {
    /// The link looked like a timestamp but did not parse
    #[error("Invalid timestamp format")]
    InvalidTimestamp,

    /// No document view is active
    #[error("No active markdown view")]
    NoActiveView,

    /// The active view has no embedded YouTube player
    #[error("No YouTube video found in this note")]
    NoPlayer,

    /// The seek could not be dispatched
    #[error(transparent)]
    Player(#[from] PlayerError),
}

/// What happened to a click
#[derive(Debug)]
pub enum ClickOutcome {
    /// Not a timestamp link; the host should let the click through
    Ignored,

    /// The player was sent a seek
    Seeked {
        /// The parsed link timestamp
        timestamp: ParsedTimestamp,
        /// Pending auto-play task, when auto-play is on
        autoplay: Option<JoinHandle<()>>,
    },

    /// The click was intercepted but failed
    Failed(ClickError),
}

impl ClickOutcome {
    /// Whether the host must prevent the default action and stop propagation
    pub fn is_intercepted(&self) -> bool {
        !matches!(self, ClickOutcome::Ignored)
    }

    /// The error, if the click failed
    pub fn error(&self) -> Option<&ClickError> {
        match self {
            ClickOutcome::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Handles clicks on timestamp links
#[derive(Clone)]
pub struct ClickHandler {
    settings: OneClickSettings,
    notices: Arc<dyn NoticeSink>,
    autoplay_delay: Duration,
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickHandler")
            .field("settings", &self.settings)
            .field("autoplay_delay", &self.autoplay_delay)
            .finish()
    }
}

impl ClickHandler {
    /// Create a handler with explicit settings and a notice sink
    pub fn new(settings: OneClickSettings, notices: Arc<dyn NoticeSink>) -> Self {
        Self { settings, notices, autoplay_delay: AUTOPLAY_DELAY }
    }

    /// Override the auto-play delay
    pub fn with_autoplay_delay(mut self, delay: Duration) -> Self {
        self.autoplay_delay = delay;
        self
    }

    /// Current settings
    pub fn settings(&self) -> OneClickSettings {
        self.settings
    }

    /// Replace the settings, e.g. after the user toggles one
    pub fn set_settings(&mut self, settings: OneClickSettings) {
        self.settings = settings;
    }

    /// Handle a click on a link with the given text inside `view`
    ///
    /// Auto-play is scheduled on the current tokio runtime. Without a
    /// runtime the play command is sent right away.
    pub fn handle_click(
        &self,
        link_text: Option<&str>,
        view: Option<&dyn FrameContainer>,
    ) -> ClickOutcome {
        let Some(text) = link_text.filter(|text| timestamp::is_timestamp_link(Some(*text))) else {
            return ClickOutcome::Ignored;
        };

        tracing::info!(link_text = text, "timestamp link clicked");

        match self.seek_from_link(text, view) {
            Ok((timestamp, autoplay)) => ClickOutcome::Seeked { timestamp, autoplay },
            Err(error) => {
                tracing::debug!(%error, "timestamp click failed");
                self.notices.notify(&error.to_string());
                ClickOutcome::Failed(error)
            }
        }
    }

    fn seek_from_link(
        &self,
        text: &str,
        view: Option<&dyn FrameContainer>,
    ) -> Result<(ParsedTimestamp, Option<JoinHandle<()>>), ClickError> {
        let timestamp = timestamp::extract_timestamp(text).ok_or(ClickError::InvalidTimestamp)?;
        let view = view.ok_or(ClickError::NoActiveView)?;
        let player = player::find_player_in(view, None).ok_or(ClickError::NoPlayer)?;

        player::ensure_command_api_enabled(&player);
        let seconds = i64::try_from(timestamp.seconds).unwrap_or(i64::MAX);
        player::seek_to(Some(&player), seconds, true)?;

        let autoplay = if self.settings.auto_play { self.schedule_play(player) } else { None };

        if self.settings.show_success_notice {
            self.notices.notify(&format!("▶️ {}", timestamp.formatted));
        }

        Ok((timestamp, autoplay))
    }

    fn schedule_play(&self, player: Player) -> Option<JoinHandle<()>> {
        let delay = self.autoplay_delay;

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => Some(runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                if let Err(e) = player::play_video(Some(&player)) {
                    tracing::warn!(error = %e, "auto-play failed");
                }
            })),
            Err(_) => {
                tracing::warn!("no async runtime, playing without delay");
                if let Err(e) = player::play_video(Some(&player)) {
                    tracing::warn!(error = %e, "auto-play failed");
                }
                None
            }
        }
    }
}
