//! Command palette entries

use crate::click::NoticeSink;
use crate::frame::FrameContainer;
use crate::player;

/// Notice shown when a command finds no player
pub const NO_VIDEO_NOTICE: &str = "No YouTube video found";

/// Seconds moved by the relative seek commands
pub const SEEK_STEP_SECONDS: i64 = 5;

/// Commands registered with the host's command palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Toggle play/pause
    TogglePlayPause,
    /// Seek back five seconds
    SeekBack,
    /// Seek forward five seconds
    SeekForward,
}

impl HostCommand {
    /// Every command, in registration order
    pub const ALL: [HostCommand; 3] =
        [HostCommand::TogglePlayPause, HostCommand::SeekBack, HostCommand::SeekForward];

    /// Stable command id
    pub fn id(&self) -> &'static str {
        match self {
            HostCommand::TogglePlayPause => "youtube-play-pause",
            HostCommand::SeekBack => "youtube-seek-back-5",
            HostCommand::SeekForward => "youtube-seek-forward-5",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            HostCommand::TogglePlayPause => "Toggle play/pause",
            HostCommand::SeekBack => "Seek back 5 seconds",
            HostCommand::SeekForward => "Seek forward 5 seconds",
        }
    }

    /// Look up a command by id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.id() == id)
    }

    /// Run the command against the active view
    ///
    /// Returns whether a player was found. Without an active view the
    /// command does nothing.
    pub fn run(&self, view: Option<&dyn FrameContainer>, notices: &dyn NoticeSink) -> bool {
        let Some(view) = view else {
            return false;
        };

        let Some(found) = player::find_player_in(view, None) else {
            notices.notify(NO_VIDEO_NOTICE);
            return false;
        };

        tracing::debug!(command = self.id(), "running player command");

        match self {
            HostCommand::TogglePlayPause => {
                // Playback state is unknown, so toggling always plays
                if let Err(e) = player::play_video(Some(&found)) {
                    notices.notify(&e.to_string());
                }
            }
            HostCommand::SeekBack => notices.notify(&seek_notice(-SEEK_STEP_SECONDS)),
            HostCommand::SeekForward => notices.notify(&seek_notice(SEEK_STEP_SECONDS)),
        }

        true
    }
}

fn seek_notice(delta_seconds: i64) -> String {
    if delta_seconds > 0 {
        format!("Seek +{}s", delta_seconds)
    } else {
        format!("Seek {}s", delta_seconds)
    }
}
