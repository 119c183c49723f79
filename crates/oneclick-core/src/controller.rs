//! Convenience wrapper that keeps one player handle for a chain of calls

use crate::frame::FrameContainer;
use crate::player::{self, Player};
use thiserror::Error;

/// Errors returned by [`PlayerController`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// The controller holds no player
    #[error("No YouTube iframe found")]
    NoPlayer,

    /// The underlying player call failed
    #[error(transparent)]
    Player(#[from] player::PlayerError),
}

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, ControllerError>;

/// Holds an optional player handle between calls
///
/// # Example
///
/// ```
/// use oneclick_core::controller::PlayerController;
/// use oneclick_core::frame::DocumentView;
///
/// let mut controller = PlayerController::new();
/// assert!(!controller.find_in_container(&DocumentView::new(), None));
/// assert!(controller.play().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlayerController {
    player: Option<Player>,
}

impl PlayerController {
    /// Create a controller without a player
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller bound to the first player in `container`
    pub fn in_container<C>(container: &C) -> Self
    where
        C: FrameContainer + ?Sized,
    {
        Self { player: player::find_player_in(container, None) }
    }

    /// Replace the held player
    pub fn set_player(&mut self, player: Option<Player>) {
        self.player = player;
    }

    /// Re-resolve the player from `container`; returns whether one was found
    pub fn find_in_container<C>(&mut self, container: &C, video_id: Option<&str>) -> bool
    where
        C: FrameContainer + ?Sized,
    {
        self.player = player::find_player_in(container, video_id);
        self.player.is_some()
    }

    /// Whether a player is held
    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    /// The held player, if any
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Seek the held player
    pub fn seek_to(&self, seconds: i64, allow_seek_ahead: bool) -> Result<String> {
        let held = self.player.as_ref().ok_or(ControllerError::NoPlayer)?;
        Ok(player::seek_to(Some(held), seconds, allow_seek_ahead)?)
    }

    /// Start playback on the held player
    pub fn play(&self) -> Result<String> {
        let held = self.player.as_ref().ok_or(ControllerError::NoPlayer)?;
        Ok(player::play_video(Some(held))?)
    }

    /// Pause the held player
    pub fn pause(&self) -> Result<String> {
        let held = self.player.as_ref().ok_or(ControllerError::NoPlayer)?;
        Ok(player::pause_video(Some(held))?)
    }
}
