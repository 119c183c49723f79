//! Embedded player lookup and control
//!
//! Finds a YouTube frame inside a document container and drives it with
//! fire-and-forget command messages. Nothing is cached between calls: the
//! document may have re-rendered, so every action resolves its own player.

use crate::command::{CommandMessage, PlayerCommand, TARGET_ORIGIN};
use crate::frame::{EmbedFrame, FrameContainer};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use url::Url;

/// Query parameter that enables the player's command API
pub const ENABLE_JS_API_PARAM: &str = "enablejsapi";

/// Value of [`ENABLE_JS_API_PARAM`] that turns the API on
pub const ENABLE_JS_API_VALUE: &str = "1";

/// Host substrings that identify a YouTube frame
const YOUTUBE_HOSTS: [&str; 2] = ["youtube.com", "youtube-nocookie.com"];

/// Errors that can occur when controlling a player
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// No player handle was supplied
    #[error("No iframe provided")]
    NoPlayer,
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Handle to one embedded video frame
///
/// Valid only for the operation that resolved it.
#[derive(Clone)]
pub struct Player {
    frame: Arc<dyn EmbedFrame>,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player").field("src", &self.frame.src()).finish()
    }
}

impl Player {
    /// Wrap a frame as a player handle without checking its source
    pub fn new(frame: Arc<dyn EmbedFrame>) -> Self {
        Self { frame }
    }

    /// The underlying frame
    pub fn frame(&self) -> &Arc<dyn EmbedFrame> {
        &self.frame
    }

    /// Current source URL of the frame
    pub fn src(&self) -> Option<String> {
        self.frame.src()
    }

    /// Video ID from the current source, if any
    pub fn video_id(&self) -> Option<String> {
        self.frame.src().as_deref().and_then(extract_video_id)
    }
}

/// Check whether a source URL points at YouTube
///
/// This is a substring check, not a host match: any URL containing one of
/// the domains qualifies.
pub fn is_youtube_url(src: &str) -> bool {
    !src.is_empty() && YOUTUBE_HOSTS.iter().any(|host| src.contains(host))
}

fn embed_id_regex() -> &'static Regex {
    static EMBED_ID_REGEX: OnceLock<Regex> = OnceLock::new();
    EMBED_ID_REGEX.get_or_init(|| Regex::new(r"/embed/([a-zA-Z0-9_-]{11})").unwrap())
}

fn query_id_regex() -> &'static Regex {
    static QUERY_ID_REGEX: OnceLock<Regex> = OnceLock::new();
    QUERY_ID_REGEX.get_or_init(|| Regex::new(r"[?&]v=([a-zA-Z0-9_-]{11})").unwrap())
}

/// Extract the 11-character video ID from an embed path or `v=` parameter
pub fn extract_video_id(src: &str) -> Option<String> {
    embed_id_regex()
        .captures(src)
        .or_else(|| query_id_regex().captures(src))
        .map(|caps| caps[1].to_string())
}

/// Find the first YouTube frame in `container`, in document order
///
/// When `video_id` is given, only a frame playing that video matches.
pub fn find_player_in<C>(container: &C, video_id: Option<&str>) -> Option<Player>
where
    C: FrameContainer + ?Sized,
{
    let player = container
        .frames()
        .into_iter()
        .find(|frame| {
            let src = frame.src().unwrap_or_default();
            if !is_youtube_url(&src) {
                return false;
            }
            match video_id {
                Some(wanted) => extract_video_id(&src).as_deref() == Some(wanted),
                None => true,
            }
        })
        .map(Player::new);

    tracing::debug!(found = player.is_some(), video_id = ?video_id, "player lookup");
    player
}

/// Make sure the frame's source carries `enablejsapi=1`
///
/// Rewrites the source (reloading the frame) only when the flag is missing
/// or set to another value. Returns false when the source is absent or not
/// a valid URL.
pub fn ensure_command_api_enabled(player: &Player) -> bool {
    let src = match player.src() {
        Some(src) if !src.is_empty() => src,
        _ => return false,
    };

    let mut url = match Url::parse(&src) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(src = %src, error = %e, "failed to parse frame URL");
            return false;
        }
    };

    let current = url
        .query_pairs()
        .find(|(key, _)| key == ENABLE_JS_API_PARAM)
        .map(|(_, value)| value.into_owned());
    if current.as_deref() == Some(ENABLE_JS_API_VALUE) {
        return true;
    }

    let query = enable_flag_in_query(url.query());
    url.set_query(Some(&query));
    tracing::debug!(src = %url, "enabling player command API");
    player.frame.set_src(url.as_str());

    true
}

/// Set the enable flag in a raw query string, leaving other pairs untouched
fn enable_flag_in_query(query: Option<&str>) -> String {
    let flag = format!("{}={}", ENABLE_JS_API_PARAM, ENABLE_JS_API_VALUE);
    let mut pairs: Vec<String> = Vec::new();
    let mut replaced = false;

    for pair in query.unwrap_or_default().split('&').filter(|pair| !pair.is_empty()) {
        // Compare decoded keys, matching what query_pairs() reports
        let key = url::form_urlencoded::parse(pair.as_bytes()).next().map(|(key, _)| key);
        if key.as_deref() == Some(ENABLE_JS_API_PARAM) {
            // First occurrence is replaced in place, duplicates dropped
            if !replaced {
                pairs.push(flag.clone());
                replaced = true;
            }
        } else {
            pairs.push(pair.to_string());
        }
    }

    if !replaced {
        pairs.push(flag);
    }

    pairs.join("&")
}

/// Post a command to the player's content window
///
/// Does nothing beyond logging when the frame has not loaded a content
/// window yet.
pub fn send_command(player: &Player, func: &str, args: Vec<Value>) {
    let Some(window) = player.frame.content_window() else {
        tracing::error!(func, "frame has no content window");
        return;
    };

    let message = match CommandMessage::new(func, args).to_json() {
        Ok(message) => message,
        Err(e) => {
            tracing::error!(func, error = %e, "failed to serialize player command");
            return;
        }
    };

    tracing::debug!(%message, "posting player command");
    window.post_message(&message, TARGET_ORIGIN);
}

/// Seek the player to `seconds`, clamping negative values to zero
///
/// Succeeds as soon as the command is dispatched; the player sends no
/// acknowledgment.
pub fn seek_to(player: Option<&Player>, seconds: i64, allow_seek_ahead: bool) -> Result<String> {
    let player = player.ok_or(PlayerError::NoPlayer)?;
    let seconds = seconds.max(0);

    ensure_command_api_enabled(player);
    send_command(
        player,
        PlayerCommand::SeekTo.as_str(),
        vec![Value::from(seconds), Value::from(allow_seek_ahead)],
    );

    Ok(format!("Seeking to {} seconds", seconds))
}

/// Start playback
pub fn play_video(player: Option<&Player>) -> Result<String> {
    let player = player.ok_or(PlayerError::NoPlayer)?;
    send_command(player, PlayerCommand::PlayVideo.as_str(), Vec::new());
    Ok("Playing video".to_string())
}

/// Pause playback
pub fn pause_video(player: Option<&Player>) -> Result<String> {
    let player = player.ok_or(PlayerError::NoPlayer)?;
    send_command(player, PlayerCommand::PauseVideo.as_str(), Vec::new());
    Ok("Pausing video".to_string())
}
