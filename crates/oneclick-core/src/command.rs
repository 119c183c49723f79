//! Player command wire format
//!
//! Embedded players accept JSON text of the form
//! `{"event":"command","func":"seekTo","args":[754,true]}` over the
//! cross-document messaging channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event name carried by every command message
pub const COMMAND_EVENT: &str = "command";

/// Target origin for posted commands (any origin)
pub const TARGET_ORIGIN: &str = "*";

/// Playback commands understood by the embedded player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerCommand {
    /// Seek to a position: args `[seconds, allowSeekAhead]`
    SeekTo,
    /// Start playback
    PlayVideo,
    /// Pause playback
    PauseVideo,
}

impl PlayerCommand {
    /// Function name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerCommand::SeekTo => "seekTo",
            PlayerCommand::PlayVideo => "playVideo",
            PlayerCommand::PauseVideo => "pauseVideo",
        }
    }
}

/// A single command payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandMessage {
    /// Always [`COMMAND_EVENT`]
    pub event: String,
    /// Player function to invoke
    pub func: String,
    /// Positional arguments
    pub args: Vec<Value>,
}

impl CommandMessage {
    /// Build a command for an arbitrary player function
    pub fn new(func: impl Into<String>, args: Vec<Value>) -> Self {
        Self { event: COMMAND_EVENT.to_string(), func: func.into(), args }
    }

    /// Build a message for a known command
    pub fn for_command(command: PlayerCommand, args: Vec<Value>) -> Self {
        Self::new(command.as_str(), args)
    }

    /// Serialize to the JSON text posted to the player
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_names() {
        assert_eq!(PlayerCommand::SeekTo.as_str(), "seekTo");
        assert_eq!(PlayerCommand::PlayVideo.as_str(), "playVideo");
        assert_eq!(PlayerCommand::PauseVideo.as_str(), "pauseVideo");
    }

    #[test]
    fn test_command_serde_matches_wire_names() {
        assert_eq!(serde_json::to_value(PlayerCommand::SeekTo).unwrap(), json!("seekTo"));
        assert_eq!(serde_json::to_value(PlayerCommand::PauseVideo).unwrap(), json!("pauseVideo"));
    }

    #[test]
    fn test_seek_message_wire_format() {
        let message = CommandMessage::for_command(PlayerCommand::SeekTo, vec![json!(754), json!(true)]);
        let text = message.to_json().unwrap();
        assert_eq!(text, r#"{"event":"command","func":"seekTo","args":[754,true]}"#);
    }

    #[test]
    fn test_zero_arg_message_has_empty_args() {
        let message = CommandMessage::for_command(PlayerCommand::PlayVideo, Vec::new());
        let value: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"event": "command", "func": "playVideo", "args": []}));
    }

    #[test]
    fn test_custom_function_name() {
        let message = CommandMessage::new("mute", Vec::new());
        assert_eq!(message.event, COMMAND_EVENT);
        assert_eq!(message.func, "mute");
    }
}
