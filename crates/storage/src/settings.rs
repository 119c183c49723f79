//! User settings for timestamp link handling
//!
//! This module defines the settings value handed to the click handler.
//! Every field falls back to its default when missing from the stored data,
//! so a partially written settings file still loads.

use serde::{Deserialize, Serialize};

/// Settings that control what happens after a timestamp link is clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneClickSettings {
    /// Display a notice when successfully jumping to a timestamp
    #[serde(default = "default_true")]
    pub show_success_notice: bool,

    /// Start playing the video after jumping to a timestamp
    #[serde(default = "default_true")]
    pub auto_play: bool,
}

impl Default for OneClickSettings {
    fn default() -> Self {
        Self { show_success_notice: true, auto_play: true }
    }
}

impl OneClickSettings {
    /// Set whether a success notice is shown
    pub fn with_success_notice(mut self, enabled: bool) -> Self {
        self.show_success_notice = enabled;
        self
    }

    /// Set whether playback starts after a seek
    pub fn with_auto_play(mut self, enabled: bool) -> Self {
        self.auto_play = enabled;
        self
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = OneClickSettings::default();
        assert!(settings.show_success_notice);
        assert!(settings.auto_play);
    }

    #[test]
    fn test_settings_builders() {
        let settings = OneClickSettings::default().with_auto_play(false).with_success_notice(false);
        assert!(!settings.auto_play);
        assert!(!settings.show_success_notice);
    }

    #[test]
    fn test_settings_camel_case_keys() {
        let json = serde_json::to_string(&OneClickSettings::default()).unwrap();
        assert!(json.contains("showSuccessNotice"));
        assert!(json.contains("autoPlay"));
    }

    #[test]
    fn test_settings_partial_data_merges_defaults() {
        let parsed: OneClickSettings = serde_json::from_str(r#"{"autoPlay":false}"#).unwrap();
        assert!(!parsed.auto_play);
        assert!(parsed.show_success_notice);

        let parsed: OneClickSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, OneClickSettings::default());
    }

    #[test]
    fn test_settings_ignores_unknown_keys() {
        let parsed: OneClickSettings =
            serde_json::from_str(r#"{"showSuccessNotice":false,"legacy":1}"#).unwrap();
        assert!(!parsed.show_success_notice);
        assert!(parsed.auto_play);
    }
}
