//! Timestamp link parsing
//!
//! Recognizes link text such as `play 1:23:45` or `▶️ 5:30` and converts
//! between canonical seconds and `H:MM:SS` / `M:SS` display strings.
//!
//! The leading unit accepts one or two digits; every following unit must be
//! exactly two digits and in the range `0..=59`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A parsed playback timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTimestamp {
    /// Seconds since the start of the video
    pub seconds: u64,
    /// Display string, e.g. `12:34` or `1:23:45`
    pub formatted: String,
}

/// Full link grammar: trigger prefix followed by a time expression
fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^(?:play|▶\x{FE0F}|▶)\s*[0-9]{1,2}(?::[0-9]{2}){0,2}$").unwrap()
    })
}

fn prefix_regex() -> &'static Regex {
    static PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
    PREFIX_REGEX.get_or_init(|| Regex::new(r"(?i)^(?:play|▶\x{FE0F}|▶)\s*").unwrap())
}

fn hms_regex() -> &'static Regex {
    static HMS_REGEX: OnceLock<Regex> = OnceLock::new();
    HMS_REGEX.get_or_init(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2}):([0-9]{2})$").unwrap())
}

fn ms_regex() -> &'static Regex {
    static MS_REGEX: OnceLock<Regex> = OnceLock::new();
    MS_REGEX.get_or_init(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").unwrap())
}

fn s_regex() -> &'static Regex {
    static S_REGEX: OnceLock<Regex> = OnceLock::new();
    S_REGEX.get_or_init(|| Regex::new(r"^([0-9]+)$").unwrap())
}

/// Check whether link text encodes a timestamp
///
/// # Example
///
/// ```
/// use oneclick_core::timestamp::is_timestamp_link;
///
/// assert!(is_timestamp_link(Some("play 1:23:45")));
/// assert!(!is_timestamp_link(Some("12:34")));
/// assert!(!is_timestamp_link(None));
/// ```
pub fn is_timestamp_link(text: Option<&str>) -> bool {
    match text.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => link_regex().is_match(trimmed),
        _ => false,
    }
}

/// Strip the trigger prefix and parse the remaining time expression
pub fn extract_timestamp(text: &str) -> Option<ParsedTimestamp> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let time = prefix_regex().replace(trimmed, "");
    parse_time_string(&time)
}

/// Parse `SS`, `M:SS`/`MM:SS` or `H:MM:SS`/`HH:MM:SS`
///
/// Returns `None` for any other shape or when minutes or seconds overflow.
pub fn parse_time_string(text: &str) -> Option<ParsedTimestamp> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = hms_regex().captures(trimmed) {
        let hours: u64 = caps[1].parse().ok()?;
        let minutes: u64 = caps[2].parse().ok()?;
        let seconds: u64 = caps[3].parse().ok()?;

        if minutes >= 60 || seconds >= 60 {
            return None;
        }

        return Some(ParsedTimestamp {
            seconds: hours * 3600 + minutes * 60 + seconds,
            formatted: format!("{}:{:02}:{:02}", hours, minutes, seconds),
        });
    }

    if let Some(caps) = ms_regex().captures(trimmed) {
        let minutes: u64 = caps[1].parse().ok()?;
        let seconds: u64 = caps[2].parse().ok()?;

        if seconds >= 60 {
            return None;
        }

        return Some(ParsedTimestamp {
            seconds: minutes * 60 + seconds,
            formatted: format!("{}:{:02}", minutes, seconds),
        });
    }

    // Plain seconds keep the `0:SS` shape even past 59
    let caps = s_regex().captures(trimmed)?;
    let seconds: u64 = caps[1].parse().ok()?;
    Some(ParsedTimestamp { seconds, formatted: format!("0:{:02}", seconds) })
}

/// Format seconds as `H:MM:SS`, or `M:SS` when under an hour
///
/// Fractions are truncated. Negative and NaN input formats as `0:00`.
pub fn format_seconds(total_seconds: f64) -> String {
    if total_seconds.is_nan() || total_seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = total_seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_timestamp_link_play_prefix() {
        assert!(is_timestamp_link(Some("play 0:00")));
        assert!(is_timestamp_link(Some("play 12:34")));
        assert!(is_timestamp_link(Some("play 1:23:45")));
        assert!(is_timestamp_link(Some("Play 5:30")));
        assert!(is_timestamp_link(Some("PLAY 45")));
        assert!(is_timestamp_link(Some("  play 5:30  ")));
        assert!(is_timestamp_link(Some("play5:30")));
    }

    #[test]
    fn test_is_timestamp_link_glyph_prefix() {
        assert!(is_timestamp_link(Some("▶️ 0:00")));
        assert!(is_timestamp_link(Some("▶ 12:34")));
        assert!(is_timestamp_link(Some("▶️1:02:03")));
    }

    #[test]
    fn test_is_timestamp_link_rejects() {
        assert!(!is_timestamp_link(Some("click here")));
        assert!(!is_timestamp_link(Some("12:34")));
        assert!(!is_timestamp_link(Some("")));
        assert!(!is_timestamp_link(Some("   ")));
        assert!(!is_timestamp_link(None));
        assert!(!is_timestamp_link(Some("play")));
        assert!(!is_timestamp_link(Some("play 1:2")));
        assert!(!is_timestamp_link(Some("play 1:00:00:00")));
        assert!(!is_timestamp_link(Some("play 123:00")));
        assert!(!is_timestamp_link(Some("replay 1:00")));
    }

    #[test]
    fn test_extract_minutes_seconds() {
        let result = extract_timestamp("play 12:34").unwrap();
        assert_eq!(result.seconds, 754);
        assert_eq!(result.formatted, "12:34");
    }

    #[test]
    fn test_extract_hours_minutes_seconds() {
        let result = extract_timestamp("play 1:23:45").unwrap();
        assert_eq!(result.seconds, 5025);
        assert_eq!(result.formatted, "1:23:45");
    }

    #[test]
    fn test_extract_seconds_only() {
        let result = extract_timestamp("play 45").unwrap();
        assert_eq!(result.seconds, 45);
        assert_eq!(result.formatted, "0:45");
    }

    #[test]
    fn test_extract_glyph_prefix() {
        assert_eq!(extract_timestamp("▶️ 5:30").unwrap().seconds, 330);
        assert_eq!(extract_timestamp("▶ 5:30").unwrap().seconds, 330);
        assert_eq!(extract_timestamp("PLAY 5:30").unwrap().seconds, 330);
    }

    #[test]
    fn test_extract_invalid() {
        assert!(extract_timestamp("").is_none());
        assert!(extract_timestamp("invalid").is_none());
        assert!(extract_timestamp("play 0:60").is_none());
        assert!(extract_timestamp("play").is_none());
    }

    #[test]
    fn test_parse_zero() {
        assert_eq!(parse_time_string("0:00").unwrap().seconds, 0);
    }

    #[test]
    fn test_parse_minutes_seconds() {
        assert_eq!(parse_time_string("12:34").unwrap().seconds, 754);
        assert_eq!(parse_time_string("1:30").unwrap().seconds, 90);
        assert_eq!(parse_time_string("59:59").unwrap().seconds, 3599);
        assert_eq!(parse_time_string("05:07").unwrap().formatted, "5:07");
    }

    #[test]
    fn test_parse_hours_minutes_seconds() {
        assert_eq!(parse_time_string("1:00:00").unwrap().seconds, 3600);
        assert_eq!(parse_time_string("2:30:15").unwrap().seconds, 9015);
        assert_eq!(parse_time_string("02:30:15").unwrap().formatted, "2:30:15");
    }

    #[test]
    fn test_parse_overflow_rejected() {
        assert!(parse_time_string("0:60").is_none());
        assert!(parse_time_string("0:99").is_none());
        assert!(parse_time_string("1:60:00").is_none());
        assert!(parse_time_string("1:00:60").is_none());
    }

    #[test]
    fn test_parse_bad_shapes() {
        assert!(parse_time_string("").is_none());
        assert!(parse_time_string("1:2").is_none());
        assert!(parse_time_string("123:00").is_none());
        assert!(parse_time_string("1:00:00:00").is_none());
        assert!(parse_time_string("1.30").is_none());
        assert!(parse_time_string("1:3a").is_none());
        assert!(parse_time_string("-5").is_none());
        assert!(parse_time_string("99999999999999999999999").is_none());
    }

    #[test]
    fn test_parse_plain_seconds_keeps_shape() {
        let result = parse_time_string("90").unwrap();
        assert_eq!(result.seconds, 90);
        assert_eq!(result.formatted, "0:90");
        assert_eq!(parse_time_string("7").unwrap().formatted, "0:07");
    }

    #[test]
    fn test_format_seconds_only() {
        assert_eq!(format_seconds(0.0), "0:00");
        assert_eq!(format_seconds(30.0), "0:30");
        assert_eq!(format_seconds(59.0), "0:59");
    }

    #[test]
    fn test_format_minutes_seconds() {
        assert_eq!(format_seconds(60.0), "1:00");
        assert_eq!(format_seconds(90.0), "1:30");
        assert_eq!(format_seconds(754.0), "12:34");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_seconds(3600.0), "1:00:00");
        assert_eq!(format_seconds(5025.0), "1:23:45");
        assert_eq!(format_seconds(7325.0), "2:02:05");
    }

    #[test]
    fn test_format_negative_and_fractional() {
        assert_eq!(format_seconds(-10.0), "0:00");
        assert_eq!(format_seconds(f64::NAN), "0:00");
        assert_eq!(format_seconds(59.99), "0:59");
        assert_eq!(format_seconds(3599.9), "59:59");
    }

    #[test]
    fn test_canonical_strings_reproduce() {
        for s in ["12:34", "1:23:45", "0:05", "10:00:00", "59:59"] {
            let parsed = parse_time_string(s).unwrap();
            assert_eq!(format_seconds(parsed.seconds as f64), s);
        }
    }

    #[test]
    fn test_seconds_round_trip_through_format() {
        for h in [0u64, 1, 9, 23] {
            for m in [0u64, 1, 30, 59] {
                for sec in [0u64, 7, 59] {
                    let s = format!("{}:{:02}:{:02}", h, m, sec);
                    let parsed = parse_time_string(&s).unwrap();
                    let reparsed = parse_time_string(&format_seconds(parsed.seconds as f64)).unwrap();
                    assert_eq!(reparsed.seconds, parsed.seconds, "round trip of {}", s);
                }
            }
        }
    }
}
