//! Music commands, all backed by the external Lavalink audio node.

pub mod nowplaying;
pub mod pause;
pub mod play;
pub mod queue;
pub mod resume;
pub mod shuffle;
pub mod skip;
pub mod stop;
pub mod volume;

pub mod utils;

use std::time::Duration;

/// Format a duration into a human-readable string (e.g., "3:45" or "1:23:45")
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Format a Lavalink track length (milliseconds) for display.
pub fn format_millis(millis: u64) -> String {
    format_duration(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(0, "0:00"; "zero")]
    #[test_case(59, "0:59"; "under a minute")]
    #[test_case(225, "3:45"; "minutes and seconds")]
    #[test_case(3600, "1:00:00"; "exactly one hour")]
    #[test_case(5025, "1:23:45"; "hours minutes seconds")]
    fn format_duration_cases(seconds: u64, expected: &str) {
        assert_eq!(format_duration(Duration::from_secs(seconds)), expected);
    }

    #[test]
    fn format_millis_truncates_sub_second_precision() {
        assert_eq!(format_millis(225_900), "3:45");
    }
}
