// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Time display formatting.

/// Format seconds as `m:ss`, flooring to whole seconds.
pub fn format_time(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// `current / total` as shown next to the play button.
pub fn format_time_display(current: f64, total: f64) -> String {
    format!("{} / {}", format_time(current), format_time(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_floors() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(7.99), "0:07");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(125.4), "2:05");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn test_format_time_display() {
        assert_eq!(format_time_display(7.0, 30.0), "0:07 / 0:30");
    }
}
