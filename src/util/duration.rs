//! Timestamps entered by the user in the `MM:SS` format.
//!
//! Minutes are not capped at 59, so an hour and a half is written as `90:00`.

use crate::prelude::*;
use std::time::Duration;

pub(crate) fn parse(arg: &str) -> Result<Duration> {
    let segments: Vec<_> = arg.trim().split(':').collect();

    let [minutes, seconds] = segments.as_slice() else {
        bail!("Invalid format `{arg}`. Please use MM:SS");
    };

    let number = |segment: &str| {
        segment
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Invalid time `{arg}`. Please use numbers only"))
    };

    let (minutes, seconds) = (number(*minutes)?, number(*seconds)?);

    let Some(seconds) = minutes
        .checked_mul(60)
        .and_then(|minutes| minutes.checked_add(seconds))
    else {
        bail!("Time `{arg}` is out of range");
    };

    Ok(Duration::from_secs(seconds))
}

/// Renders the duration as `MM:SS` dropping the sub-second part
pub(crate) fn format(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Renders the duration as seconds the way ffmpeg accepts them in
/// time options like `-ss` and `-to`
pub(crate) fn ffmpeg_secs(duration: Duration) -> String {
    duration.as_secs_f64().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{expect, Expect};

    fn assert_parse(arg: &str, expected: Expect) {
        let actual = parse(arg)
            .map(|duration| format!("{duration:?}"))
            .unwrap_or_else(|err| format!("{err:#}"));

        expected.assert_eq(&actual);
    }

    #[test]
    fn smoke_parse() {
        assert_parse("00:00", expect!["0ns"]);
        assert_parse("01:30", expect!["90s"]);
        assert_parse("1:5", expect!["65s"]);
        assert_parse(" 12:45 ", expect!["765s"]);
    }

    #[test]
    fn minutes_are_not_capped() {
        assert_parse("90:00", expect!["5400s"]);
        assert_parse("125:30", expect!["7530s"]);
        assert_parse("1:75", expect!["135s"]);
    }

    #[test]
    fn error_parse() {
        assert_parse("90", expect!["Invalid format `90`. Please use MM:SS"]);
        assert_parse(
            "01:02:03",
            expect!["Invalid format `01:02:03`. Please use MM:SS"],
        );
        assert_parse(
            "ab:cd",
            expect!["Invalid time `ab:cd`. Please use numbers only: invalid digit found in string"],
        );
        assert_parse(
            "-1:00",
            expect!["Invalid time `-1:00`. Please use numbers only: invalid digit found in string"],
        );
        assert_parse(
            "1.5:00",
            expect!["Invalid time `1.5:00`. Please use numbers only: invalid digit found in string"],
        );
        assert_parse(
            "307445734561825861:00",
            expect!["Time `307445734561825861:00` is out of range"],
        );
        assert_parse(
            "1:18446744073709551615",
            expect!["Time `1:18446744073709551615` is out of range"],
        );
        assert_parse(
            "307445734561825861:xx",
            expect!["Invalid time `307445734561825861:xx`. Please use numbers only: invalid digit found in string"],
        );
        assert_parse(
            ":",
            expect!["Invalid time `:`. Please use numbers only: cannot parse integer from empty string"],
        );
    }

    #[test]
    fn smoke_format() {
        assert_eq!(format(Duration::from_secs(0)), "00:00");
        assert_eq!(format(Duration::from_secs(5400)), "90:00");
        assert_eq!(format(Duration::from_secs_f64(65.9)), "01:05");
    }

    #[test]
    fn ffmpeg_secs_is_plain_decimal() {
        assert_eq!(ffmpeg_secs(Duration::from_secs(90)), "90");
        assert_eq!(ffmpeg_secs(Duration::from_millis(1500)), "1.5");
    }
}
