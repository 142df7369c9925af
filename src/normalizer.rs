use crate::config::{Field, Record};
use chrono::{Duration, LocalResult, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone};
use chrono_tz::America::New_York;
use once_cell::sync::Lazy;
use regex::Regex;

/// Elapsed time written as `h:mm:ss.SSS`.
static ELAPSED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})\.(\d{1,3})$").expect("valid regex"));

type Rule = fn(&Record, &str) -> Option<String>;

/// Per-field rewrite rules. Fields without an entry pass through untouched.
const RULES: [(Field, Rule); 4] = [
    (Field::Timestamp, reformat_timestamp),
    (Field::Zipcode, pad_zipcode),
    (Field::FullName, uppercase_name),
    (Field::TotalDuration, sum_durations),
];

pub fn normalize(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .map(|mut r| {
            normalize_record(&mut r);
            r
        })
        .collect()
}

/// Apply every rule whose field the record carries. A rule returning `None`
/// leaves the field as it came in; that covers both "nothing to rewrite" and
/// text the rule cannot parse, which passes through silently.
pub fn normalize_record(record: &mut Record) {
    for (field, rule) in RULES {
        let Some(current) = record.get(field).map(str::to_owned) else {
            continue;
        };
        if let Some(value) = rule(record, &current) {
            record.set(field, value);
        }
    }
}

/// `4/1/11 11:00:00 AM` is America/New_York wall-clock time. Re-emit it as
/// ISO-8601 keeping the local offset in effect on that date, not UTC.
fn reformat_timestamp(_record: &Record, value: &str) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(value, "%m/%d/%y %I:%M:%S %p").ok()?;
    let eastern = match New_York.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        // fall-back repeats an hour; take the first occurrence
        LocalResult::Ambiguous(first, _) => first,
        // spring-forward gap, no such wall-clock instant
        LocalResult::None => return None,
    };
    Some(eastern.to_rfc3339_opts(SecondsFormat::Millis, false))
}

fn pad_zipcode(_record: &Record, value: &str) -> Option<String> {
    if value.len() >= 5 {
        return None;
    }
    Some(format!("{value:0>5}"))
}

fn uppercase_name(_record: &Record, value: &str) -> Option<String> {
    Some(value.to_uppercase())
}

/// Overwrite totalDuration with fooDuration + barDuration. fooDuration is
/// read as a time of day and barDuration as an elapsed duration, both from
/// the same `h:mm:ss.SSS` shape; the sum wraps at midnight and is formatted
/// with a padded 12-hour hour field.
fn sum_durations(record: &Record, _current: &str) -> Option<String> {
    let start = NaiveTime::parse_from_str(record.get(Field::FooDuration)?, "%H:%M:%S%.f").ok()?;
    let elapsed = parse_elapsed(record.get(Field::BarDuration)?)?;
    Some((start + elapsed).format("%I:%M:%S%.3f").to_string())
}

fn parse_elapsed(value: &str) -> Option<Duration> {
    let caps = ELAPSED_RE.captures(value)?;
    let hours: i64 = caps[1].parse().ok()?;
    let minutes: i64 = caps[2].parse().ok()?;
    let seconds: i64 = caps[3].parse().ok()?;
    // fractional seconds: ".1" means 100ms
    let millis: i64 = format!("{:0<3}", &caps[4]).parse().ok()?;
    Some(Duration::milliseconds(
        ((hours * 60 + minutes) * 60 + seconds) * 1000 + millis,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record {
            timestamp: Some("4/1/11 11:00:00 AM".into()),
            address: Some("123 4th St, Anywhere, AA".into()),
            zipcode: Some("94121".into()),
            full_name: Some("Monkey Alberto".into()),
            foo_duration: Some("1:23:32.123".into()),
            bar_duration: Some("1:32:33.123".into()),
            total_duration: Some("zzsasdfa".into()),
            notes: Some("I am the very model of a modern major general".into()),
        }
    }

    #[test]
    fn timestamp_keeps_daylight_offset() {
        let mut r = sample();
        normalize_record(&mut r);
        assert_eq!(r.timestamp.as_deref(), Some("2011-04-01T11:00:00.000-04:00"));
    }

    #[test]
    fn timestamp_keeps_standard_offset_in_winter() {
        let mut r = sample();
        r.timestamp = Some("12/31/16 11:59:59 PM".into());
        normalize_record(&mut r);
        assert_eq!(r.timestamp.as_deref(), Some("2016-12-31T23:59:59.000-05:00"));
    }

    #[test]
    fn unparsable_timestamp_passes_through() {
        let mut r = sample();
        r.timestamp = Some("not a date".into());
        normalize_record(&mut r);
        assert_eq!(r.timestamp.as_deref(), Some("not a date"));
    }

    #[test]
    fn short_zipcodes_are_zero_padded() {
        for (input, expected) in [
            ("1", "00001"),
            ("42", "00042"),
            ("941", "00941"),
            ("9412", "09412"),
            ("94121", "94121"),
        ] {
            let mut r = sample();
            r.zipcode = Some(input.into());
            normalize_record(&mut r);
            assert_eq!(r.zipcode.as_deref(), Some(expected), "zip {input}");
        }
    }

    #[test]
    fn long_zipcodes_are_never_truncated() {
        let mut r = sample();
        r.zipcode = Some("941211234".into());
        normalize_record(&mut r);
        assert_eq!(r.zipcode.as_deref(), Some("941211234"));
    }

    #[test]
    fn full_name_is_uppercased() {
        let mut r = sample();
        r.full_name = Some("Mary-Jane o'Neil".into());
        normalize_record(&mut r);
        assert_eq!(r.full_name.as_deref(), Some("MARY-JANE O'NEIL"));
    }

    #[test]
    fn total_duration_is_the_sum_of_foo_and_bar() {
        let mut r = sample();
        normalize_record(&mut r);
        assert_eq!(r.total_duration.as_deref(), Some("02:56:05.246"));
        // the inputs themselves stay untouched
        assert_eq!(r.foo_duration.as_deref(), Some("1:23:32.123"));
        assert_eq!(r.bar_duration.as_deref(), Some("1:32:33.123"));
    }

    #[test]
    fn total_duration_hour_field_is_twelve_hour() {
        let mut r = sample();
        r.foo_duration = Some("11:00:00.000".into());
        r.bar_duration = Some("3:00:00.000".into());
        normalize_record(&mut r);
        assert_eq!(r.total_duration.as_deref(), Some("02:00:00.000"));
    }

    #[test]
    fn unparsable_durations_leave_total_unchanged() {
        let mut r = sample();
        r.foo_duration = Some("zzsasdfa".into());
        normalize_record(&mut r);
        assert_eq!(r.total_duration.as_deref(), Some("zzsasdfa"));
    }

    #[test]
    fn missing_fields_are_a_no_op() {
        let mut r = Record::default();
        normalize_record(&mut r);
        assert_eq!(r, Record::default());
    }

    #[test]
    fn normalize_maps_every_record() {
        let records = normalize(vec![sample(), sample()]);
        assert_eq!(records.len(), 2);
        for r in &records {
            assert_eq!(r.full_name.as_deref(), Some("MONKEY ALBERTO"));
            assert_eq!(r.zipcode.as_deref(), Some("94121"));
        }
    }
}
