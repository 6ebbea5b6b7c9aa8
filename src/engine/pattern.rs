//! Date patterns in the conventional `yyyyMMdd_HHmm` letter notation
//!
//! Patterns are translated once into a chrono format string. Supported
//! letters: `y` (year), `M` (month), `d` (day), `H` (hour 0-23), `h` (hour
//! 1-12), `m` (minute), `s` (second), `S` (fraction, 3/6/9 digits), `a`
//! (AM/PM). Text between single quotes is literal, `''` is a quote.
//!
//! Fields a pattern leaves out take their epoch defaults when parsing:
//! year 1970, January, day 1, midnight, AM.

use std::fmt;

use chrono::format::{Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, TimeZone};

use super::error::{LookupError, LookupResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    pattern: String,
    chrono_format: String,
    fields: Fields,
}

/// Which calendar and clock fields a pattern carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Fields {
    year: bool,
    month: bool,
    day: bool,
    hour: bool,
    hour12: bool,
    am_pm: bool,
    minute: bool,
}

impl Fields {
    fn record(&mut self, letter: char) {
        match letter {
            'y' => self.year = true,
            'M' => self.month = true,
            'd' => self.day = true,
            'H' => self.hour = true,
            'h' => self.hour12 = true,
            'a' => self.am_pm = true,
            'm' => self.minute = true,
            _ => {}
        }
    }

    /// Set every field the pattern does not carry to its default
    fn fill_missing(&self, parsed: &mut Parsed) -> chrono::format::ParseResult<()> {
        if !self.year {
            parsed.set_year(1970)?;
        }
        if !self.month {
            parsed.set_month(1)?;
        }
        if !self.day {
            parsed.set_day(1)?;
        }
        if !self.hour {
            match (self.hour12, self.am_pm) {
                (true, false) => parsed.set_ampm(false)?,
                (false, true) => parsed.set_hour12(12)?,
                (false, false) => parsed.set_hour(0)?,
                (true, true) => {}
            }
        }
        if !self.minute {
            parsed.set_minute(0)?;
        }
        Ok(())
    }
}

impl Default for DatePattern {
    fn default() -> Self {
        Self {
            pattern: Self::DEFAULT.to_string(),
            chrono_format: "%Y%m%d_%H%M".to_string(),
            fields: Fields {
                year: true,
                month: true,
                day: true,
                hour: true,
                minute: true,
                ..Fields::default()
            },
        }
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl DatePattern {
    pub const DEFAULT: &'static str = "yyyyMMdd_HHmm";

    pub fn parse(pattern: &str) -> LookupResult<Self> {
        if pattern.is_empty() {
            return Err(LookupError::invalid_argument("date pattern is empty"));
        }

        let mut chrono_format = String::with_capacity(pattern.len() * 2);
        let mut fields = Fields::default();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    chrono_format.push('\'');
                    continue;
                }
                let mut closed = false;
                while let Some(quoted) = chars.next() {
                    if quoted == '\'' {
                        if chars.peek() == Some(&'\'') {
                            chars.next();
                            chrono_format.push('\'');
                            continue;
                        }
                        closed = true;
                        break;
                    }
                    push_literal(&mut chrono_format, quoted);
                }
                if !closed {
                    return Err(LookupError::invalid_argument(format!(
                        "unterminated quote in date pattern '{pattern}'"
                    )));
                }
                continue;
            }

            if !c.is_ascii_alphabetic() {
                push_literal(&mut chrono_format, c);
                continue;
            }

            let mut width = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                width += 1;
            }

            let specifier = match (c, width) {
                ('y', 2) => "%y",
                ('y', _) => "%Y",
                ('M', 1) => "%-m",
                ('M', 2) => "%m",
                ('M', 3) => "%b",
                ('M', _) => "%B",
                ('d', 1) => "%-d",
                ('d', _) => "%d",
                ('H', 1) => "%-H",
                ('H', _) => "%H",
                ('h', 1) => "%-I",
                ('h', _) => "%I",
                ('m', 1) => "%-M",
                ('m', _) => "%M",
                ('s', 1) => "%-S",
                ('s', _) => "%S",
                ('S', 3) => "%3f",
                ('S', 6) => "%6f",
                ('S', 9) => "%9f",
                ('a', 1) => "%p",
                _ => {
                    return Err(LookupError::invalid_argument(format!(
                        "unsupported field '{}' in date pattern '{pattern}'",
                        c.to_string().repeat(width)
                    )));
                }
            };

            fields.record(c);
            chrono_format.push_str(specifier);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            chrono_format,
            fields,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Parse a wall-clock datetime, defaulting the fields the pattern lacks
    pub fn parse_naive(&self, value: &str) -> LookupResult<NaiveDateTime> {
        let mut parsed = Parsed::new();
        chrono::format::parse(&mut parsed, value, StrftimeItems::new(&self.chrono_format))
            .and_then(|()| self.fields.fill_missing(&mut parsed))
            .and_then(|()| parsed.to_naive_datetime_with_offset(0))
            .map_err(|e| {
                LookupError::unparsable_date(
                    value,
                    format!("expected pattern {} ({e})", self.pattern),
                )
            })
    }

    #[must_use]
    pub fn format<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        datetime.format(&self.chrono_format).to_string()
    }
}

fn push_literal(format: &mut String, c: char) {
    if c == '%' {
        format.push_str("%%");
    } else {
        format.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};
    use rstest::rstest;

    #[test]
    fn test_default_matches_parsed_default() {
        assert_eq!(
            DatePattern::default(),
            DatePattern::parse(DatePattern::DEFAULT).unwrap()
        );
    }

    #[rstest]
    #[case("yyyyMMdd_HHmm", "20160606_1627")]
    #[case("yyyy-MM-dd'T'HH:mm:ss", "2016-06-06T16:27:05")]
    #[case("dd/MM/yy HH:mm", "06/06/16 16:27")]
    #[case("yyyy-MM-dd HH:mm:ss.SSS", "2016-06-06 16:27:05.250")]
    #[case("dd MMM yyyy h:mm a", "06 Jun 2016 4:27 PM")]
    fn test_parse_and_format_round_trip(#[case] pattern: &str, #[case] value: &str) {
        let pattern = DatePattern::parse(pattern).unwrap();
        let naive = pattern.parse_naive(value).unwrap();
        assert_eq!(naive.hour(), 16);
        assert_eq!(naive.minute(), 27);
        assert_eq!(pattern.format(&Utc.from_utc_datetime(&naive)), value);
    }

    #[test]
    fn test_date_only_pattern_is_midnight() {
        let pattern = DatePattern::parse("yyyyMMdd").unwrap();
        let naive = pattern.parse_naive("20161225").unwrap();
        assert_eq!(naive.to_string(), "2016-12-25 00:00:00");
    }

    #[rstest]
    #[case("yyyyMM", "201606", "2016-06-01 00:00:00")]
    #[case("HH:mm", "16:27", "1970-01-01 16:27:00")]
    #[case("hh:mm", "04:27", "1970-01-01 04:27:00")]
    #[case("MMM yyyy a", "Jun 2016 PM", "2016-06-01 12:00:00")]
    #[case("yy", "16", "2016-01-01 00:00:00")]
    fn test_missing_fields_take_defaults(
        #[case] pattern: &str,
        #[case] value: &str,
        #[case] expected: &str,
    ) {
        let pattern = DatePattern::parse(pattern).unwrap();
        let naive = pattern.parse_naive(value).unwrap();
        assert_eq!(naive.to_string(), expected);
        assert_eq!(pattern.format(&Utc.from_utc_datetime(&naive)), value);
    }

    #[test]
    fn test_quoted_literals() {
        let pattern = DatePattern::parse("yyyy-MM-dd 'at' HH'h'mm '100%' ''").unwrap();
        let naive = pattern.parse_naive("2016-06-06 at 16h27 100% '").unwrap();
        assert_eq!(naive.to_string(), "2016-06-06 16:27:00");
        assert_eq!(
            pattern.format(&Utc.from_utc_datetime(&naive)),
            "2016-06-06 at 16h27 100% '"
        );
        assert_eq!(pattern.as_str(), "yyyy-MM-dd 'at' HH'h'mm '100%' ''");
    }

    #[rstest]
    #[case("")]
    #[case("yyyyMMdd QQ")]
    #[case("yyyy-MM-dd 'unterminated")]
    #[case("HH:mm:ss.SS")]
    fn test_invalid_patterns(#[case] pattern: &str) {
        assert!(matches!(
            DatePattern::parse(pattern),
            Err(LookupError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_value_not_matching_pattern() {
        let pattern = DatePattern::default();
        let err = pattern.parse_naive("2016-06-06 16:27").unwrap_err();
        assert!(matches!(err, LookupError::UnparsableDate { .. }));
    }
}
