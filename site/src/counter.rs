//! Stat counter formatting
//!
//! A counter text such as `1.5K+` or `$2,400` is split into a prefix, a
//! number and a suffix. The number is held as integer units at the text's
//! own precision, so every frame renders with the same decimals, grouping
//! and suffix as the original and the last frame reproduces it exactly.

use std::time::Duration;

/// Time a counter takes to reach its target
pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterFormat {
    original: String,
    prefix: String,
    suffix: String,
    target_units: u64,
    decimals: usize,
    /// `10^decimals`, the units per whole number
    divisor: u64,
    grouped: bool,
}

impl CounterFormat {
    /// Parse a counter text; `None` when it holds no digits or more
    /// precision than integer units can carry
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let start = text.find(|c: char| c.is_ascii_digit())?;
        let bytes = text.as_bytes();

        let mut end = start;
        let mut seen_dot = false;
        while end < bytes.len() {
            let c = bytes[end];
            let next_is_digit = bytes.get(end + 1).is_some_and(u8::is_ascii_digit);
            if c.is_ascii_digit() || (c == b',' && !seen_dot && next_is_digit) {
                end += 1;
            } else if c == b'.' && !seen_dot && next_is_digit {
                seen_dot = true;
                end += 1;
            } else {
                break;
            }
        }

        let number = &text[start..end];
        let decimals = number.split_once('.').map_or(0, |(_, frac)| frac.len());
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        let target_units = digits.parse().ok()?;
        let divisor = u32::try_from(decimals).ok().and_then(|d| 10u64.checked_pow(d))?;

        Some(Self {
            original: text.to_string(),
            prefix: text[..start].to_string(),
            suffix: text[end..].to_string(),
            target_units,
            decimals,
            divisor,
            grouped: number.contains(','),
        })
    }

    pub fn target_units(&self) -> u64 {
        self.target_units
    }

    /// Text for a progress in `0.0..=1.0`
    pub fn frame(&self, progress: f64) -> String {
        if progress >= 1.0 {
            return self.original.clone();
        }
        let progress = progress.max(0.0);
        let units = ((progress * self.target_units as f64).floor() as u64).min(self.target_units);
        format!("{}{}{}", self.prefix, self.render(units), self.suffix)
    }

    fn render(&self, units: u64) -> String {
        let divisor = self.divisor;
        let whole = units / divisor;
        let whole = if self.grouped {
            group_thousands(whole)
        } else {
            whole.to_string()
        };
        if self.decimals == 0 {
            whole
        } else {
            format!("{}.{:0width$}", whole, units % divisor, width = self.decimals)
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// A running counter animation
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    pub format: CounterFormat,
    pub started: Duration,
}

impl CounterAnimation {
    pub fn new(format: CounterFormat, started: Duration) -> Self {
        Self { format, started }
    }

    pub fn progress(&self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f64() / COUNTER_DURATION.as_secs_f64()).min(1.0)
    }

    /// Text for the frame at `now` and whether the animation finished
    pub fn frame(&self, now: Duration) -> (String, bool) {
        let progress = self.progress(now);
        (self.format.frame(progress), progress >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scaled_suffix() {
        let format = CounterFormat::parse("1.5K+").unwrap();
        assert_eq!(format.target_units(), 15);
        assert_eq!(format.frame(0.0), "0.0K+");
        assert_eq!(format.frame(0.5), "0.7K+");
        assert_eq!(format.frame(1.0), "1.5K+");
    }

    #[test]
    fn test_counter_frames_are_monotonic_and_end_exact() {
        let animation = CounterAnimation::new(CounterFormat::parse("1.5K+").unwrap(), Duration::from_millis(100));
        let mut last = -1.0;
        let mut final_text = String::new();
        for step in 0..=130 {
            let (text, done) = animation.frame(Duration::from_millis(100 + step * 16));
            let value: f64 = text.trim_end_matches("K+").parse().unwrap();
            assert!(value >= last, "{} after {}", value, last);
            last = value;
            final_text = text;
            if done {
                break;
            }
        }
        assert_eq!(final_text, "1.5K+");
    }

    #[test]
    fn test_grouped_and_prefixed() {
        let format = CounterFormat::parse("$12,500").unwrap();
        assert_eq!(format.frame(0.5), "$6,250");
        assert_eq!(format.frame(0.08), "$1,000");
        assert_eq!(format.frame(0.0), "$0");
        assert_eq!(format.frame(1.0), "$12,500");
    }

    #[test]
    fn test_plain_and_units() {
        assert_eq!(CounterFormat::parse("50+").unwrap().frame(0.5), "25+");
        assert_eq!(CounterFormat::parse("99.9%").unwrap().frame(0.5), "49.9%");
        assert_eq!(CounterFormat::parse("24/7").unwrap().frame(0.5), "12/7");
        assert_eq!(CounterFormat::parse("2M").unwrap().frame(0.75), "1M");
    }

    #[test]
    fn test_no_digits() {
        assert!(CounterFormat::parse("Global").is_none());
        assert!(CounterFormat::parse("").is_none());
    }

    #[test]
    fn test_precision_beyond_integer_units() {
        assert!(CounterFormat::parse("0.00000000000000000001%").is_none());
        let finest = CounterFormat::parse("0.0000000000000000001%").unwrap();
        assert_eq!(finest.frame(0.5), "0.0000000000000000000%");
        assert_eq!(finest.frame(1.0), "0.0000000000000000001%");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
