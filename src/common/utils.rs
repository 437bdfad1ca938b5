//! Utility functions for minibid

use std::time::Duration;

/// Parse duration string (e.g., "500ms", "30s", "5m", "1h", "7d").
/// A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> crate::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(crate::Error::InvalidConfig("empty duration".into()));
    }

    let split = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    let (num_str, unit) = s.split_at(split);

    let num: u64 = num_str
        .parse()
        .map_err(|_| crate::Error::InvalidConfig(format!("invalid duration: {}", s)))?;

    let duration = match unit {
        "ms" => Duration::from_millis(num),
        "" | "s" => Duration::from_secs(num),
        "m" => Duration::from_secs(num * 60),
        "h" => Duration::from_secs(num * 3600),
        "d" => Duration::from_secs(num * 86400),
        _ => {
            return Err(crate::Error::InvalidConfig(format!(
                "unknown duration unit: {}",
                unit
            )))
        }
    };

    Ok(duration)
}

/// Truncate a wire amount toward zero. Out-of-range values saturate.
pub fn truncate_amount(amount: f64) -> i64 {
    amount.trunc() as i64
}

/// Whole seconds left until `total` has elapsed; negative once overdue.
pub fn seconds_remaining(total: Duration, elapsed: Duration) -> i64 {
    total.as_secs() as i64 - elapsed.as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("100").unwrap(), Duration::from_secs(100));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("7d").unwrap(), Duration::from_secs(604800));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("s").is_err());
    }

    #[test]
    fn test_truncate_amount() {
        assert_eq!(truncate_amount(150.0), 150);
        assert_eq!(truncate_amount(150.99), 150);
        assert_eq!(truncate_amount(-0.5), 0);
        assert_eq!(truncate_amount(-3.7), -3);
        assert_eq!(truncate_amount(1e30), i64::MAX);
    }

    #[test]
    fn test_seconds_remaining() {
        let total = Duration::from_secs(100);
        assert_eq!(seconds_remaining(total, Duration::from_millis(0)), 100);
        assert_eq!(seconds_remaining(total, Duration::from_millis(1999)), 99);
        assert_eq!(seconds_remaining(total, Duration::from_secs(103)), -3);
    }
}
