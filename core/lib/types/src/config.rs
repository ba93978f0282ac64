use std::time::Duration;

use crate::error::ConfigError;

/// Startup configuration for the revocation log server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Highest serial number the tree can address; determines tree height.
    pub max_certs: u64,
    /// Path to the PKCS#8 PEM private key used to sign log roots.
    pub key_path: String,
    /// Path to the PEM-encoded issuer certificate.
    pub cert_path: String,
    /// Maximum Merge Delay, as the raw flag string (e.g. `"24h"`).
    pub mmd: String,
}

/// Parses a duration string of the form `<number><unit>` where unit is one
/// of `ns`, `us`, `ms`, `s`, `m`, `h`. Unlike Go's `time.ParseDuration`, this
/// does not accept multiple components (e.g. `"1h30m"`) — the server's flag
/// usage text only ever advertises a single unit, so that's all this parses.
pub fn parse_mmd(raw: &str) -> Result<Duration, ConfigError> {
    let err = |reason: &str| ConfigError::BadDuration {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };

    let unit_start = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .ok_or_else(|| err("missing unit"))?;
    let (num, unit) = raw.split_at(unit_start);
    if num.is_empty() {
        return Err(err("missing numeric value"));
    }
    let value: f64 = num.parse().map_err(|_| err("invalid numeric value"))?;
    if value < 0.0 {
        return Err(err("duration must not be negative"));
    }

    let nanos_per_unit: f64 = match unit {
        "ns" => 1.0,
        "us" => 1_000.0,
        "ms" => 1_000_000.0,
        "s" => 1_000_000_000.0,
        "m" => 60.0 * 1_000_000_000.0,
        "h" => 3_600.0 * 1_000_000_000.0,
        other => return Err(err(&format!("unknown unit {other:?}, want one of ns|us|ms|s|m|h"))),
    };

    let nanos = value * nanos_per_unit;
    Ok(Duration::from_nanos(nanos as u64))
}

impl Config {
    /// Validates the configuration, returning the parsed MMD duration.
    pub fn validated_mmd(&self) -> Result<Duration, ConfigError> {
        if self.max_certs == 0 {
            return Err(ConfigError::MaxCertsZero);
        }
        parse_mmd(&self.mmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_unit() {
        assert_eq!(parse_mmd("1ns").unwrap(), Duration::from_nanos(1));
        assert_eq!(parse_mmd("2us").unwrap(), Duration::from_micros(2));
        assert_eq!(parse_mmd("3ms").unwrap(), Duration::from_millis(3));
        assert_eq!(parse_mmd("4s").unwrap(), Duration::from_secs(4));
        assert_eq!(parse_mmd("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_mmd("24h").unwrap(), Duration::from_secs(24 * 3600));
    }

    #[test]
    fn parses_fractional_values() {
        assert_eq!(parse_mmd("1.5s").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!(parse_mmd("5x").is_err());
    }

    #[test]
    fn rejects_missing_unit() {
        assert!(parse_mmd("5").is_err());
    }
}
