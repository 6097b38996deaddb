//! Tracing subscriber setup.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over everything; otherwise each `-v` raises the level
/// above the configured one (`-v` debug, `-vv` trace).
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a subscriber is
/// already installed.
pub fn init_logging(verbosity: u8, cfg: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbosity, cfg)))
        .map_err(|e| anyhow!("invalid log filter: {e}"))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match cfg.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

fn default_directive(verbosity: u8, cfg: &LoggingConfig) -> &str {
    match verbosity {
        0 => &cfg.level,
        1 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        let cfg = LoggingConfig {
            level: "warn,authn_gate=info".to_owned(),
            ..LoggingConfig::default()
        };

        assert_eq!(default_directive(0, &cfg), "warn,authn_gate=info");
        assert_eq!(default_directive(1, &cfg), "debug");
        assert_eq!(default_directive(4, &cfg), "trace");
    }

    #[test]
    fn json_subscriber_installs_once() {
        let cfg = LoggingConfig {
            format: LogFormat::Json,
            ..LoggingConfig::default()
        };

        assert!(init_logging(0, &cfg).is_ok());
        assert!(init_logging(0, &cfg).is_err());
    }
}
