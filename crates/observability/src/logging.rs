//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the output format (`json` or `pretty`).
pub const ENV_LOG_FORMAT: &str = "STOCKROOM_LOG_FORMAT";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    /// Parse a format name; anything unrecognized falls back to JSON.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Format comes from `STOCKROOM_LOG_FORMAT`, filtering from `RUST_LOG`
/// (default `info`). Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let format = std::env::var(ENV_LOG_FORMAT)
        .map(|v| LogFormat::from_name(&v))
        .unwrap_or_default();
    init_with_format(format);
}

pub fn init_with_format(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so command output on stdout stays machine-readable.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init()
            .is_ok(),
        LogFormat::Pretty => builder.try_init().is_ok(),
    };

    if installed {
        tracing::debug!(?format, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!(LogFormat::from_name("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_name(" TEXT "), LogFormat::Pretty);
        assert_eq!(LogFormat::from_name("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_name("xml"), LogFormat::Json);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_with_format(LogFormat::Pretty);
        init_with_format(LogFormat::Json);
    }
}
