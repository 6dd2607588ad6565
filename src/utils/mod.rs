pub mod build_info;

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor the config provides one.
pub const DEFAULT_LOG_FILTER: &str = "gastos=info";

/// Builds the subscriber filter. `RUST_LOG` wins, then `directive`, then the default.
pub fn log_filter(directive: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    directive
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global fmt subscriber. Does nothing if one is already set.
pub fn init_tracing(directive: Option<&str>) {
    let _ = fmt().with_env_filter(log_filter(directive)).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_directive_replaces_default_filter() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(log_filter(Some("gastos=debug")).to_string(), "gastos=debug");
        assert_eq!(log_filter(None).to_string(), DEFAULT_LOG_FILTER);
        assert_eq!(log_filter(Some("gastos=loud")).to_string(), DEFAULT_LOG_FILTER);
    }
}
