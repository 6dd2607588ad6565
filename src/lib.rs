//! Gastos: a personal expense ledger with streaks, levels and achievements.
//!
//! This crate wires the workspace together: tracing bootstrap, build
//! metadata, and opening a [`LedgerSession`](engine::LedgerSession) from a
//! [`Config`](config::Config).

pub mod app;
pub mod errors;
pub mod utils;

pub use gastos_config as config;
pub use gastos_core as engine;
pub use gastos_domain as domain;
pub use gastos_storage_json as storage;

pub use app::{budget_with_default_period, open_session, open_session_at, record_expense};
pub use errors::{GastosError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup log.
pub fn init() {
    init_with_filter(None);
}

/// Initializes tracing with the filter stored in the user's config, if any.
pub fn init_from_config(config: &config::Config) {
    init_with_filter(config.log_filter.as_deref());
}

/// Like [`init`], with an explicit filter directive such as `gastos=debug`.
///
/// Only the first call in a process has any effect.
pub fn init_with_filter(directive: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        let build = utils::build_info::current();
        tracing::info!(
            version = build.version,
            git_hash = build.git_hash,
            "Gastos tracing initialized."
        );
    });
}

#[cfg(test)]
mod tests {
    use crate::config::Config;

    #[test]
    fn init_does_not_panic() {
        let config = Config {
            log_filter: Some("gastos=debug".into()),
            ..Config::default()
        };
        super::init_from_config(&config);
        super::init();
        super::init_with_filter(Some("gastos=trace"));
    }
}
