#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone, Utc};
use gastos::config::{Config, ConfigManager};
use gastos::engine::{FixedClock, LedgerSession};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub struct TestEnv {
    pub session: LedgerSession,
    pub clock: Arc<FixedClock>,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub data_root: PathBuf,
}

impl TestEnv {
    /// Opens a second session over the same files, as a restarted app would.
    pub fn reopen(&self) -> LedgerSession {
        gastos::open_session_at(&self.data_root, self.clock.clone()).expect("reopen session")
    }
}

pub fn local_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(y, m, d, 12, 0, 0)
        .single()
        .expect("unambiguous local noon")
        .with_timezone(&Utc)
}

/// Creates an isolated session backed by a unique directory for each test.
pub fn setup_test_env(now: DateTime<Utc>) -> TestEnv {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    let config = Config {
        data_root: Some(base.join("Gastos")),
        ..Config::default()
    };
    config_manager.save(&config).expect("save test config");

    let data_root = config.resolve_data_root();
    let clock = Arc::new(FixedClock::new(now));
    let session = gastos::open_session_at(&data_root, clock.clone()).expect("open session");

    TestEnv {
        session,
        clock,
        config,
        config_manager,
        data_root,
    }
}
