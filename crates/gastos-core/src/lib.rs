//! gastos-core
//!
//! Ledger and gamification engine for Gastos.
//! Depends on gastos-domain. No serialization formats, no direct storage technology:
//! persistence goes through the [`storage::LedgerStorage`] seam.

pub mod achievement_service;
pub mod aggregation_service;
pub mod error;
pub mod session;
pub mod storage;
pub mod streak_service;
pub mod time;
pub mod validation;
pub mod window;

pub use achievement_service::*;
pub use aggregation_service::*;
pub use error::CoreError;
pub use session::*;
pub use storage::*;
pub use streak_service::*;
pub use time::*;
pub use validation::*;
