//! gastos-domain
//!
//! Pure domain models (Expense, Budget, UserProfile, Badge, Achievement catalog).
//! No I/O, no storage, no clock. Only data types, lookup tables and core enums.

pub mod achievement;
pub mod budget;
pub mod category;
pub mod common;
pub mod expense;
pub mod profile;

pub use achievement::*;
pub use budget::*;
pub use category::*;
pub use common::*;
pub use expense::*;
pub use profile::*;
