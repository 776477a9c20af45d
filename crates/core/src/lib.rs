//! Pure domain logic for the MobiMart inventory backend.
//!
//! No I/O, no database, no async. Everything here is directly unit-testable.

pub mod error;
pub mod imei;
pub mod import;
pub mod paging;
pub mod types;
