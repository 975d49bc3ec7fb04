//! Functional core for storetest.
//!
//! Pure data types and pure functions: item validation, upload naming,
//! relative time formatting and the storage contract. No I/O happens here;
//! the `storetest` binary crate provides the imperative shell.

pub mod datefmt;
pub mod item;
pub mod storage;
pub mod upload;
