//! Storage backend implementations.
//!
//! This module provides the concrete implementation of the repository trait
//! defined in `storetest_core::storage`: a single-file SQLite store.

pub mod sqlite;

pub use sqlite::SqliteRepository;
