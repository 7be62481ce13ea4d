//! Query classification, execution and result shaping.
//!
//! This module is the engine every caller goes through: the console, the
//! fixture loader and the statistics collector all hand it a SQL string and a
//! connection and get back a [`QueryResult`](crate::db::QueryResult).

pub mod classify;
pub mod executor;
pub mod shaper;

pub use classify::{classify, validate_sql, StatementKind};
pub use executor::{execute, execute_with};
pub use shaper::{shape, ColumnKind, ResultShaper};
