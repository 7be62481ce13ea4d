//! SQL Sandbox - an interactive console for learning SQL.
//!
//! The core is a generic statement engine: [`query`] classifies and executes
//! SQL over a per-call SQLite connection and shapes the outcome into a
//! [`db::QueryResult`]. The remaining modules build the learning console on
//! top of it.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod health;
pub mod logging;
pub mod query;
pub mod records;
pub mod seed;
pub mod stats;
