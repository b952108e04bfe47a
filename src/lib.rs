//! rollup - Task Completion Rollup Library
//!
//! Loads flat task records (id, status, optional parent id) describing a
//! forest of task hierarchies, rejects cyclic parent links, and computes for
//! every task the share of its subtree that is closed.
//!
//! # Core Concepts
//!
//! - **Task**: a node with an id, a status and an optional parent id
//! - **Registry**: the tasks of one run, indexed by id, with a children index
//! - **Subtree**: a task plus all of its transitive descendants
//! - **Cycle**: parent links that revisit a task when followed downwards
//!
//! # Module Organization
//!
//! - `task`: Task model and input records
//! - `registry`: Task registry (lookup, reset, bulk build, children)
//! - `analyzer`: Cycle detection, subtree stats, completion percentages
//! - `loader`: Reading records and building a validated registry
//! - `config`: Configuration loading from `.rollup.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output for the CLI
//! - `cli`: Command-line interface using clap

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod registry;
pub mod task;

pub use analyzer::{SubtreeStats, TreeAnalyzer};
pub use error::{Error, Result};
pub use registry::TaskRegistry;
pub use task::{Task, TaskRecord, TaskStatus};
