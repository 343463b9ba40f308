//! Planspace Search: per-state bookkeeping for state-space search.
//!
//! This crate owns the information a planner keeps about every state it has
//! seen: best-known adjusted and native cost, heuristic value, lifecycle
//! status, and the predecessor link used for plan extraction. It does not
//! contain any search algorithm. A*, greedy best-first, hill climbing and
//! lookahead searches all drive it through the same node lifecycle.
//!
//! # Crate dependency graph
//!
//! ```text
//! planspace_kernel  ←  planspace_search
//! (registry, ops)      (info table, nodes, space)
//! ```
//!
//! # Key types
//!
//! - [`SearchSpace`] -- owns the per-state table; vends nodes, traces plans
//! - [`SearchNode`] -- transient `&mut` view exposing the node lifecycle
//! - [`ParentNode`] -- value snapshot of a parent used by transitions
//! - [`PerStateInformation`] -- dense default-initialising id → record table
//! - [`SearchSpaceConfig`] -- TOML-loadable cost type and capacity

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod node;
pub mod node_info;
pub mod per_state_info;
pub mod space;

pub use config::SearchSpaceConfig;
pub use error::ConfigError;
pub use node::{ParentNode, SearchNode};
pub use node_info::{NodeStatus, SearchNodeInfo};
pub use per_state_info::PerStateInformation;
pub use space::{SearchSpace, SearchSpaceStatistics};
