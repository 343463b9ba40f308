//! Planspace Kernel: the state registry and operator catalogue a planner's
//! search space is built on.
//!
//! # API Surface
//!
//! - [`state::StateRegistry`] -- interns packed state vectors and issues dense [`state::StateId`]s
//! - [`operators::OperatorCatalogue`] -- named, costed operators with preconditions and effects
//! - [`operators::CostPolicy`] -- native, adjusted and plan cost of operators
//!
//! # Module Dependency Direction
//!
//! `state` ← `operators`
//!
//! One-way only. `operators` reads states to test applicability; `state`
//! depends on `operators` only for successor generation, through the
//! `Operator` type, never through the catalogue.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod operators;
pub mod state;
