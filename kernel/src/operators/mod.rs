//! Operators module: operator definitions, the catalogue, and cost treatment.
//!
//! Depends on `state` for applicability tests. Never mutates states; the
//! registry applies effects.

pub mod catalogue;
pub mod cost;
pub mod operator;

pub use catalogue::{CatalogueError, OperatorCatalogue};
pub use cost::{CostPolicy, OperatorCost, ParseOperatorCostError};
pub use operator::{Fact, Operator};
