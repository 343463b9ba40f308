//! Cost treatment: how operator costs enter the search's g-values.
//!
//! Search orders its frontier by *adjusted* cost while solution quality is
//! reported in *native* cost. The two coincide under [`OperatorCost::Normal`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::operators::operator::Operator;

/// Cost-treatment mode applied when accumulating adjusted g-values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorCost {
    /// Adjusted cost equals native cost.
    #[default]
    Normal,
    /// Every operator costs 1.
    One,
    /// Native cost plus one, except on unit-cost tasks where every operator stays at 1.
    PlusOne,
}

impl OperatorCost {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::One => "one",
            Self::PlusOne => "plusone",
        }
    }

    /// Adjust a native `cost` under this mode.
    ///
    /// `unit_cost_task` is true when every operator of the task has native
    /// cost 1; `PlusOne` then leaves costs at 1 instead of doubling them.
    #[must_use]
    pub const fn adjust(self, cost: i64, unit_cost_task: bool) -> i64 {
        match self {
            Self::Normal => cost,
            Self::One => 1,
            Self::PlusOne => {
                if unit_cost_task {
                    1
                } else {
                    cost + 1
                }
            }
        }
    }
}

impl fmt::Display for OperatorCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown cost-type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cost type {0:?}, expected one of: normal, one, plusone")]
pub struct ParseOperatorCostError(pub String);

impl FromStr for OperatorCost {
    type Err = ParseOperatorCostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "one" => Ok(Self::One),
            "plusone" => Ok(Self::PlusOne),
            other => Err(ParseOperatorCostError(other.to_string())),
        }
    }
}

/// Source of the three cost figures a search space needs.
///
/// The catalogue implements this from declared costs. Tasks with a different
/// notion of plan cost (makespan, for lookahead plans executed in parallel)
/// override [`CostPolicy::plan_cost`].
pub trait CostPolicy {
    /// Native cost of a single operator.
    fn native_cost(&self, op: &Operator) -> i64 {
        op.cost()
    }

    /// Cost of `op` under the cost-treatment mode `cost_type`.
    fn adjusted_cost(&self, op: &Operator, cost_type: OperatorCost) -> i64;

    /// Native cost of executing `steps` as one multi-step transition.
    ///
    /// Not required to equal the sum of the steps' native costs.
    fn plan_cost(&self, steps: &[&Operator]) -> i64 {
        steps.iter().map(|op| self.native_cost(op)).sum()
    }
}

impl<P: CostPolicy + ?Sized> CostPolicy for &P {
    fn native_cost(&self, op: &Operator) -> i64 {
        (**self).native_cost(op)
    }

    fn adjusted_cost(&self, op: &Operator, cost_type: OperatorCost) -> i64 {
        (**self).adjusted_cost(op, cost_type)
    }

    fn plan_cost(&self, steps: &[&Operator]) -> i64 {
        (**self).plan_cost(steps)
    }
}
