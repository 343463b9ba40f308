//! `OperatorCatalogue`: the owning list of a task's operators.
//!
//! Operators are immutable once the catalogue is built, so search code may
//! hold `&Operator` for as long as the catalogue lives. Names are unique and
//! indexed in a `BTreeMap` for deterministic iteration.

use std::collections::BTreeMap;

use crate::operators::cost::{CostPolicy, OperatorCost};
use crate::operators::operator::Operator;
use crate::state::State;

/// Error type for catalogue construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    /// Two operators share a name.
    #[error("duplicate operator name {name:?}")]
    DuplicateName { name: String },
    /// An operator declares a negative cost.
    #[error("operator {name:?} has negative cost {cost}")]
    NegativeCost { name: String, cost: i64 },
}

/// The operators of a planning task.
#[derive(Debug, Clone)]
pub struct OperatorCatalogue {
    operators: Vec<Operator>,
    by_name: BTreeMap<String, usize>,
    min_cost: Option<i64>,
    max_cost: Option<i64>,
}

impl OperatorCatalogue {
    /// Build a catalogue, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::DuplicateName`] if two operators share a
    /// name, and [`CatalogueError::NegativeCost`] for negative costs.
    pub fn new(operators: Vec<Operator>) -> Result<Self, CatalogueError> {
        let mut by_name = BTreeMap::new();
        for (index, op) in operators.iter().enumerate() {
            if op.cost() < 0 {
                return Err(CatalogueError::NegativeCost {
                    name: op.name().to_string(),
                    cost: op.cost(),
                });
            }
            if by_name.insert(op.name().to_string(), index).is_some() {
                return Err(CatalogueError::DuplicateName {
                    name: op.name().to_string(),
                });
            }
        }
        let min_cost = operators.iter().map(Operator::cost).min();
        let max_cost = operators.iter().map(Operator::cost).max();
        Ok(Self {
            operators,
            by_name,
            min_cost,
            max_cost,
        })
    }

    /// Operator at position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Operator> {
        self.operators.get(index)
    }

    /// Operator named `name`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Operator> {
        self.by_name.get(name).map(|&i| &self.operators[i])
    }

    /// All operators in catalogue order.
    pub fn iter(&self) -> std::slice::Iter<'_, Operator> {
        self.operators.iter()
    }

    /// Operators whose preconditions hold in `state`, in catalogue order.
    #[must_use]
    pub fn applicable(&self, state: &State<'_>) -> Vec<&Operator> {
        self.operators
            .iter()
            .filter(|op| op.is_applicable(state))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Cheapest native cost, `None` for an empty catalogue.
    #[must_use]
    pub fn min_cost(&self) -> Option<i64> {
        self.min_cost
    }

    /// Most expensive native cost, `None` for an empty catalogue.
    #[must_use]
    pub fn max_cost(&self) -> Option<i64> {
        self.max_cost
    }

    /// Whether every operator has native cost exactly 1.
    #[must_use]
    pub fn is_unit_cost(&self) -> bool {
        self.min_cost == Some(1) && self.max_cost == Some(1)
    }
}

impl CostPolicy for OperatorCatalogue {
    fn adjusted_cost(&self, op: &Operator, cost_type: OperatorCost) -> i64 {
        cost_type.adjust(op.cost(), self.is_unit_cost())
    }
}

impl<'c> IntoIterator for &'c OperatorCatalogue {
    type Item = &'c Operator;
    type IntoIter = std::slice::Iter<'c, Operator>;

    fn into_iter(self) -> Self::IntoIter {
        self.operators.iter()
    }
}
