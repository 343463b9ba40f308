//! `Operator`: a named, costed transition with preconditions and effects.

use crate::state::State;

/// A single variable assignment `var = value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fact {
    /// Variable index into the registry's variable list.
    pub var: usize,
    /// Required or assigned value.
    pub value: u32,
}

impl Fact {
    /// Construct a fact.
    #[must_use]
    pub const fn new(var: usize, value: u32) -> Self {
        Self { var, value }
    }
}

/// A ground planning operator.
///
/// Search nodes refer to operators by reference into the
/// [`OperatorCatalogue`](crate::operators::OperatorCatalogue) that owns them;
/// an operator's identity is its address in that catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    name: String,
    cost: i64,
    preconditions: Vec<Fact>,
    effects: Vec<Fact>,
}

impl Operator {
    /// An operator with no preconditions and no effects.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: i64) -> Self {
        Self {
            name: name.into(),
            cost,
            preconditions: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Require `var = value` before application.
    #[must_use]
    pub fn with_precondition(mut self, var: usize, value: u32) -> Self {
        self.preconditions.push(Fact::new(var, value));
        self
    }

    /// Assign `var = value` on application.
    #[must_use]
    pub fn with_effect(mut self, var: usize, value: u32) -> Self {
        self.effects.push(Fact::new(var, value));
        self
    }

    /// Diagnostic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Native cost, as declared by the task.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    #[must_use]
    pub fn preconditions(&self) -> &[Fact] {
        &self.preconditions
    }

    #[must_use]
    pub fn effects(&self) -> &[Fact] {
        &self.effects
    }

    /// Whether every precondition holds in `state`.
    ///
    /// A precondition on a variable the state does not have never holds.
    #[must_use]
    pub fn is_applicable(&self, state: &State<'_>) -> bool {
        self.preconditions
            .iter()
            .all(|pre| state.value(pre.var) == Some(pre.value))
    }
}
