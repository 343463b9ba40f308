//! `StateRegistry`: interning store for packed finite-domain states.
//!
//! Every distinct value vector is stored exactly once and named by a dense
//! [`StateId`]. Search code never holds states by value; it holds ids and
//! asks the registry for a borrowed [`State`] view when it needs the values.
//!
//! Storage is a single flattened `Vec<u32>` (`arity` values per state) plus a
//! hash index from value vector to id for duplicate detection.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::operators::Operator;
use crate::state::state_id::StateId;

/// A finite-domain state variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Diagnostic name, printed by [`State::dump_fdr`].
    pub name: String,
    /// Number of values; valid values are `0..domain_size`.
    pub domain_size: u32,
}

impl Variable {
    /// Construct a variable.
    #[must_use]
    pub fn new(name: impl Into<String>, domain_size: u32) -> Self {
        Self {
            name: name.into(),
            domain_size,
        }
    }
}

/// Error type for state registration and successor generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The value vector does not have one value per variable.
    #[error("state has {actual} values, registry expects {expected}")]
    ArityMismatch { expected: usize, actual: usize },
    /// A value lies outside its variable's domain.
    #[error("value {value} out of domain for variable #{var} (domain size {domain_size})")]
    ValueOutOfDomain {
        var: usize,
        value: u32,
        domain_size: u32,
    },
    /// An operator fact names a variable the registry does not have.
    #[error("operator {operator} refers to unknown variable #{var}")]
    UnknownVariable { operator: String, var: usize },
    /// The id does not name a registered state.
    #[error("unknown state id {id}")]
    UnknownState { id: StateId },
    /// The operator's preconditions do not hold in the predecessor.
    #[error("operator {operator} is not applicable in state {id}")]
    NotApplicable { operator: String, id: StateId },
    /// Every representable id has been issued.
    #[error("state registry exhausted its id space")]
    Exhausted,
}

/// Interning store for packed states.
#[derive(Debug, Clone)]
pub struct StateRegistry {
    variables: Vec<Variable>,
    packed: Vec<u32>,
    index: HashMap<Box<[u32]>, StateId>,
}

impl StateRegistry {
    /// Create an empty registry over the given variables.
    #[must_use]
    pub fn new(variables: Vec<Variable>) -> Self {
        Self {
            variables,
            packed: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The variables every state assigns.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Number of values per state.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.variables.len()
    }

    /// Number of registered states.
    #[must_use]
    pub fn size(&self) -> usize {
        self.index.len()
    }

    /// Whether no state has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Register a value vector, returning the existing id if it is already known.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ArityMismatch`] or
    /// [`RegistryError::ValueOutOfDomain`] for malformed vectors, and
    /// [`RegistryError::Exhausted`] if no further id can be issued.
    pub fn insert_state(&mut self, values: &[u32]) -> Result<StateId, RegistryError> {
        self.validate(values)?;
        if let Some(&id) = self.index.get(values) {
            return Ok(id);
        }
        let raw = u32::try_from(self.size()).map_err(|_| RegistryError::Exhausted)?;
        let id = StateId::new(raw);
        if id.is_none() {
            return Err(RegistryError::Exhausted);
        }
        self.packed.extend_from_slice(values);
        self.index.insert(values.into(), id);
        tracing::trace!(state_id = %id, "registered state");
        Ok(id)
    }

    /// Apply `op` to the state named by `predecessor` and register the result.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownState`] if `predecessor` is not
    /// registered, [`RegistryError::NotApplicable`] if a precondition fails,
    /// and [`RegistryError::UnknownVariable`] or the errors of
    /// [`StateRegistry::insert_state`] if the effects produce a malformed state.
    pub fn get_successor_state(
        &mut self,
        predecessor: StateId,
        op: &Operator,
    ) -> Result<StateId, RegistryError> {
        let state = self
            .get_state(predecessor)
            .ok_or(RegistryError::UnknownState { id: predecessor })?;
        if !op.is_applicable(&state) {
            return Err(RegistryError::NotApplicable {
                operator: op.name().to_string(),
                id: predecessor,
            });
        }
        let mut values = state.values().to_vec();
        for effect in op.effects() {
            let slot = values
                .get_mut(effect.var)
                .ok_or_else(|| RegistryError::UnknownVariable {
                    operator: op.name().to_string(),
                    var: effect.var,
                })?;
            *slot = effect.value;
        }
        self.insert_state(&values)
    }

    /// Borrow the state named by `id`, or `None` if it is not registered.
    #[must_use]
    pub fn get_state(&self, id: StateId) -> Option<State<'_>> {
        if id.is_none() || id.index() >= self.size() {
            return None;
        }
        let arity = self.arity();
        let start = id.index() * arity;
        Some(State {
            id,
            values: &self.packed[start..start + arity],
            variables: &self.variables,
        })
    }

    /// Borrow the state named by `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry. Ids flow from the
    /// registry to the search and back, so an unknown id is a caller bug.
    #[must_use]
    pub fn lookup_state(&self, id: StateId) -> State<'_> {
        match self.get_state(id) {
            Some(state) => state,
            None => panic!("state id {id} was not issued by this registry"),
        }
    }

    /// Look up the id of an already registered value vector.
    #[must_use]
    pub fn find(&self, values: &[u32]) -> Option<StateId> {
        self.index.get(values).copied()
    }

    fn validate(&self, values: &[u32]) -> Result<(), RegistryError> {
        if values.len() != self.arity() {
            return Err(RegistryError::ArityMismatch {
                expected: self.arity(),
                actual: values.len(),
            });
        }
        for (var, (&value, variable)) in values.iter().zip(&self.variables).enumerate() {
            if value >= variable.domain_size {
                return Err(RegistryError::ValueOutOfDomain {
                    var,
                    value,
                    domain_size: variable.domain_size,
                });
            }
        }
        Ok(())
    }
}

/// A borrowed view of one registered state.
#[derive(Debug, Clone, Copy)]
pub struct State<'r> {
    id: StateId,
    values: &'r [u32],
    variables: &'r [Variable],
}

impl<'r> State<'r> {
    /// The registry id of this state.
    #[must_use]
    pub fn id(&self) -> StateId {
        self.id
    }

    /// All values, one per variable.
    #[must_use]
    pub fn values(&self) -> &'r [u32] {
        self.values
    }

    /// Value of variable `var`, or `None` if out of range.
    #[must_use]
    pub fn value(&self, var: usize) -> Option<u32> {
        self.values.get(var).copied()
    }

    /// Write the finite-domain representation, one `  #<i> [<name>] -> <value>` line per variable.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn dump_fdr<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for (i, (variable, value)) in self.variables.iter().zip(self.values).enumerate() {
            writeln!(out, "  #{i} [{}] -> {value}", variable.name)?;
        }
        Ok(())
    }
}
