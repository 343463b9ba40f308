//! State module: identifiers, the registry, and borrowed state views.
//!
//! Identity lives here. Nothing outside the registry decides whether two
//! value vectors are the same state.

pub mod registry;
pub mod state_id;

pub use registry::{RegistryError, State, StateRegistry, Variable};
pub use state_id::StateId;
