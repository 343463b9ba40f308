//! `SearchNodeInfo`: the fixed-layout record kept for every seen state.

use std::fmt;

use planspace_kernel::operators::Operator;
use planspace_kernel::state::StateId;

/// Lifecycle status of a search node.
///
/// ```text
/// New ──open──▶ Open ──close──▶ Closed
///                ▲                 │
///                └──── reopen ─────┘
/// any ──mark_as_dead_end──▶ DeadEnd
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeStatus {
    /// Never touched by a transition.
    #[default]
    New,
    /// On the frontier.
    Open,
    /// Expanded.
    Closed,
    /// Proven or declared unable to reach a goal.
    DeadEnd,
}

impl NodeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::DeadEnd => "dead_end",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search metadata for one state.
///
/// Fields other than `status` are meaningful only once the status has left
/// [`NodeStatus::New`]. When `parent_state_id` is [`StateId::NO_STATE`] the
/// record is a root: `creating_operator` is `None` and `length` is 0.
///
/// `steps` is present only for nodes opened through a multi-step transition
/// and holds that transition's operators, the last being `creating_operator`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchNodeInfo<'a> {
    pub(crate) status: NodeStatus,
    pub(crate) g: i64,
    pub(crate) real_g: i64,
    pub(crate) h: i64,
    pub(crate) length: u32,
    pub(crate) h_is_dirty: bool,
    pub(crate) parent_state_id: StateId,
    pub(crate) creating_operator: Option<&'a Operator>,
    pub(crate) steps: Option<Box<[&'a Operator]>>,
}

impl<'a> SearchNodeInfo<'a> {
    #[must_use]
    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Best known adjusted cost from the initial state.
    #[must_use]
    pub fn g(&self) -> i64 {
        self.g
    }

    /// Best known native cost from the initial state.
    #[must_use]
    pub fn real_g(&self) -> i64 {
        self.real_g
    }

    #[must_use]
    pub fn h(&self) -> i64 {
        self.h
    }

    /// Operator applications on the best known path.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    #[must_use]
    pub fn is_h_dirty(&self) -> bool {
        self.h_is_dirty
    }

    /// Predecessor on the best known path; `None` for roots and new nodes.
    #[must_use]
    pub fn parent_state_id(&self) -> Option<StateId> {
        self.parent_state_id.to_option()
    }

    #[must_use]
    pub fn creating_operator(&self) -> Option<&'a Operator> {
        self.creating_operator
    }

    /// Operators of the multi-step transition that opened this node, if any.
    #[must_use]
    pub fn steps(&self) -> Option<&[&'a Operator]> {
        self.steps.as_deref()
    }
}
