//! `SearchSpace`: owner of every state's search record.
//!
//! The space is the single authority for g-values and parent links. Search
//! algorithms never hold records directly; they borrow one at a time as a
//! [`SearchNode`] via [`SearchSpace::get_node`].

use std::fmt;
use std::io::{self, Write};

use planspace_kernel::operators::{CostPolicy, Operator, OperatorCatalogue, OperatorCost};
use planspace_kernel::state::{StateId, StateRegistry};

use crate::config::SearchSpaceConfig;
use crate::node::{write_entry, SearchNode};
use crate::node_info::{NodeStatus, SearchNodeInfo};
use crate::per_state_info::PerStateInformation;

/// Per-state search bookkeeping under one cost-treatment mode.
///
/// `'a` is the lifetime of the operator catalogue (or other cost policy);
/// records refer to its operators by reference.
pub struct SearchSpace<'a, P: ?Sized = OperatorCatalogue> {
    infos: PerStateInformation<SearchNodeInfo<'a>>,
    costs: &'a P,
    cost_type: OperatorCost,
}

impl<'a, P: CostPolicy + ?Sized> SearchSpace<'a, P> {
    /// Create an empty search space.
    #[must_use]
    pub fn new(costs: &'a P, cost_type: OperatorCost) -> Self {
        tracing::debug!(%cost_type, "created search space");
        Self {
            infos: PerStateInformation::new(),
            costs,
            cost_type,
        }
    }

    /// Create an empty search space from a loaded configuration.
    #[must_use]
    pub fn from_config(costs: &'a P, config: &SearchSpaceConfig) -> Self {
        tracing::debug!(
            cost_type = %config.cost_type,
            initial_capacity = config.initial_capacity,
            "created search space from config"
        );
        Self {
            infos: PerStateInformation::with_capacity(config.initial_capacity),
            costs,
            cost_type: config.cost_type,
        }
    }

    /// The cost-treatment mode every node of this space uses.
    #[must_use]
    pub fn cost_type(&self) -> OperatorCost {
        self.cost_type
    }

    /// The cost policy transitions consult.
    #[must_use]
    pub fn costs(&self) -> &'a P {
        self.costs
    }

    /// The node for `id`, materialising a new record on first access.
    ///
    /// # Panics
    ///
    /// Panics if `id` is [`StateId::NO_STATE`].
    pub fn get_node(&mut self, id: StateId) -> SearchNode<'_, 'a, P> {
        SearchNode::new(id, self.infos.get_mut(id), self.costs, self.cost_type)
    }

    /// The record for `id`, if one was ever materialised.
    #[must_use]
    pub fn info(&self, id: StateId) -> Option<&SearchNodeInfo<'a>> {
        self.infos.get(id)
    }

    /// Recorded `(id, record)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &SearchNodeInfo<'a>)> + '_ {
        self.infos.iter()
    }

    /// Status of `id` without materialising a record; unseen ids are new.
    #[must_use]
    pub fn status(&self, id: StateId) -> NodeStatus {
        self.infos.get(id).map_or(NodeStatus::New, SearchNodeInfo::status)
    }

    /// Number of states with a record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Append the operators leading from the root to `goal` onto `path`, root first.
    ///
    /// Each edge contributes its creating operator only, so a node opened
    /// through a multi-step plan contributes the plan's last step; see
    /// [`SearchSpace::trace_plan`] for the expanded form. The path follows
    /// current parent links, so it reflects any re-parenting done since the
    /// goal was first reached. An id without a record yields an empty path,
    /// as for a root.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not empty, if `goal` is [`StateId::NO_STATE`], or
    /// if the parent chain is malformed (an operator without a parent, a
    /// parent without an operator, an unrecorded ancestor, or a cycle).
    pub fn trace_path(&self, goal: StateId, path: &mut Vec<&'a Operator>) {
        assert!(path.is_empty(), "trace_path requires an empty output path");
        self.walk_to_root(goal, |_, op| path.push(op));
        path.reverse();
    }

    /// Like [`SearchSpace::trace_path`], but edges created by a multi-step
    /// transition contribute every step, so the result is executable.
    ///
    /// # Panics
    ///
    /// As for [`SearchSpace::trace_path`].
    pub fn trace_plan(&self, goal: StateId, plan: &mut Vec<&'a Operator>) {
        assert!(plan.is_empty(), "trace_plan requires an empty output plan");
        self.walk_to_root(goal, |info, op| match info.steps() {
            Some(steps) => plan.extend(steps.iter().rev()),
            None => plan.push(op),
        });
        plan.reverse();
    }

    /// Visit each edge from `goal` back to its root, goal side first.
    fn walk_to_root<F>(&self, goal: StateId, mut visit: F)
    where
        F: FnMut(&SearchNodeInfo<'a>, &'a Operator),
    {
        assert!(!goal.is_none(), "path trace from NO_STATE");
        let mut current = goal;
        let mut edges = 0usize;
        loop {
            let Some(info) = self.infos.get(current) else {
                assert_eq!(
                    current, goal,
                    "parent chain of {goal} reaches unrecorded state {current}"
                );
                return;
            };
            let Some(op) = info.creating_operator else {
                assert!(
                    info.parent_state_id.is_none(),
                    "state {current} has parent {} but no creating operator",
                    info.parent_state_id
                );
                return;
            };
            assert!(
                !info.parent_state_id.is_none(),
                "state {current} was created by {} but has no parent",
                op.name()
            );
            visit(info, op);
            edges += 1;
            assert!(
                edges <= self.infos.len(),
                "parent chain of {goal} contains a cycle"
            );
            current = info.parent_state_id;
        }
    }

    /// Write every recorded state, ascending by id, with its parent link.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    ///
    /// # Panics
    ///
    /// Panics if a recorded id is unknown to `registry`.
    pub fn dump<W: Write + ?Sized>(&self, registry: &StateRegistry, out: &mut W) -> io::Result<()> {
        for (id, info) in self.infos.iter() {
            write_entry(id, info, registry, out)?;
        }
        Ok(())
    }

    /// Summarise the space and log the summary.
    ///
    /// The registered-state count comes from `registry`, which also counts
    /// states the search generated but never asked a node for.
    pub fn statistics(&self, registry: &StateRegistry) -> SearchSpaceStatistics {
        let mut stats = SearchSpaceStatistics {
            registered_states: registry.size(),
            recorded_nodes: self.infos.len(),
            ..SearchSpaceStatistics::default()
        };
        for (_, info) in self.infos.iter() {
            match info.status {
                NodeStatus::New => stats.new_nodes += 1,
                NodeStatus::Open => stats.open_nodes += 1,
                NodeStatus::Closed => stats.closed_nodes += 1,
                NodeStatus::DeadEnd => stats.dead_end_nodes += 1,
            }
        }
        tracing::info!(
            registered_states = stats.registered_states,
            recorded_nodes = stats.recorded_nodes,
            open = stats.open_nodes,
            closed = stats.closed_nodes,
            dead_ends = stats.dead_end_nodes,
            "search space statistics"
        );
        stats
    }
}

/// Counts reported by [`SearchSpace::statistics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSpaceStatistics {
    /// States known to the registry.
    pub registered_states: usize,
    /// States with a search record.
    pub recorded_nodes: usize,
    /// Recorded states still in status `New`.
    pub new_nodes: usize,
    /// Recorded states on the frontier.
    pub open_nodes: usize,
    /// Recorded states that were expanded.
    pub closed_nodes: usize,
    /// Recorded states marked as dead ends.
    pub dead_end_nodes: usize,
}

impl fmt::Display for SearchSpaceStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number of registered states: {}", self.registered_states)
    }
}
