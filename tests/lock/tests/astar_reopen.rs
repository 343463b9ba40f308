//! End-to-end: an A* loop drives the search space through reopening,
//! dead ends and lookahead transitions.

use lock_tests::driver::{astar, AstarOutcome};
use lock_tests::fixtures::{
    detour_heuristic, detour_task, line_registry, op, scenario_catalogue, OverlappingSteps, GOAL,
    X, Y,
};
use lock_tests::invariants::{assert_space, assert_step_spans};
use planspace_kernel::operators::{Operator, OperatorCatalogue, OperatorCost};
use planspace_kernel::state::{State, StateId, StateRegistry};
use planspace_search::{NodeStatus, SearchSpace, SearchSpaceConfig};

fn pos(state: &State<'_>) -> u32 {
    state.value(0).unwrap()
}

fn is_goal(state: &State<'_>) -> bool {
    pos(state) == GOAL
}

fn names(plan: &[&Operator]) -> Vec<String> {
    plan.iter().map(|op| op.name().to_string()).collect()
}

fn run<'a>(
    registry: &mut StateRegistry,
    catalogue: &'a OperatorCatalogue,
    space: &mut SearchSpace<'a>,
    start: StateId,
) -> AstarOutcome<'a> {
    astar(registry, catalogue, space, start, is_goal, |s| {
        Some(detour_heuristic(pos(s)))
    })
}

#[test]
fn inconsistent_heuristic_reopens_closed_node() {
    let (mut registry, catalogue, start) = detour_task();
    let mut space = SearchSpace::new(&catalogue, OperatorCost::Normal);
    let outcome = run(&mut registry, &catalogue, &mut space, start);

    let goal = outcome.goal.unwrap();
    assert_eq!(names(&outcome.plan), ["s-y", "y-x", "x-g"]);
    assert_eq!(outcome.reopened, 1, "X is closed at g = 4 and reopened at g = 2");
    assert_eq!(outcome.expansions, 5);

    let info = space.info(goal).unwrap();
    assert_eq!(info.g(), 7);
    assert_eq!(info.real_g(), 7);
    assert_eq!(info.length(), 3);
    let stats = space.statistics(&registry);
    assert_eq!(stats.registered_states, 4);
    assert_eq!(stats.closed_nodes, 4);
    assert_space(&space);

    let mut current = start;
    for op in &outcome.plan {
        current = registry.get_successor_state(current, op).unwrap();
    }
    assert_eq!(current, goal, "traced plan must replay to the goal");
}

#[test]
fn reopened_node_dumps_its_new_parent() {
    let (mut registry, catalogue, start) = detour_task();
    let mut space = SearchSpace::new(&catalogue, OperatorCost::Normal);
    run(&mut registry, &catalogue, &mut space, start);

    let x = registry.find(&[X]).unwrap();
    let y = registry.find(&[Y]).unwrap();
    let mut out = Vec::new();
    space.dump(&registry, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let expected = format!("{x}:\n  #0 [pos] -> {X}\n  created by y-x from {y}\n");
    assert!(text.contains(&expected), "dump was:\n{text}");
    assert!(text.starts_with("0:\n  #0 [pos] -> 0\n  has no parent\n"));
}

#[test]
fn plus_one_costs_steer_g_but_not_real_g() {
    let (mut registry, catalogue, start) = detour_task();
    let mut space = SearchSpace::new(&catalogue, OperatorCost::PlusOne);
    let outcome = run(&mut registry, &catalogue, &mut space, start);

    let info = space.info(outcome.goal.unwrap()).unwrap();
    assert_eq!(names(&outcome.plan), ["s-y", "y-x", "x-g"]);
    assert_eq!(info.g(), 10);
    assert_eq!(info.real_g(), 7);
}

#[test]
fn dead_end_heuristic_prunes_the_detour() {
    let (mut registry, catalogue, start) = detour_task();
    let mut space = SearchSpace::new(&catalogue, OperatorCost::Normal);
    let outcome = astar(&mut registry, &catalogue, &mut space, start, is_goal, |s| {
        (pos(s) != Y).then_some(0)
    });

    assert_eq!(names(&outcome.plan), ["s-x", "x-g"]);
    assert_eq!(outcome.reopened, 0);
    assert_eq!(space.info(outcome.goal.unwrap()).unwrap().g(), 9);
    let y = registry.find(&[Y]).unwrap();
    assert_eq!(space.status(y), NodeStatus::DeadEnd);
    assert_eq!(space.statistics(&registry).dead_end_nodes, 1);
    assert_space(&space);
}

#[test]
fn dead_end_initial_state_ends_search() {
    let (mut registry, catalogue, start) = detour_task();
    let mut space = SearchSpace::new(&catalogue, OperatorCost::Normal);
    let outcome = astar(&mut registry, &catalogue, &mut space, start, is_goal, |_| None);

    assert!(outcome.goal.is_none());
    assert_eq!(outcome.expansions, 0);
    assert_eq!(space.status(start), NodeStatus::DeadEnd);
}

#[test]
fn unreachable_goal_exhausts_frontier() {
    let (mut registry, catalogue, start) = detour_task();
    let mut space = SearchSpace::new(&catalogue, OperatorCost::Normal);
    let outcome = astar(&mut registry, &catalogue, &mut space, start, |_| false, |s| {
        Some(detour_heuristic(pos(s)))
    });

    assert!(outcome.goal.is_none());
    assert!(outcome.plan.is_empty());
    let stats = space.statistics(&registry);
    assert_eq!(stats.open_nodes, 0);
    assert_eq!(stats.closed_nodes, 4);
}

#[test]
fn lookahead_edge_expands_in_trace_plan() {
    let catalogue = scenario_catalogue();
    let policy = OverlappingSteps {
        catalogue: &catalogue,
        overlap: 1,
    };
    let (_registry, ids) = line_registry(3);
    let mut space = SearchSpace::new(&policy, OperatorCost::Normal);

    space.get_node(ids[0]).open_initial(6);
    let root = space.get_node(ids[0]).as_parent();
    let steps = [op(&catalogue, "x"), op(&catalogue, "y")];
    space.get_node(ids[2]).open_with_steps(1, &root, &steps);
    let mid = space.get_node(ids[2]).as_parent();
    space.get_node(ids[1]).open(0, &mid, op(&catalogue, "c"));

    let leaf = space.info(ids[1]).unwrap();
    assert_eq!(leaf.g(), 5);
    assert_eq!(leaf.real_g(), 4, "x and y overlap by one unit");
    assert_eq!(leaf.length(), 3);

    let mut path = Vec::new();
    space.trace_path(ids[1], &mut path);
    assert_eq!(names(&path), ["y", "c"]);
    let mut plan = Vec::new();
    space.trace_plan(ids[1], &mut plan);
    assert_eq!(names(&plan), ["x", "y", "c"]);
    assert_space(&space);
}

#[test]
fn lookahead_edge_below_root_spans_its_steps() {
    let catalogue = scenario_catalogue();
    let policy = OverlappingSteps {
        catalogue: &catalogue,
        overlap: 1,
    };
    let (_registry, ids) = line_registry(4);
    let mut space = SearchSpace::new(&policy, OperatorCost::Normal);

    space.get_node(ids[0]).open_initial(0);
    let root = space.get_node(ids[0]).as_parent();
    space.get_node(ids[1]).open(0, &root, op(&catalogue, "c"));
    let first = space.get_node(ids[1]).as_parent();
    let inner = [op(&catalogue, "a"), op(&catalogue, "b")];
    space.get_node(ids[2]).open_with_steps(0, &first, &inner);
    let second = space.get_node(ids[2]).as_parent();
    let outer = [op(&catalogue, "x"), op(&catalogue, "y"), op(&catalogue, "c")];
    space.get_node(ids[3]).open_with_steps(0, &second, &outer);

    let deep = space.info(ids[3]).unwrap();
    assert_eq!(deep.length(), 6);
    assert_eq!(deep.g(), 1 + 5 + 5);
    assert_eq!(deep.real_g(), 1 + 4 + 3, "makespans with one unit overlap per join");
    let mut plan = Vec::new();
    space.trace_plan(ids[3], &mut plan);
    assert_eq!(names(&plan), ["c", "a", "b", "x", "y", "c"]);
    assert_space(&space);
    assert_step_spans(&space);
}

#[test]
fn search_space_built_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("search.toml");
    std::fs::write(&path, "cost_type = \"plusone\"\ninitial_capacity = 8\n").unwrap();
    let config = SearchSpaceConfig::load(&path).unwrap();

    let (mut registry, catalogue, start) = detour_task();
    let mut space = SearchSpace::from_config(&catalogue, &config);
    assert_eq!(space.cost_type(), OperatorCost::PlusOne);
    let outcome = run(&mut registry, &catalogue, &mut space, start);
    assert_eq!(space.info(outcome.goal.unwrap()).unwrap().g(), 10);
}
