// A* route planning over a `MapModel`.
//
// `RoutePlanner` resolves percentage coordinates to start/end anchor nodes,
// runs the search, and on success writes the path into the model's result
// slot. The search itself (`astar`) only needs `&M`, so one immutable model
// can serve any number of searches.
//
// Per-node search state (g, h, visited, parent) lives in a `Vec<NodeState>`
// indexed by `NodeId`, allocated fresh for every run. Nothing is written to
// the model's nodes, so a second run never sees leftovers from the first.
//
// Two expansion policies are available:
// - `FirstVisit`: a node's g/parent are fixed the first time it is
//   discovered and it is never re-opened. Cheap, but can return a longer
//   path when a better route to an already-discovered node shows up later.
// - `Relaxing`: textbook A*. A cheaper g re-parents the node and pushes a
//   fresh frontier entry; stale entries are dropped when popped.

use crate::error::{PlannerError, Result};
use crate::frontier::OpenList;
use crate::model::MapModel;
use crate::types::{Node, NodeId};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// How discovered nodes are treated when a cheaper path to them turns up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionMode {
    #[default]
    FirstVisit,
    Relaxing,
}

/// Where a planner is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Initialized,
    Running,
    /// Goal reached; the model's path slot holds the route.
    Found,
    /// Frontier ran dry; the model's path slot was left untouched.
    Exhausted,
}

/// A found route.
#[derive(Clone, Debug, Serialize)]
pub struct Route {
    /// Node IDs from start to goal (inclusive).
    pub ids: Vec<NodeId>,
    /// Snapshots of the same nodes.
    pub nodes: Vec<Node>,
    /// Total length in meters.
    pub distance: f32,
}

/// Search bookkeeping for one node during one run.
#[derive(Clone, Copy, Debug)]
struct NodeState {
    g_value: f32,
    h_value: f32,
    /// Discovered (pushed onto the frontier at least once).
    visited: bool,
    parent: Option<NodeId>,
    /// Popped and expanded.
    closed: bool,
}

impl Default for NodeState {
    fn default() -> Self {
        NodeState {
            g_value: f32::INFINITY,
            h_value: 0.0,
            visited: false,
            parent: None,
            closed: false,
        }
    }
}

/// State of a single A* run.
struct Search<'m, M: MapModel> {
    model: &'m M,
    start: NodeId,
    end: NodeId,
    mode: ExpansionMode,
    states: Vec<NodeState>,
    open: OpenList,
    expanded: usize,
}

impl<'m, M: MapModel> Search<'m, M> {
    fn new(model: &'m M, start: NodeId, end: NodeId, mode: ExpansionMode) -> Self {
        Search {
            model,
            start,
            end,
            mode,
            states: vec![NodeState::default(); model.node_count()],
            open: OpenList::new(),
            expanded: 0,
        }
    }

    fn calculate_h_value(&self, node: NodeId) -> f32 {
        self.model.distance(node, self.end)
    }

    /// Discover the neighbors of `current` and push them onto the frontier.
    fn add_neighbors(&mut self, current: NodeId) {
        let model = self.model;
        let current_g = self.states[current.index()].g_value;

        for &neighbor in model.neighbors(current) {
            let g_value = current_g + model.distance(current, neighbor);
            let state = self.states[neighbor.index()];

            let accept = match self.mode {
                ExpansionMode::FirstVisit => !state.visited,
                ExpansionMode::Relaxing => !state.closed && g_value < state.g_value,
            };
            if !accept {
                continue;
            }

            let h_value = if state.visited {
                state.h_value
            } else {
                self.calculate_h_value(neighbor)
            };
            self.states[neighbor.index()] = NodeState {
                g_value,
                h_value,
                visited: true,
                parent: Some(current),
                closed: false,
            };
            self.open.push(neighbor, g_value + h_value);
        }
    }

    /// Pop the open node with the lowest g + h and mark it expanded.
    /// Entries for nodes that were already expanded are discarded.
    fn next_node(&mut self) -> Option<NodeId> {
        while let Some(entry) = self.open.pop() {
            let state = &mut self.states[entry.node.index()];
            if state.closed {
                continue;
            }
            state.closed = true;
            return Some(entry.node);
        }
        None
    }

    /// Follow parent links from `goal` back to the start anchor.
    ///
    /// A chain that ends before the start is logged and returned as far as
    /// it goes; the search never produces one.
    fn construct_final_path(&self, goal: NodeId) -> Route {
        let mut distance = 0.0f32;
        let mut ids = Vec::new();
        let mut current = goal;

        while current != self.start {
            let Some(parent) = self.states[current.index()].parent else {
                warn!(node = %current, start = %self.start, "parent chain ends before the start anchor");
                break;
            };
            distance += self.model.distance(current, parent);
            ids.push(current);
            current = parent;
        }
        ids.push(current);
        ids.reverse();

        let nodes = ids.iter().map(|&id| *self.model.node(id)).collect();
        Route {
            ids,
            nodes,
            distance: distance * self.model.metric_scale(),
        }
    }

    fn run(mut self) -> Option<Route> {
        let h_value = self.calculate_h_value(self.start);
        self.states[self.start.index()] = NodeState {
            g_value: 0.0,
            h_value,
            visited: true,
            parent: None,
            closed: false,
        };
        self.open.push(self.start, h_value);

        while let Some(current) = self.next_node() {
            if current == self.end {
                let route = self.construct_final_path(current);
                debug!(
                    expanded = self.expanded,
                    nodes = route.ids.len(),
                    distance = route.distance,
                    "route found"
                );
                return Some(route);
            }

            self.expanded += 1;
            trace!(
                node = %current,
                g = self.states[current.index()].g_value,
                h = self.states[current.index()].h_value,
                open = self.open.len(),
                "expanding"
            );
            self.add_neighbors(current);
        }

        debug!(expanded = self.expanded, "frontier exhausted, no route");
        None
    }
}

/// Run A* from `start` to `end` without touching the model.
///
/// Returns `None` if `end` is unreachable from `start`.
pub fn astar<M: MapModel>(
    model: &M,
    start: NodeId,
    end: NodeId,
    mode: ExpansionMode,
) -> Option<Route> {
    Search::new(model, start, end, mode).run()
}

/// Plans one route between two points picked on the map.
pub struct RoutePlanner<'a, M: MapModel> {
    model: &'a mut M,
    start: NodeId,
    end: NodeId,
    mode: ExpansionMode,
    distance: f32,
    status: SearchStatus,
}

impl<'a, M: MapModel> RoutePlanner<'a, M> {
    /// Resolve start and end anchors from coordinates given as percentages
    /// (0 to 100) of the map extent.
    ///
    /// Coordinates are not range-checked; whatever the model's closest-node
    /// lookup does with them stands. A lookup that finds nothing is reported
    /// as `PlannerError::NoClosestNode`.
    pub fn new(model: &'a mut M, start_x: f32, start_y: f32, end_x: f32, end_y: f32) -> Result<Self> {
        let (start_x, start_y) = (start_x / 100.0, start_y / 100.0);
        let (end_x, end_y) = (end_x / 100.0, end_y / 100.0);

        let start = model
            .find_closest_node(start_x, start_y)
            .ok_or(PlannerError::NoClosestNode { x: start_x, y: start_y })?;
        let end = model
            .find_closest_node(end_x, end_y)
            .ok_or(PlannerError::NoClosestNode { x: end_x, y: end_y })?;

        debug!(
            start = %start,
            start_pos = %model.node(start),
            end = %end,
            end_pos = %model.node(end),
            "resolved route anchors"
        );

        Ok(RoutePlanner {
            model,
            start,
            end,
            mode: ExpansionMode::default(),
            distance: 0.0,
            status: SearchStatus::Initialized,
        })
    }

    pub fn with_mode(mut self, mode: ExpansionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn start_node(&self) -> NodeId {
        self.start
    }

    pub fn end_node(&self) -> NodeId {
        self.end
    }

    pub fn mode(&self) -> ExpansionMode {
        self.mode
    }

    /// Length in meters of the last route found. Zero until a search succeeds.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn model(&self) -> &M {
        &*self.model
    }

    /// Straight-line distance from `node` to the end anchor, in model units.
    pub fn calculate_h_value(&self, node: NodeId) -> f32 {
        self.model.distance(node, self.end)
    }

    /// Run the search. On success the route is stored in the model's path
    /// slot and its length in `distance()`; otherwise both are unchanged.
    pub fn a_star_search(&mut self) -> SearchStatus {
        self.status = SearchStatus::Running;
        debug!(start = %self.start, end = %self.end, mode = ?self.mode, "starting A* search");

        match astar(&*self.model, self.start, self.end, self.mode) {
            Some(route) => {
                self.distance = route.distance;
                self.model.set_path(route.nodes);
                self.status = SearchStatus::Found;
            }
            None => {
                self.status = SearchStatus::Exhausted;
            }
        }
        self.status
    }
}
