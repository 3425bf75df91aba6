// Map model consumed by the route planner.
//
// `MapModel` is the collaborator contract: node lookup, neighbor discovery,
// distances, the metric scale, and the result slot the planner writes its
// path into. `RouteModel` is the in-memory implementation: nodes and roads
// stored in `Vec`s indexed by `NodeId`, with adjacency derived once from
// consecutive road nodes.
//
// Nodes are immutable once added. Search state never lives here; see
// `planner.rs` for the per-run state table.

use crate::types::{Node, NodeId};
use serde::{Deserialize, Serialize};

/// What the planner needs from a map.
pub trait MapModel {
    fn node_count(&self) -> usize;

    /// Get a node by ID. Panics on an ID the model never issued.
    fn node(&self, id: NodeId) -> &Node;

    /// Nodes directly reachable from `id`. Repeated calls return the same slice.
    fn neighbors(&self, id: NodeId) -> &[NodeId];

    /// Closest routable node to a normalized (0.0 to 1.0) position, or `None`
    /// if the model has nothing to route on.
    fn find_closest_node(&self, x: f32, y: f32) -> Option<NodeId>;

    /// Distance between two nodes in model units. Must be symmetric,
    /// non-negative and obey the triangle inequality.
    fn distance(&self, a: NodeId, b: NodeId) -> f32 {
        self.node(a).distance(self.node(b))
    }

    /// Conversion factor from model units to meters.
    fn metric_scale(&self) -> f32;

    /// Last path written by a successful search.
    fn path(&self) -> &[Node];

    fn set_path(&mut self, path: Vec<Node>);
}

/// Road classification. Footways are kept for completeness but never routed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadKind {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Service,
    Unclassified,
    Footway,
}

impl RoadKind {
    pub fn is_routable(self) -> bool {
        self != RoadKind::Footway
    }
}

/// A polyline of nodes sharing one road classification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Road {
    pub kind: RoadKind,
    pub nodes: Vec<NodeId>,
}

/// In-memory road network.
#[derive(Clone, Debug)]
pub struct RouteModel {
    nodes: Vec<Node>,
    roads: Vec<Road>,
    /// adjacency[node] = nodes one road segment away, in insertion order.
    adjacency: Vec<Vec<NodeId>>,
    /// on_road[node] = node belongs to at least one routable road.
    on_road: Vec<bool>,
    metric_scale: f32,
    path: Vec<Node>,
}

impl RouteModel {
    /// Create an empty model. `metric_scale` is meters per model unit.
    pub fn new(metric_scale: f32) -> Self {
        RouteModel {
            nodes: Vec::new(),
            roads: Vec::new(),
            adjacency: Vec::new(),
            on_road: Vec::new(),
            metric_scale,
            path: Vec::new(),
        }
    }

    /// Add a node at the given normalized position. Returns its ID.
    pub fn add_node(&mut self, x: f32, y: f32) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(x, y));
        self.adjacency.push(Vec::new());
        self.on_road.push(false);
        id
    }

    /// Add a road through `nodes` in order. Routable roads connect each
    /// consecutive pair in both directions. Returns the road index.
    pub fn add_road(&mut self, kind: RoadKind, nodes: &[NodeId]) -> usize {
        if kind.is_routable() {
            for &id in nodes {
                self.on_road[id.index()] = true;
            }
            for pair in nodes.windows(2) {
                self.link(pair[0], pair[1]);
            }
        }
        self.roads.push(Road {
            kind,
            nodes: nodes.to_vec(),
        });
        self.roads.len() - 1
    }

    /// Cut the segment between two nodes, both directions.
    /// Returns `false` if they were not connected.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let before = self.adjacency[a.index()].len();
        self.adjacency[a.index()].retain(|&n| n != b);
        self.adjacency[b.index()].retain(|&n| n != a);
        self.adjacency[a.index()].len() != before
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Build a `rows` x `cols` street grid spanning the unit square.
    ///
    /// Node IDs are assigned row-major (see `lattice_id`). Every row and every
    /// column is a residential road.
    pub fn lattice(rows: u32, cols: u32, metric_scale: f32) -> Self {
        let mut model = RouteModel::new(metric_scale);
        let coord = |i: u32, n: u32| {
            if n > 1 {
                i as f32 / (n - 1) as f32
            } else {
                0.5
            }
        };

        for row in 0..rows {
            for col in 0..cols {
                model.add_node(coord(col, cols), coord(row, rows));
            }
        }

        for row in 0..rows {
            let ids: Vec<NodeId> = (0..cols).map(|col| Self::lattice_id(cols, row, col)).collect();
            model.add_road(RoadKind::Residential, &ids);
        }
        for col in 0..cols {
            let ids: Vec<NodeId> = (0..rows).map(|row| Self::lattice_id(cols, row, col)).collect();
            model.add_road(RoadKind::Residential, &ids);
        }

        model
    }

    /// Node ID of a lattice intersection.
    pub fn lattice_id(cols: u32, row: u32, col: u32) -> NodeId {
        NodeId(row * cols + col)
    }

    fn link(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        if !self.adjacency[a.index()].contains(&b) {
            self.adjacency[a.index()].push(b);
        }
        if !self.adjacency[b.index()].contains(&a) {
            self.adjacency[b.index()].push(a);
        }
    }
}

impl MapModel for RouteModel {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.adjacency[id.index()]
    }

    fn find_closest_node(&self, x: f32, y: f32) -> Option<NodeId> {
        let target = Node::new(x, y);
        self.nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| self.on_road[*i])
            .min_by(|(_, a), (_, b)| a.distance(&target).total_cmp(&b.distance(&target)))
            .map(|(i, _)| NodeId(i as u32))
    }

    fn metric_scale(&self) -> f32 {
        self.metric_scale
    }

    fn path(&self) -> &[Node] {
        &self.path
    }

    fn set_path(&mut self, path: Vec<Node>) {
        self.path = path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_assigns_sequential_ids() {
        let mut model = RouteModel::new(1.0);
        assert_eq!(model.add_node(0.0, 0.0), NodeId(0));
        assert_eq!(model.add_node(0.5, 0.0), NodeId(1));
        assert_eq!(model.add_node(1.0, 0.0), NodeId(2));
        assert_eq!(model.node_count(), 3);
    }

    #[test]
    fn road_links_consecutive_nodes_both_ways() {
        let mut model = RouteModel::new(1.0);
        let a = model.add_node(0.0, 0.0);
        let b = model.add_node(0.5, 0.0);
        let c = model.add_node(1.0, 0.0);
        model.add_road(RoadKind::Primary, &[a, b, c]);

        assert_eq!(model.neighbors(a), &[b]);
        assert_eq!(model.neighbors(b), &[a, c]);
        assert_eq!(model.neighbors(c), &[b]);
    }

    #[test]
    fn overlapping_roads_do_not_duplicate_neighbors() {
        let mut model = RouteModel::new(1.0);
        let a = model.add_node(0.0, 0.0);
        let b = model.add_node(1.0, 0.0);
        model.add_road(RoadKind::Primary, &[a, b]);
        model.add_road(RoadKind::Service, &[b, a]);
        assert_eq!(model.neighbors(a), &[b]);
        assert_eq!(model.neighbors(b), &[a]);
    }

    #[test]
    fn footways_are_not_routable() {
        let mut model = RouteModel::new(1.0);
        let a = model.add_node(0.0, 0.0);
        let b = model.add_node(1.0, 0.0);
        model.add_road(RoadKind::Footway, &[a, b]);

        assert!(model.neighbors(a).is_empty());
        assert_eq!(model.find_closest_node(0.0, 0.0), None);
        assert_eq!(model.roads().len(), 1);
    }

    #[test]
    fn closest_node_ignores_nodes_off_road() {
        let mut model = RouteModel::new(1.0);
        let a = model.add_node(0.0, 0.0);
        let b = model.add_node(1.0, 1.0);
        let _stray = model.add_node(0.5, 0.5);
        model.add_road(RoadKind::Residential, &[a, b]);

        assert_eq!(model.find_closest_node(0.45, 0.45), Some(a));
        assert_eq!(model.find_closest_node(0.9, 0.8), Some(b));
    }

    #[test]
    fn closest_node_on_empty_model() {
        let model = RouteModel::new(1.0);
        assert_eq!(model.find_closest_node(0.5, 0.5), None);
    }

    #[test]
    fn remove_edge_cuts_both_directions() {
        let mut model = RouteModel::new(1.0);
        let a = model.add_node(0.0, 0.0);
        let b = model.add_node(1.0, 0.0);
        model.add_road(RoadKind::Residential, &[a, b]);

        assert!(model.remove_edge(b, a));
        assert!(model.neighbors(a).is_empty());
        assert!(model.neighbors(b).is_empty());
        assert!(!model.remove_edge(a, b));
    }

    #[test]
    fn lattice_layout() {
        let model = RouteModel::lattice(3, 4, 100.0);
        assert_eq!(model.node_count(), 12);
        assert_eq!(model.roads().len(), 7);

        let corner = RouteModel::lattice_id(4, 2, 3);
        assert_eq!(*model.node(corner), Node::new(1.0, 1.0));

        let middle = RouteModel::lattice_id(4, 1, 1);
        assert_eq!(model.neighbors(middle).len(), 4);
        assert_eq!(model.neighbors(RouteModel::lattice_id(4, 0, 0)).len(), 2);
    }

    #[test]
    fn distance_defaults_to_node_distance() {
        let mut model = RouteModel::new(1.0);
        let a = model.add_node(0.0, 0.0);
        let b = model.add_node(0.6, 0.8);
        assert!((model.distance(a, b) - 1.0).abs() < 1e-6);
    }
}
