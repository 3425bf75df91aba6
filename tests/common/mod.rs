use route_planner::{MapModel, Node, NodeId, RoadKind, RouteModel};

/// Small deterministic generator for synthetic maps (64-bit LCG)
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    /// Uniform in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() >> 33) as usize % n
    }
}

/// Random connected road network: a random spanning tree over `n` scattered
/// nodes plus `extra` random two-node roads.
pub fn random_model(seed: u64, n: usize, extra: usize) -> RouteModel {
    let mut rng = Lcg::new(seed);
    let mut model = RouteModel::new(1000.0);
    let ids: Vec<NodeId> = (0..n)
        .map(|_| {
            let x = rng.next_f32();
            let y = rng.next_f32();
            model.add_node(x, y)
        })
        .collect();

    for i in 1..n {
        let j = rng.below(i);
        model.add_road(RoadKind::Residential, &[ids[j], ids[i]]);
    }
    for _ in 0..extra {
        let a = rng.below(n);
        let b = rng.below(n);
        model.add_road(RoadKind::Tertiary, &[ids[a], ids[b]]);
    }
    model
}

/// True shortest distances in model units between every pair (Floyd-Warshall)
pub fn all_pairs_shortest(model: &RouteModel) -> Vec<Vec<f32>> {
    let n = model.node_count();
    let mut dist = vec![vec![f32::INFINITY; n]; n];
    for i in 0..n {
        dist[i][i] = 0.0;
        let id = NodeId(i as u32);
        for &neighbor in model.neighbors(id) {
            dist[i][neighbor.index()] = model.distance(id, neighbor);
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let via = dist[i][k] + dist[k][j];
                if via < dist[i][j] {
                    dist[i][j] = via;
                }
            }
        }
    }
    dist
}

/// Length in meters of a path given as node snapshots
pub fn path_length(model: &impl MapModel, path: &[Node]) -> f32 {
    let units: f32 = path.windows(2).map(|pair| pair[0].distance(&pair[1])).sum();
    units * model.metric_scale()
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3 * a.abs().max(b.abs()).max(1.0)
}
