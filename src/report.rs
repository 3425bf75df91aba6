use crate::model::MapModel;
use crate::planner::{ExpansionMode, RoutePlanner, SearchStatus};
use crate::types::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::fs;

/// Outcome of one planning request, ready to print or save
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteReport {
    pub status: SearchStatus,
    pub expansion: ExpansionMode,
    /// Anchor node IDs and positions
    pub start_id: NodeId,
    pub start: Node,
    pub end_id: NodeId,
    pub end: Node,
    /// Route nodes from start to end; empty when no route was found
    pub path: Vec<Node>,
    /// Route length in meters
    pub distance_m: f32,
}

impl RouteReport {
    /// Snapshot a planner after its search has run
    pub fn from_planner<M: MapModel>(planner: &RoutePlanner<'_, M>) -> Self {
        let model = planner.model();
        let path = match planner.status() {
            SearchStatus::Found => model.path().to_vec(),
            _ => Vec::new(),
        };

        RouteReport {
            status: planner.status(),
            expansion: planner.mode(),
            start_id: planner.start_node(),
            start: *model.node(planner.start_node()),
            end_id: planner.end_node(),
            end: *model.node(planner.end_node()),
            path,
            distance_m: planner.distance(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        let json = self.to_json_pretty()?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        match self.status {
            SearchStatus::Found => format!(
                "Route {} {} -> {} {}: {} nodes, {:.1} m",
                self.start_id,
                self.start,
                self.end_id,
                self.end,
                self.path.len(),
                self.distance_m
            ),
            _ => format!(
                "No route from {} {} to {} {}",
                self.start_id, self.start, self.end_id, self.end
            ),
        }
    }
}
