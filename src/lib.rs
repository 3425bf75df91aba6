pub mod config;
pub mod error;
pub mod frontier;
pub mod input;
pub mod model;
pub mod planner;
pub mod report;
pub mod types;

pub use error::{PlannerError, Result};
pub use model::{MapModel, RoadKind, RouteModel};
pub use planner::{astar, ExpansionMode, Route, RoutePlanner, SearchStatus};
pub use report::RouteReport;
pub use types::{Node, NodeId};
