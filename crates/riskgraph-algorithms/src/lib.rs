pub mod common;
pub mod centrality;

pub use common::{GraphView, NodeId};
pub use centrality::{degree, degree_centrality, DegreeResult};
