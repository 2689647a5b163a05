//! `ta-network`: road network, link cost model, and shortest-path trees.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`network`] | `PhyNetwork` (arena + CSR), `NetworkBuilder`, connectors     |
//! | [`vdf`]     | `VdfPeriod` BPR volume-delay model, `VdfSpec` raw parameters |
//! | [`router`]  | `ShortestPathTree`: Dijkstra labels over a cost view        |
//! | [`loader`]  | GMNS-style `node.csv` / `link.csv` ingestion                 |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                           |

pub mod error;
pub mod loader;
pub mod network;
pub mod router;
pub mod vdf;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use loader::{load_links_reader, load_network_dir, load_nodes_reader};
pub use network::{
    DEFAULT_ZONE_ID, Link, LinkSpec, NetworkBuilder, Node, NodeSpec, PhyNetwork, Zone,
};
pub use router::ShortestPathTree;
pub use vdf::{VdfPeriod, VdfSpec};
