//! Pairwise compatibility: the hard-filter gate, the weighted scorer and the
//! index answering ranked per-slot queries over every admissible pair.

pub mod cache;
pub mod edges;
pub mod gate;
pub mod index;
pub mod palette;
pub mod report;
pub mod scoring;
pub mod store;

pub use cache::TtlCache;
pub use edges::{CompatibilityEdge, CrossScores, EdgeSet, PairKey, ScoredSku, SlotEdges};
pub use gate::{CompatibilityGate, GateRejection};
pub use index::{
    build_index, CompatibilityIndex, CrossScoreBatch, IndexBuild, DEFAULT_CANDIDATES_PER_SLOT,
};
pub use report::{BuildReport, ScoreBucket};
pub use scoring::{PairScorer, ScoreBreakdown, WEIGHTS};
pub use store::{EdgeStore, InMemoryEdgeStore, IndexStats, RankedQuery, SqliteEdgeStore, StoreError};
