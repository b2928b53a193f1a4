//! toposcan - enumerate and classify glued block configurations
//!
//! Blocks are glued into a graph, the graph composes one integer
//! intersection form, and the form's spectrum decides whether the
//! configuration is an SCFT, an LST, or neither.
//!
//! # Example
//!
//! ```rust
//! use toposcan::prelude::*;
//!
//! let mut graph = GluingGraph::new();
//! let a = graph.add(BlockKind::Node, 1).unwrap();
//! let b = graph.add(BlockKind::Node, 1).unwrap();
//! graph.connect(a, b).unwrap();
//!
//! let form = graph.compose();
//! assert_eq!(SpectralClassifier::new().classify(&form), Category::Lst);
//! ```

pub use toposcan_config as config;
pub use toposcan_core as topology;
pub use toposcan_engine as engine;
pub use toposcan_store as store;

mod runner;
pub use runner::{build_job, run_job, JobSpec};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use toposcan_config::{EmitFormat, PipelineConfig, ThreadCount};
    pub use toposcan_core::{
        Block, BlockKind, Category, ChainKind, ClassifierStrategy, Configuration, DecorationKind,
        GluingGraph, GrowthTable, IntersectionForm, Port, RuleTable, SpectralClassifier,
        TopoError,
    };
    pub use toposcan_engine::{
        DecorationPlan, EngineError, KindSelection, NodeSelection, PrefixMode, RunSummary,
    };
    pub use toposcan_store::{parse_line, to_line, InputFormat, RecordDb};

    pub use super::{run_job, JobSpec};
}
