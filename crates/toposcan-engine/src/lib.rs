//! Generation and classification runs for toposcan.
//!
//! A run reads configurations with `toposcan-store`, hands them to a
//! [`WorkerPool`] in fixed-size batches, and lets one [`RecordJob`] turn each
//! record into sharded output:
//!
//! - [`ExtendJob`]: grow by one block at the trailing end
//! - [`DecorateJob`]: hang single side links or instantons off node blocks
//! - [`ClassifyJob`]: classify records as given and write their forms
//!
//! Derived configurations are deduplicated per run through a [`SeenSet`].

pub mod decoration;
pub mod dedup;
pub mod error;
pub mod evaluator;
pub mod extension;
pub mod jobs;
pub mod output;
pub mod pipeline;
pub mod pool;
pub mod shard;
pub mod stats;

pub use decoration::{decorate, Decorated, DecorationPlan, KindSelection, NodeSelection};
pub use dedup::SeenSet;
pub use error::{EngineError, Result};
pub use evaluator::{Evaluation, Evaluator};
pub use extension::{extend_one_step, next_kind};
pub use jobs::{ClassifyJob, DecorateJob, ExtendJob, JobContext, RecordJob};
pub use output::OutputBuffer;
pub use pipeline::{Pipeline, RunSummary};
pub use pool::{Batch, PoolOptions, WorkerPool};
pub use shard::{matrix_path, shard_path, KindTag, PrefixMode, PREFIX_LEN};
pub use stats::{RunSnapshot, RunStatistics};
