//! Per-record work run by the pool: extend, decorate, classify.
//!
//! Every job catches its own failures at the one-configuration boundary:
//! a rejected gluing is logged with the record's origin, counted, and the
//! job moves on.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use toposcan_config::EmitFormat;
use toposcan_core::{write_matrix_rows, Configuration, GrowthTable};
use toposcan_store::{to_line, InputRecord};
use tracing::warn;

use crate::decoration::{decorate, DecorationPlan};
use crate::dedup::SeenSet;
use crate::evaluator::{Evaluation, Evaluator};
use crate::extension::extend_one_step;
use crate::output::OutputBuffer;
use crate::shard::{matrix_path, shard_path, KindTag, PrefixMode};
use crate::stats::RunStatistics;

/// Shared state a job writes into.
#[derive(Debug, Clone, Copy)]
pub struct JobContext<'a> {
    pub output: &'a OutputBuffer,
    pub stats: &'a RunStatistics,
}

/// Work applied to every input record.
pub trait RecordJob: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Processes one record. Never fails; failures are counted in `ctx`.
    fn process(&self, record: &InputRecord, ctx: JobContext<'_>);
}

fn render(emit: EmitFormat, line: &str, eval: &Evaluation) -> String {
    match emit {
        EmitFormat::Line => format!("{}\n", line),
        EmitFormat::Matrix => {
            let mut text = String::new();
            write_matrix_rows(&mut text, &eval.form);
            text
        }
    }
}

/// What happened to one derived configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Offered {
    Duplicate,
    Saved,
    Unclassified,
    Failed,
}

impl Offered {
    /// Counts towards a decoration cap. A duplicate only arises from a
    /// repeated base, whose first walk already produced every output.
    fn is_kept(self) -> bool {
        !matches!(self, Offered::Unclassified)
    }
}

/// Dedups, classifies and shards derived configurations.
#[derive(Debug)]
struct DerivedSink {
    evaluator: Evaluator,
    seen: SeenSet,
    out_dir: PathBuf,
    emit: EmitFormat,
    prefix: PrefixMode,
}

impl DerivedSink {
    fn new(evaluator: Evaluator, out_dir: PathBuf) -> Self {
        Self {
            evaluator,
            seen: SeenSet::new(),
            out_dir,
            emit: EmitFormat::Line,
            prefix: PrefixMode::None,
        }
    }

    fn offer(
        &self,
        origin: &str,
        candidate: &Configuration,
        tag: Option<KindTag>,
        ctx: JobContext<'_>,
    ) -> Offered {
        ctx.stats.record_derived();
        let line = to_line(candidate);
        if !self.seen.insert(&line) {
            ctx.stats.record_duplicate();
            return Offered::Duplicate;
        }
        match self.evaluator.evaluate(candidate) {
            Ok(eval) => {
                ctx.stats.record_category(eval.category);
                if !eval.category.is_classified() {
                    return Offered::Unclassified;
                }
                let path = shard_path(&self.out_dir, eval.category, candidate, self.prefix, tag);
                ctx.output.append(path, &render(self.emit, &line, &eval));
                Offered::Saved
            }
            Err(e) => {
                ctx.stats.record_failure();
                warn!(
                    event = "candidate_failed",
                    origin = %origin,
                    configuration = %line,
                    error = %e,
                );
                Offered::Failed
            }
        }
    }
}

/// Grows every record by one block and saves the SCFT and LST results.
#[derive(Debug)]
pub struct ExtendJob {
    growth: Arc<GrowthTable>,
    sink: DerivedSink,
}

impl ExtendJob {
    pub fn new(evaluator: Evaluator, growth: Arc<GrowthTable>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            growth,
            sink: DerivedSink::new(evaluator, out_dir.into()),
        }
    }

    pub fn with_emit(mut self, emit: EmitFormat) -> Self {
        self.sink.emit = emit;
        self
    }

    /// Canonical lines seen so far in this run.
    pub fn seen(&self) -> &SeenSet {
        &self.sink.seen
    }
}

impl RecordJob for ExtendJob {
    fn name(&self) -> &'static str {
        "extend"
    }

    fn process(&self, record: &InputRecord, ctx: JobContext<'_>) {
        let base = &record.configuration;
        if !base.has_unimodal_nodes() {
            ctx.stats.record_rejected();
            return;
        }
        for candidate in extend_one_step(base, &self.growth) {
            self.sink.offer(&record.origin, &candidate, None, ctx);
        }
    }
}

/// Hangs single decorations off every record and saves the SCFT and LST
/// results.
#[derive(Debug)]
pub struct DecorateJob {
    growth: Arc<GrowthTable>,
    plan: DecorationPlan,
    sink: DerivedSink,
}

impl DecorateJob {
    pub fn new(
        evaluator: Evaluator,
        growth: Arc<GrowthTable>,
        plan: DecorationPlan,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            growth,
            plan,
            sink: DerivedSink::new(evaluator, out_dir.into()),
        }
    }

    pub fn with_emit(mut self, emit: EmitFormat) -> Self {
        self.sink.emit = emit;
        self
    }

    pub fn with_prefix(mut self, prefix: PrefixMode) -> Self {
        self.sink.prefix = prefix;
        self
    }

    pub fn seen(&self) -> &SeenSet {
        &self.sink.seen
    }
}

impl RecordJob for DecorateJob {
    fn name(&self) -> &'static str {
        "decorate"
    }

    fn process(&self, record: &InputRecord, ctx: JobContext<'_>) {
        for group in decorate(&record.configuration, &self.growth, &self.plan) {
            let mut kept = 0;
            for candidate in &group.candidates {
                if group.cap.is_some_and(|cap| kept >= cap) {
                    break;
                }
                if self
                    .sink
                    .offer(&record.origin, candidate, Some(group.tag), ctx)
                    .is_kept()
                {
                    kept += 1;
                }
            }
        }
    }
}

/// Classifies records as they are and appends SCFT and LST forms to
/// `IF_SCFT.txt` and `IF_LST.txt`.
#[derive(Debug)]
pub struct ClassifyJob {
    evaluator: Evaluator,
    out_dir: PathBuf,
    emit: EmitFormat,
}

impl ClassifyJob {
    pub fn new(evaluator: Evaluator, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            evaluator,
            out_dir: out_dir.into(),
            emit: EmitFormat::Matrix,
        }
    }

    pub fn with_emit(mut self, emit: EmitFormat) -> Self {
        self.emit = emit;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl RecordJob for ClassifyJob {
    fn name(&self) -> &'static str {
        "classify"
    }

    fn process(&self, record: &InputRecord, ctx: JobContext<'_>) {
        match self.evaluator.evaluate(&record.configuration) {
            Ok(eval) => {
                ctx.stats.record_category(eval.category);
                if eval.category.is_classified() {
                    let line = to_line(&record.configuration);
                    let path = matrix_path(&self.out_dir, eval.category);
                    ctx.output.append(path, &render(self.emit, &line, &eval));
                }
            }
            Err(e) => {
                ctx.stats.record_failure();
                warn!(
                    event = "record_failed",
                    origin = %record.origin,
                    configuration = %record.configuration,
                    error = %e,
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
