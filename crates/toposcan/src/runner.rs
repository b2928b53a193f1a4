//! Job entry point that hides the table and pool wiring.

use std::path::Path;
use std::sync::Arc;

use toposcan_config::PipelineConfig;
use toposcan_engine::{
    ClassifyJob, DecorateJob, DecorationPlan, Evaluator, ExtendJob, Pipeline, PrefixMode,
    RecordJob, Result, RunSummary,
};
use toposcan_store::InputFormat;

/// Which job a run performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSpec {
    Extend,
    Decorate {
        plan: DecorationPlan,
        prefix: PrefixMode,
    },
    Classify,
}

impl JobSpec {
    pub fn name(&self) -> &'static str {
        match self {
            JobSpec::Extend => "extend",
            JobSpec::Decorate { .. } => "decorate",
            JobSpec::Classify => "classify",
        }
    }
}

/// Builds the job with the configured tables, classifier and emit format.
pub fn build_job(spec: &JobSpec, config: &PipelineConfig, out_dir: &Path) -> Result<Arc<dyn RecordJob>> {
    let evaluator = Evaluator::from_config(config)?;
    let job: Arc<dyn RecordJob> = match spec {
        JobSpec::Extend => {
            let mut job = ExtendJob::new(evaluator, config.growth_table()?, out_dir);
            if let Some(emit) = config.emit {
                job = job.with_emit(emit);
            }
            Arc::new(job)
        }
        JobSpec::Decorate { plan, prefix } => {
            let mut job = DecorateJob::new(evaluator, config.growth_table()?, plan.clone(), out_dir)
                .with_prefix(*prefix);
            if let Some(emit) = config.emit {
                job = job.with_emit(emit);
            }
            Arc::new(job)
        }
        JobSpec::Classify => {
            let mut job = ClassifyJob::new(evaluator, out_dir);
            if let Some(emit) = config.emit {
                job = job.with_emit(emit);
            }
            Arc::new(job)
        }
    };
    Ok(job)
}

/// Runs one job over `input`, writing under `out_dir`.
pub fn run_job(
    spec: &JobSpec,
    input: &Path,
    format: InputFormat,
    out_dir: &Path,
    config: PipelineConfig,
) -> Result<RunSummary> {
    let job = build_job(spec, &config, out_dir)?;
    Pipeline::new(config, job).run(input, format, out_dir)
}
