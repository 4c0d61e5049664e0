//! Vector execution.

use std::time::{Duration, Instant};

use exl_eval::{MapContext, NodeEval};
use rayon::prelude::*;

use super::{fixed_context, Section, Vector};
use crate::config::VectorRunConfig;

/// What running one vector produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VectorOutcome {
    Passed,
    Failed { actual: String },
}

impl VectorOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, VectorOutcome::Passed)
    }
}

#[derive(Clone, Debug)]
pub struct VectorResult {
    pub vector: Vector,
    pub outcome: VectorOutcome,
}

/// Results of one run, in input order.
#[derive(Clone, Debug, Default)]
pub struct VectorSummary {
    pub results: Vec<VectorResult>,
    pub passed: usize,
    pub failed: usize,
    /// Vectors skipped by the filter.
    pub filtered: usize,
    pub duration: Duration,
}

impl VectorSummary {
    fn add(&mut self, result: VectorResult) {
        if result.outcome.is_passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &VectorResult> {
        self.results
            .iter()
            .filter(|result| !result.outcome.is_passed())
    }
}

/// Run `vectors`, each against a fresh parse.
pub fn run_vectors(vectors: &[Vector], config: &VectorRunConfig) -> VectorSummary {
    let start = Instant::now();
    let selected: Vec<&Vector> = vectors
        .iter()
        .filter(|vector| {
            config
                .filter
                .as_deref()
                .is_none_or(|filter| vector.source.contains(filter))
        })
        .collect();
    let ctx = fixed_context();

    let results = if config.parallel {
        run_parallel(&selected, &ctx)
    } else {
        selected.iter().map(|vector| run_vector(vector, &ctx)).collect()
    };

    let mut summary = VectorSummary {
        filtered: vectors.len() - selected.len(),
        ..VectorSummary::default()
    };
    for result in results {
        summary.add(result);
    }
    summary.duration = start.elapsed();
    tracing::debug!(
        passed = summary.passed,
        failed = summary.failed,
        filtered = summary.filtered,
        "vector run finished"
    );
    summary
}

/// Run on a scoped pool so no global-pool threads outlive the call.
fn run_parallel(vectors: &[&Vector], ctx: &MapContext) -> Vec<VectorResult> {
    rayon::ThreadPoolBuilder::new()
        .stack_size(8 * 1024 * 1024)
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| {
                vectors
                    .par_iter()
                    .map(|vector| run_vector(vector, ctx))
                    .collect::<Vec<_>>()
            })
        })
        .unwrap_or_else(|e| {
            tracing::warn!("failed to create thread pool ({e}), running sequentially");
            vectors.iter().map(|vector| run_vector(vector, ctx)).collect()
        })
}

fn run_vector(vector: &Vector, ctx: &MapContext) -> VectorResult {
    let parsed = exl_parse::parse(&vector.source);
    let passed_as_error = vector.section == Section::Parse && vector.expected == "error";
    let actual = match (&parsed, vector.section) {
        (Err(_), _) if passed_as_error => None,
        (Err(err), _) => Some(format!("error: {err}")),
        (Ok(tree), Section::Parse) => Some(tree.to_string()),
        (Ok(tree), Section::Eval) => Some(tree.eval(ctx).to_string()),
    };
    let outcome = match actual {
        None => VectorOutcome::Passed,
        Some(actual) if actual == vector.expected => VectorOutcome::Passed,
        Some(actual) => VectorOutcome::Failed { actual },
    };
    if !outcome.is_passed() {
        tracing::debug!(line = vector.line, source = %vector.source, "vector failed");
    }
    VectorResult {
        vector: vector.clone(),
        outcome,
    }
}
