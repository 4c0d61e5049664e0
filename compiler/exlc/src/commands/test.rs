//! `exl test`: run golden-vector files.

use crate::config::VectorRunConfig;
use crate::vectors::{load_vector_file, run_vectors, VectorOutcome};

/// Run every vector file in `paths` and print a summary.
///
/// A file that cannot be loaded is reported and skipped. Exits with
/// status 1 if any file was skipped or any vector fails.
pub fn run_vector_files(paths: &[String], config: &VectorRunConfig) {
    let mut total_passed = 0;
    let mut total_failed = 0;
    let mut unreadable = 0;

    for path in paths {
        let vectors = match load_vector_file(path) {
            Ok(vectors) => vectors,
            Err(err) => {
                eprintln!("error: {err}");
                unreadable += 1;
                continue;
            }
        };

        let summary = run_vectors(&vectors, config);
        for result in &summary.results {
            let vector = &result.vector;
            match &result.outcome {
                VectorOutcome::Passed if config.verbose => {
                    println!("  ok    {path}:{} [{}] {}", vector.line, vector.section, vector.source);
                }
                VectorOutcome::Passed => {}
                VectorOutcome::Failed { actual } => {
                    println!("  FAIL  {path}:{} [{}] {}", vector.line, vector.section, vector.source);
                    println!("        expected: {}", vector.expected);
                    println!("        actual:   {actual}");
                }
            }
        }
        println!(
            "{path}: {} passed, {} failed, {} filtered ({:?})",
            summary.passed, summary.failed, summary.filtered, summary.duration
        );
        total_passed += summary.passed;
        total_failed += summary.failed;
    }

    if paths.len() > 1 {
        println!();
        println!("Total: {total_passed} passed, {total_failed} failed, {unreadable} unreadable files");
    }
    if total_failed > 0 || unreadable > 0 {
        std::process::exit(1);
    }
}
