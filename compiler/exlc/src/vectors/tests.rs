#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::{
    load_vector_file, parse_vectors, run_vectors, Section, Vector, VectorFileError,
    VectorFormatError, VectorOutcome,
};
use crate::config::VectorRunConfig;

const SAMPLE: &str = "\
# header comment
[parse]
a + b => +(a,b)
(a => error

[eval]
   # indented comment
1 + 2 => i(3)
length('=>') => i(2)
";

#[test]
fn test_parse_format() {
    let vectors = parse_vectors(SAMPLE).unwrap();
    assert_eq!(vectors.len(), 4);
    assert_eq!(
        vectors[0],
        Vector {
            section: Section::Parse,
            source: "a + b".to_string(),
            expected: "+(a,b)".to_string(),
            line: 3,
        }
    );
    assert_eq!(vectors[2].section, Section::Eval);
    assert_eq!(vectors[2].line, 8);
    // splits at the last arrow
    assert_eq!(vectors[3].source, "length('=>')");
    assert_eq!(vectors[3].expected, "i(2)");
}

#[test]
fn test_format_errors() {
    assert_eq!(
        parse_vectors("a => a"),
        Err(VectorFormatError::NoSection { line: 1 })
    );
    assert_eq!(
        parse_vectors("\n[lex]\n"),
        Err(VectorFormatError::UnknownSection {
            line: 2,
            name: "lex".to_string()
        })
    );
    assert_eq!(
        parse_vectors("[eval]\n1 + 2\n"),
        Err(VectorFormatError::MissingArrow { line: 2 })
    );
}

#[test]
fn test_run_sample() {
    let vectors = parse_vectors(SAMPLE).unwrap();
    for parallel in [false, true] {
        let config = VectorRunConfig {
            parallel,
            ..VectorRunConfig::default()
        };
        let summary = run_vectors(&vectors, &config);
        assert_eq!(summary.passed, 4);
        assert!(!summary.has_failures());
    }
}

#[test]
fn test_failures_report_actual() {
    let vectors = parse_vectors("[eval]\ni => i(41)\n[parse]\na b => error\n(a => (a)\n").unwrap();
    let summary = run_vectors(&vectors, &VectorRunConfig::default());
    assert_eq!(summary.failed, 3);
    let actual: Vec<_> = summary.failures().map(|r| r.outcome.clone()).collect();
    assert_eq!(
        actual,
        vec![
            VectorOutcome::Failed {
                actual: "i(42)".to_string()
            },
            VectorOutcome::Failed {
                actual: "list(a,b)".to_string()
            },
            VectorOutcome::Failed {
                actual: "error: unclosed `(`".to_string()
            },
        ]
    );
}

#[test]
fn test_filter() {
    let vectors = parse_vectors(SAMPLE).unwrap();
    let config = VectorRunConfig {
        filter: Some("+".to_string()),
        ..VectorRunConfig::default()
    };
    let summary = run_vectors(&vectors, &config);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.filtered, 2);
}

#[test]
fn test_load_vector_file_errors() {
    let missing = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/vectors/missing.vec");
    let err = load_vector_file(missing).unwrap_err();
    assert!(matches!(err, VectorFileError::NotFound { .. }), "{err:?}");
    assert_eq!(err.to_string(), format!("cannot find file '{missing}'"));

    // a TOML table header reads as an unknown section
    let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
    let err = load_vector_file(manifest).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("{manifest}: line 1: unknown section `[package]`")
    );
}

#[test]
fn test_load_vector_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/vectors/eval.vec");
    let vectors = load_vector_file(path).unwrap();
    assert!(vectors.iter().all(|v| v.section == Section::Eval));
}
