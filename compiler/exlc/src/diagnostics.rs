//! Source-snippet rendering of parse errors.

use std::ops::Range;

use ariadne::{Config, Label, Report, ReportKind, Source};
use exl_parse::ParseError;

/// Render `err` against the expression it came from.
///
/// Zero-width spans (an operand missing at the end of input, say) are
/// widened to one column so the label has something to point at.
pub fn render_parse_error(source: &str, err: &ParseError, color: bool) -> String {
    let span = err.span().to_range();
    let mut report = Report::<Range<usize>>::build(ReportKind::Error, (), span.start)
        .with_config(Config::default().with_color(color))
        .with_message(err.to_string());
    if !source.is_empty() {
        report = report.with_label(Label::new(label_range(source, span)).with_message(label(err)));
    }

    let mut out = Vec::new();
    if report.finish().write(Source::from(source), &mut out).is_err() {
        return format!("error: {err}");
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn label_range(source: &str, span: Range<usize>) -> Range<usize> {
    let start = span.start.min(source.len());
    let end = span.end.min(source.len());
    if start < end {
        start..end
    } else if start < source.len() {
        start..start + 1
    } else {
        start.saturating_sub(1)..start
    }
}

fn label(err: &ParseError) -> String {
    match (err, err.argument()) {
        (ParseError::Unclosed { .. }, _) => "opened here".to_string(),
        (ParseError::Empty { .. }, _) => "nothing to parse".to_string(),
        (_, Some(text)) => format!("`{text}`"),
        (_, None) => "here".to_string(),
    }
}
