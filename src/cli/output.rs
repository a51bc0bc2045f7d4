//! Output formatting for the CLI.
//!
//! A [`LogCollector`] accumulates the report lines of a whole run and is
//! flushed once, to the output log and optionally to stdout.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use crate::cli::args::{BoolmergeArgs, OutputFormat};
use crate::error::Result;
use crate::report::{EvaluationReport, QueryReport, RunReport, TermPostings, TopKReport};

/// Collects report lines for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogCollector {
    lines: Vec<String>,
}

impl LogCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        LogCollector { lines: Vec::new() }
    }

    /// Append a raw line.
    pub fn log<S: Into<String>>(&mut self, line: S) {
        self.lines.push(line.into());
    }

    /// Append `key: a, b, c`.
    pub fn log_list<T: Display>(&mut self, key: &str, items: &[T]) {
        self.lines.push(format!("{key}: {}", join(items)));
    }

    /// Append the header of a reported function.
    pub fn function<T: Display>(&mut self, name: &str, args: &[T]) {
        self.lines.push(format!("FUNCTION: {name} {}", join(args)));
    }

    pub fn result<T: Display>(&mut self, items: &[T]) {
        self.log_list("Result", items);
    }

    pub fn found(&mut self, documents: usize) {
        self.lines.push(format!("{documents} documents are found"));
    }

    pub fn comparisons(&mut self, comparisons: u64) {
        self.lines.push(format!("{comparisons} comparisons are made"));
    }

    pub fn optimized_comparisons(&mut self, comparisons: u64) {
        self.lines
            .push(format!("{comparisons} comparisons are made with optimization"));
    }

    pub fn time(&mut self, seconds: u64) {
        self.lines.push(format!("{seconds} seconds are used"));
    }

    pub fn not_found(&mut self) {
        self.lines.push("terms not found".to_string());
    }

    /// Collected lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines, each terminated by a newline.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a run report in the line oriented log format.
pub fn render_human(report: &RunReport) -> LogCollector {
    let mut collector = LogCollector::new();
    render_top_k(&mut collector, &report.top_k);
    for query in &report.queries {
        render_query(&mut collector, query);
    }
    collector
}

fn render_top_k(collector: &mut LogCollector, top_k: &TopKReport) {
    collector.function("getTopK", &[top_k.k]);
    collector.result(&top_k.terms);
}

fn render_query(collector: &mut LogCollector, query: &QueryReport) {
    for postings in &query.postings {
        render_postings(collector, postings);
    }
    for evaluation in &query.evaluations {
        render_evaluation(collector, &query.terms, evaluation);
    }
}

fn render_postings(collector: &mut LogCollector, postings: &TermPostings) {
    collector.function("getPostings", &[&postings.term]);
    match &postings.by_document_id {
        Some(by_document_id) => {
            collector.log_list("Ordered by doc IDs", by_document_id);
            if let Some(by_frequency) = &postings.by_frequency {
                collector.log_list("Ordered by TF", by_frequency);
            }
        }
        None => collector.log("term not found"),
    }
}

fn render_evaluation(collector: &mut LogCollector, terms: &[String], evaluation: &EvaluationReport) {
    collector.function(evaluation.function_name(), terms);

    // An empty result is reported like a missing term.
    let Some(result) = evaluation.matched() else {
        collector.not_found();
        return;
    };

    collector.found(result.len());
    collector.comparisons(result.comparisons());
    collector.time(result.elapsed_seconds());
    if let Some(optimized) = result.optimized_comparisons() {
        collector.optimized_comparisons(optimized);
    }
    collector.result(result.document_ids());
}

/// Render a run report in the format selected on the command line.
pub fn render_report(report: &RunReport, args: &BoolmergeArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(render_human(report).to_text()),
        OutputFormat::Json => output_json(report, args.pretty),
    }
}

fn output_json(report: &RunReport, pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    json.push('\n');
    Ok(json)
}

/// Write the rendered report to the output log, creating or truncating it.
pub fn write_report<P: AsRef<Path>>(path: P, rendered: &str) -> Result<()> {
    fs::write(path, rendered)?;
    Ok(())
}
