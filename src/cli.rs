//! Minimal CLI: validate JSON documents against the bundled demo schema
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use json_structure::{Diagnostic, Node, Options};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// check the structure of JSON documents and print the diagnostic trail
#[derive(Parser, Debug)]
#[command(name = "json-structure", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// validate the demo payload (or the given inputs) against the demo schema
    Demo(DemoOut),
    /// print the demo schema outline
    Show,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0)
    #[arg(long)]
    json_pointer: Option<String>,

    /// Literal paths or quoted glob patterns. The bundled payload is used if omitted
    #[arg(long, short, num_args = 1..)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct Switches {
    /// let arrays satisfy `object`
    #[arg(long, default_value_t = false)]
    arrays_are_objects: bool,

    /// render non-string values to text before pattern matching
    #[arg(long, default_value_t = false)]
    coerce_patterns: bool,

    /// options object, e.g. '{"arraysAreObjects": true}'. Flags override it
    #[arg(long)]
    options: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(clap::Parser, Debug)]
struct DemoOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    switches: Switches,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// only print failing diagnostics
    #[arg(long)]
    failures_only: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    input: String,
    valid: bool,
    results: Vec<Diagnostic>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Vec<(String, Value)>> {
        if self.input.is_empty() {
            return Ok(vec![("<demo payload>".to_string(), crate::demo::payload())]);
        }
        let mut out = Vec::new();
        for source_path in resolve_file_path_patterns(&self.input)? {
            let label = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {label}"))?;
            let json_value = serde_json::from_str::<Value>(&source)
                .with_context(|| format!("failed to parse JSON source file {label}"))?;
            let json_value = match self.json_pointer.as_deref() {
                None => json_value,
                Some(ptr) => match json_value.pointer(ptr) {
                    Some(x) => x.clone(),
                    None => bail!("JSON pointer {ptr} selects nothing in {label}"),
                },
            };
            out.push((label, json_value));
        }
        Ok(out)
    }
}

impl Switches {
    fn resolve(&self) -> Result<Options> {
        let mut options = match self.options.as_deref() {
            None => Options::default(),
            Some(src) => serde_json::from_str::<Options>(src)
                .with_context(|| format!("invalid options object {src}"))?,
        };
        if self.arrays_are_objects {
            options.arrays_are_objects = true;
        }
        if self.coerce_patterns {
            options.pattern_requires_string = false;
        }
        Ok(options)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Returns whether every input was valid.
    pub fn run(&self) -> Result<bool> {
        match &self.cmd {
            Command::Demo(target) => {
                let mut schema = crate::demo::schema()?;
                schema.set_options(target.switches.resolve()?);
                let documents = target.input_settings.load()?;
                tracing::debug!(inputs = documents.len(), options = ?schema.options(), "validating");

                // one Schema per document; the node graph is shared
                let reports = documents
                    .par_iter()
                    .map(|(label, value)| {
                        let mut schema = schema.clone();
                        let valid = schema.test(value);
                        Report { input: label.clone(), valid, results: schema.into_results() }
                    })
                    .collect::<Vec<_>>();

                match target.format {
                    Format::Json => {
                        println!("{}", serde_json::to_string_pretty(&reports)?);
                    }
                    Format::Text => {
                        for report in &reports {
                            print_report(report, target.failures_only);
                        }
                    }
                }
                Ok(reports.iter().all(|r| r.valid))
            }
            Command::Show => {
                let schema = crate::demo::schema()?;
                print_outline(schema.node(), "object", 0);
                Ok(true)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn print_report(report: &Report, failures_only: bool) {
    let verdict = if report.valid { "valid".green().bold() } else { "invalid".red().bold() };
    println!("{}: {verdict}", report.input.bold());
    for d in report.results.iter().filter(|d| !failures_only || !d.ok) {
        if d.ok {
            println!("  {} {}", "✔".green(), d.message);
        } else {
            println!("  {} {}", "✘".red(), d.message);
        }
    }
}

fn print_outline(node: &Node, label: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Tree(fields) => {
            println!("{indent}{}", label.bold());
            for (key, child) in fields {
                print_outline(child, key, depth + 1);
            }
        }
        Node::Nested(shape) => print_outline(&shape.node, label, depth),
        other => println!("{indent}{label}: {}", other.describe().cyan()),
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern {pattern}"))? {
                out.push(entry?);
            }
            if out.len() == before {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
