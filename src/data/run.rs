use crate::algo::Orchestrator;
use crate::core::{colors_used, load_instances, Colorer, Config, ConflictGraph};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

/// Report of running a directory of offerings.
#[derive(Debug, Deserialize, Serialize)]
pub struct Report {
    colorer: String,
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Create a new report.
    fn new(colorer: String) -> Self {
        let entries = Vec::new();
        Self { colorer, entries }
    }

    /// Get the colorer name.
    #[must_use]
    pub fn colorer_name(&self) -> &str {
        &self.colorer
    }

    /// Get the entries.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Colorer: {}", self.colorer)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "-------------------")
    }
}

/// Report of running a single offering.
#[non_exhaustive]
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub instances: usize,
    pub edges: usize,
    pub colors: usize,
    pub time: f64,
    pub accepted: bool,
}

impl Display for ReportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{}: {} instances, {} conflicts, {} colors in {:.4} sec, {}",
            self.name,
            self.instances,
            self.edges,
            self.colors,
            self.time,
            if self.accepted { "accepted" } else { "rejected" }
        )
    }
}

/// Run all offerings in the `samples` directory.
/// Print the report to stdout.
///
/// # Errors
/// - If a file cannot be read.
/// - If no samples are found.
pub fn samples(colorer: fn() -> Box<dyn Colorer>) -> anyhow::Result<()> {
    run("samples", colorer, &Config::default()).and_then(|report| {
        if report.entries.is_empty() {
            Err(anyhow!("No samples found"))
        } else {
            println!("{report}");
            Ok(())
        }
    })
}

/// Run every `*.csv` offering in the `dir` directory.
///
/// The coloring alone is timed. Each offering is then scheduled with `config`;
/// a schedule that cannot be accepted is reported, not returned as an error.
///
/// # Errors
/// - If a file cannot be read or parsed.
pub fn run(dir: &str, colorer: fn() -> Box<dyn Colorer>, config: &Config) -> anyhow::Result<Report> {
    let mut report = Report::new(colorer().name().into());

    let mut files = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<PathBuf>>>()?;
    files.retain(|path| path.extension().is_some_and(|ext| ext == "csv"));
    files.sort();

    for path in files {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Cannot read filename"))?
            .to_owned();

        let rows = super::read_rows(BufReader::new(File::open(&path)?))?;
        let instances = load_instances(&rows, &config.night_courses)?;
        let graph = ConflictGraph::build(&instances);

        let time = std::time::Instant::now();
        let coloring = colorer().color(&graph);
        let time = time.elapsed().as_secs_f64();

        let accepted = Orchestrator::new(colorer(), config.clone())
            .run(instances)
            .inspect_err(|error| info!(%name, %error, "offering rejected"))
            .is_ok();

        report.entries.push(ReportEntry {
            name,
            instances: graph.len(),
            edges: graph.edge_count(),
            colors: colors_used(&coloring),
            time,
            accepted,
        });
    }

    Ok(report)
}
