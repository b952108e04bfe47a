//! rollup stats command implementation

use std::path::PathBuf;

use crate::analyzer::{SubtreeStats, TreeAnalyzer};
use crate::error::{Error, Result};
use crate::loader;
use crate::output::{emit_success, format_percentage, HumanOutput, OutputOptions};

/// Options for the stats command
pub struct StatsOptions {
    pub file: PathBuf,
    pub task: Option<String>,
    pub validate: bool,
    pub precision: u32,
    pub output: OutputOptions,
}

#[derive(serde::Serialize)]
struct TaskStatsReport {
    id: String,
    #[serde(flatten)]
    stats: SubtreeStats,
    percentage: f64,
}

pub fn run(options: StatsOptions) -> Result<()> {
    let records = loader::read_records(&options.file)?;
    let registry = loader::load(records, options.validate)?;
    let analyzer = TreeAnalyzer::new(&registry);

    let single = options.task.is_some();
    let reports: Vec<TaskStatsReport> = match options.task.as_deref() {
        Some(id) => {
            let task = registry
                .find(id)
                .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
            let stats = analyzer.subtree_stats(task)?;
            vec![report(&task.id, stats, options.precision)]
        }
        None => analyzer
            .all_subtree_stats()?
            .into_iter()
            .map(|(task, stats)| report(&task.id, stats, options.precision))
            .collect(),
    };

    let mut human = HumanOutput::new(format!("rollup stats: {} tasks", reports.len()));
    for entry in &reports {
        human.push_detail(format!(
            "{}: total={} closed={} inreview={} open={} ({})",
            entry.id,
            entry.stats.total,
            entry.stats.closed,
            entry.stats.in_review,
            entry.stats.open(),
            format_percentage(entry.percentage, options.precision)
        ));
    }

    // A single task is emitted as an object rather than a one-element list.
    match reports.first() {
        Some(entry) if single => emit_success(options.output, "stats", entry, &human),
        _ => emit_success(options.output, "stats", &reports, &human),
    }
}

fn report(id: &str, stats: SubtreeStats, precision: u32) -> TaskStatsReport {
    TaskStatsReport {
        id: id.to_string(),
        stats,
        percentage: stats.completion_percentage_with(precision),
    }
}
