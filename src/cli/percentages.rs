//! rollup percentages command implementation

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::analyzer::TreeAnalyzer;
use crate::error::Result;
use crate::loader;
use crate::output::{emit_success, format_percentage, HumanOutput, OutputOptions};

/// Options for the percentages command
pub struct PercentagesOptions {
    pub file: PathBuf,
    pub validate: bool,
    pub precision: u32,
    pub output: OutputOptions,
}

pub fn run(options: PercentagesOptions) -> Result<()> {
    let records = loader::read_records(&options.file)?;
    let registry = loader::load(records, options.validate)?;
    let analyzer = TreeAnalyzer::new(&registry);

    let mut human = HumanOutput::new(format!(
        "rollup percentages: {} tasks",
        registry.len()
    ));
    let mut data = BTreeMap::new();
    for (task, stats) in analyzer.all_subtree_stats()? {
        let percentage = stats.completion_percentage_with(options.precision);
        human.push_detail(format!(
            "{}: {}",
            task.id,
            format_percentage(percentage, options.precision)
        ));
        data.insert(task.id.clone(), percentage);
    }
    if !options.validate {
        human.push_warning("cycle check skipped");
    }

    emit_success(options.output, "percentages", &data, &human)
}
