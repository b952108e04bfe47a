//! rollup validate command implementation

use std::path::PathBuf;

use crate::analyzer::TreeAnalyzer;
use crate::error::Result;
use crate::loader;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::registry::TaskRegistry;

/// Options for the validate command
pub struct ValidateOptions {
    pub file: PathBuf,
    pub output: OutputOptions,
}

#[derive(serde::Serialize)]
struct ValidateReport {
    tasks: usize,
    roots: usize,
    valid: bool,
}

pub fn run(options: ValidateOptions) -> Result<()> {
    let records = loader::read_records(&options.file)?;
    let registry = TaskRegistry::from_records(records);
    TreeAnalyzer::new(&registry).validate()?;

    let report = ValidateReport {
        tasks: registry.len(),
        roots: registry.roots().len(),
        valid: true,
    };

    let mut human = HumanOutput::new("rollup validate: no cycles");
    human.push_summary("tasks", report.tasks.to_string());
    human.push_summary("roots", report.roots.to_string());

    emit_success(options.output, "validate", &report, &human)
}
