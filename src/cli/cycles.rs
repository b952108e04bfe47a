//! rollup cycles command implementation
//!
//! Reports cycles without failing, unlike `validate`.

use std::path::PathBuf;

use crate::analyzer::TreeAnalyzer;
use crate::error::Result;
use crate::loader;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::registry::TaskRegistry;

/// Options for the cycles command
pub struct CyclesOptions {
    pub file: PathBuf,
    pub output: OutputOptions,
}

#[derive(serde::Serialize)]
struct CyclesReport {
    has_cycle: bool,
    cycles: Vec<Vec<String>>,
}

pub fn run(options: CyclesOptions) -> Result<()> {
    let records = loader::read_records(&options.file)?;
    let registry = TaskRegistry::from_records(records);
    let analyzer = TreeAnalyzer::new(&registry);

    let report = CyclesReport {
        has_cycle: analyzer.has_cycle(),
        cycles: analyzer.find_all_cycles(),
    };

    let mut human = HumanOutput::new(format!("rollup cycles: {} found", report.cycles.len()));
    for cycle in &report.cycles {
        human.push_detail(cycle.join(" -> "));
    }

    emit_success(options.output, "cycles", &report, &human)
}
