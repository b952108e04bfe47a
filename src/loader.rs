//! Loading task records into a validated registry.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::analyzer::TreeAnalyzer;
use crate::error::{Error, Result};
use crate::registry::TaskRegistry;
use crate::task::TaskRecord;

/// Path value that means "read from stdin".
pub const STDIN_PATH: &str = "-";

/// Builds a registry from `records`, rejecting cyclic hierarchies when
/// `validate` is set.
pub fn load<I>(records: I, validate: bool) -> Result<TaskRegistry>
where
    I: IntoIterator,
    I::Item: Into<TaskRecord>,
{
    let registry = TaskRegistry::from_records(records);
    if validate {
        TreeAnalyzer::new(&registry).validate()?;
    } else {
        debug!("cycle validation skipped");
    }
    Ok(registry)
}

/// [`load`] with validation on.
pub fn load_and_validate<I>(records: I) -> Result<TaskRegistry>
where
    I: IntoIterator,
    I::Item: Into<TaskRecord>,
{
    load(records, true)
}

/// Parses a JSON array of records.
pub fn parse_records(content: &str) -> Result<Vec<TaskRecord>> {
    serde_json::from_str(content)
        .map_err(|err| Error::InvalidInput(format!("expected a JSON array of task records: {err}")))
}

/// Reads records from a file, or from stdin when `path` is `-`.
pub fn read_records(path: &Path) -> Result<Vec<TaskRecord>> {
    let content = if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        if !path.exists() {
            return Err(Error::InvalidArgument(format!(
                "input file not found: {}",
                path.display()
            )));
        }
        std::fs::read_to_string(path)?
    };

    let records = parse_records(&content)?;
    debug!(path = %path.display(), records = records.len(), "read task records");
    Ok(records)
}
