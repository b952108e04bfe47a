//! Task model for rollup.
//!
//! A task is a node with an id, a status string and an optional parent id.
//! Parent links are weak: they are resolved by id through a
//! [`TaskRegistry`](crate::registry::TaskRegistry), never owned.

use serde::Deserialize;

pub const STATUS_OPEN: &str = "open";
pub const STATUS_CLOSED: &str = "closed";
pub const STATUS_IN_REVIEW: &str = "inreview";

/// Classification of a raw status string.
///
/// Anything other than the exact `closed` / `inreview` strings counts as open
/// for aggregation purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Open,
    Closed,
    InReview,
}

impl TaskStatus {
    pub fn classify(raw: &str) -> Self {
        match raw {
            STATUS_CLOSED => TaskStatus::Closed,
            STATUS_IN_REVIEW => TaskStatus::InReview,
            _ => TaskStatus::Open,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub status: String,
    pub parent_id: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn is_closed(&self) -> bool {
        self.status == STATUS_CLOSED
    }

    pub fn is_in_review(&self) -> bool {
        self.status == STATUS_IN_REVIEW
    }

    /// True only for the literal `open` status.
    pub fn is_open(&self) -> bool {
        self.status == STATUS_OPEN
    }

    pub fn classified_status(&self) -> TaskStatus {
        TaskStatus::classify(&self.status)
    }
}

/// One input record: `(id, status, parent_id?)`.
///
/// Deserializes from either a JSON array `["id", "status", null]` or an
/// object `{"id": "...", "status": "...", "parent_id": null}`. Only the id is
/// required: a missing or null status becomes an empty (open) status, a
/// missing parent means a root, and array elements past the third are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct TaskRecord {
    pub id: String,
    pub status: String,
    pub parent_id: Option<String>,
}

impl TaskRecord {
    pub fn new(id: impl Into<String>, status: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            parent_id: parent_id.map(str::to_string),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecord {
    Tuple(Vec<Option<String>>),
    Object {
        id: Option<String>,
        #[serde(default)]
        status: Option<String>,
        #[serde(default, alias = "parent")]
        parent_id: Option<String>,
    },
}

impl TryFrom<RawRecord> for TaskRecord {
    type Error = String;

    fn try_from(raw: RawRecord) -> std::result::Result<Self, Self::Error> {
        let (id, status, parent_id) = match raw {
            RawRecord::Tuple(fields) => {
                let mut fields = fields.into_iter();
                (
                    fields.next().flatten(),
                    fields.next().flatten(),
                    fields.next().flatten(),
                )
            }
            RawRecord::Object {
                id,
                status,
                parent_id,
            } => (id, status, parent_id),
        };
        let id = id.ok_or_else(|| "task record is missing an id".to_string())?;
        Ok(TaskRecord {
            id,
            status: status.unwrap_or_default(),
            parent_id,
        })
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Task {
            id: record.id,
            status: record.status,
            parent_id: record.parent_id,
        }
    }
}

impl<'a, I, S> From<(I, S, Option<&'a str>)> for TaskRecord
where
    I: Into<String>,
    S: Into<String>,
{
    fn from((id, status, parent_id): (I, S, Option<&'a str>)) -> Self {
        TaskRecord::new(id, status, parent_id)
    }
}
