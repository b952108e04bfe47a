//! Task registry: the set of tasks for one run, indexed by id.
//!
//! A registry is an ordinary value. Independent task sets live in independent
//! registries; nothing here is process-wide.

use std::collections::HashMap;

use tracing::debug;

use crate::task::{Task, TaskRecord};

/// Tasks keyed by id, in insertion order, with a parent -> children index.
///
/// Duplicate ids are last-write-wins: the later task replaces the earlier one
/// in its original slot. The children index is kept current on every
/// mutation so [`TaskRegistry::children_of`] does not scan.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
    children: HashMap<String, Vec<usize>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry populated from `records`.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TaskRecord>,
    {
        let mut registry = Self::new();
        registry.build(records);
        registry
    }

    /// Replaces the whole registry with one task per record, in input order.
    pub fn build<I>(&mut self, records: I)
    where
        I: IntoIterator,
        I::Item: Into<TaskRecord>,
    {
        self.reset();
        let mut seen = 0usize;
        for record in records {
            let record: TaskRecord = record.into();
            self.insert(Task::from(record));
            seen += 1;
        }
        debug!(
            records = seen,
            tasks = self.tasks.len(),
            "built task registry"
        );
    }

    /// Registers a single task. An existing task with the same id is replaced.
    pub fn insert(&mut self, task: Task) {
        if let Some(&slot) = self.index.get(&task.id) {
            let previous_parent = self.tasks[slot].parent_id.clone();
            if let Some(parent) = previous_parent {
                self.unlink_child(&parent, slot);
            }
            debug!(task_id = %task.id, "replacing task with duplicate id");
            if let Some(parent) = task.parent_id.clone() {
                self.link_child(parent, slot);
            }
            self.tasks[slot] = task;
            return;
        }

        let slot = self.tasks.len();
        self.index.insert(task.id.clone(), slot);
        if let Some(parent) = task.parent_id.clone() {
            self.link_child(parent, slot);
        }
        self.tasks.push(task);
    }

    /// Exact-match lookup. Unknown ids are `None`, never an error.
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.index.get(id).map(|&slot| &self.tasks[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Every registered task, in insertion order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Empties the registry. Idempotent.
    pub fn reset(&mut self) {
        self.tasks.clear();
        self.index.clear();
        self.children.clear();
    }

    /// Every task whose `parent_id` equals `id`, in insertion order.
    pub fn children_of(&self, id: &str) -> Vec<&Task> {
        self.child_slots(id)
            .iter()
            .map(|&slot| &self.tasks[slot])
            .collect()
    }

    /// Tasks with no parent, or whose parent id is not registered.
    pub fn roots(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| match task.parent_id.as_deref() {
                Some(parent) => !self.contains(parent),
                None => true,
            })
            .collect()
    }

    pub(crate) fn slot_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn task_at(&self, slot: usize) -> &Task {
        &self.tasks[slot]
    }

    pub(crate) fn child_slots(&self, id: &str) -> &[usize] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn link_child(&mut self, parent: String, slot: usize) {
        let slots = self.children.entry(parent).or_default();
        if let Err(pos) = slots.binary_search(&slot) {
            slots.insert(pos, slot);
        }
    }

    fn unlink_child(&mut self, parent: &str, slot: usize) {
        if let Some(slots) = self.children.get_mut(parent) {
            slots.retain(|&existing| existing != slot);
            if slots.is_empty() {
                self.children.remove(parent);
            }
        }
    }
}
