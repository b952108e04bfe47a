//! Tree analysis over a [`TaskRegistry`]: cycle detection and subtree
//! aggregates.
//!
//! Every traversal here runs on an explicit stack so that deep or malformed
//! hierarchies cannot exhaust the call stack.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::AddAssign;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::registry::TaskRegistry;
use crate::task::{Task, TaskStatus};

/// Decimal places used by the completion percentage contract.
pub const PERCENTAGE_PRECISION: u32 = 2;

/// Counts over a task's subtree (the task itself plus all descendants).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubtreeStats {
    pub total: usize,
    pub closed: usize,
    pub in_review: usize,
}

impl SubtreeStats {
    /// The contribution of a single task, ignoring its children.
    pub fn of(task: &Task) -> Self {
        let status = task.classified_status();
        Self {
            total: 1,
            closed: usize::from(status == TaskStatus::Closed),
            in_review: usize::from(status == TaskStatus::InReview),
        }
    }

    /// Everything that is neither closed nor in review.
    pub fn open(&self) -> usize {
        self.total - self.closed - self.in_review
    }

    pub fn completion_percentage(&self) -> f64 {
        self.completion_percentage_with(PERCENTAGE_PRECISION)
    }

    pub fn completion_percentage_with(&self, places: u32) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        round_percentage(self.closed as f64 / self.total as f64 * 100.0, places)
    }
}

impl AddAssign for SubtreeStats {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.closed += other.closed;
        self.in_review += other.in_review;
    }
}

impl Serialize for SubtreeStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SubtreeStats", 4)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("closed", &self.closed)?;
        state.serialize_field("inreview", &self.in_review)?;
        state.serialize_field("open", &self.open())?;
        state.end()
    }
}

/// Rounds half away from zero to `places` decimals.
pub fn round_percentage(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

struct Frame<'a> {
    slot: Option<usize>,
    task: &'a Task,
    cursor: usize,
    stats: SubtreeStats,
}

/// Read-only analysis over one registry.
#[derive(Debug, Clone, Copy)]
pub struct TreeAnalyzer<'a> {
    registry: &'a TaskRegistry,
}

impl<'a> TreeAnalyzer<'a> {
    pub fn new(registry: &'a TaskRegistry) -> Self {
        Self { registry }
    }

    /// True if descending through children from any task revisits a task.
    pub fn has_cycle(&self) -> bool {
        debug!(tasks = self.registry.len(), "checking for cycles");
        (0..self.registry.len()).any(|root| self.revisits_from(root))
    }

    fn revisits_from(&self, root: usize) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![root];
        while let Some(slot) = stack.pop() {
            if !visited.insert(slot) {
                return true;
            }
            let id = &self.registry.task_at(slot).id;
            stack.extend(self.registry.child_slots(id).iter().rev());
        }
        false
    }

    /// Every distinct cycle path, at most one per traversal root, in
    /// registry order. Each path starts and ends with the repeated id.
    pub fn find_all_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = Vec::new();
        for root in 0..self.registry.len() {
            if let Some(cycle) = self.cycle_from_slot(root) {
                if !cycles.contains(&cycle) {
                    cycles.push(cycle);
                }
            }
        }
        cycles
    }

    /// The first cycle reached when descending from `id`, if any.
    pub fn first_cycle_from(&self, id: &str) -> Option<Vec<String>> {
        self.registry
            .slot_of(id)
            .and_then(|slot| self.cycle_from_slot(slot))
    }

    fn cycle_from_slot(&self, root: usize) -> Option<Vec<String>> {
        let mut path: Vec<usize> = vec![root];
        let mut on_path: HashSet<usize> = HashSet::from([root]);
        let mut visited: HashSet<usize> = HashSet::from([root]);
        let mut cursors: Vec<usize> = vec![0];

        while let Some(&node) = path.last() {
            let depth = path.len() - 1;
            let children = self.registry.child_slots(&self.registry.task_at(node).id);
            let cursor = cursors[depth];
            if cursor >= children.len() {
                cursors.pop();
                path.pop();
                on_path.remove(&node);
                continue;
            }

            cursors[depth] += 1;
            let child = children[cursor];

            if on_path.contains(&child) {
                let start = path.iter().position(|&slot| slot == child).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..]
                    .iter()
                    .map(|&slot| self.registry.task_at(slot).id.clone())
                    .collect();
                cycle.push(self.registry.task_at(child).id.clone());
                return Some(cycle);
            }

            if !visited.insert(child) {
                continue;
            }

            path.push(child);
            on_path.insert(child);
            cursors.push(0);
        }

        None
    }

    /// Fails with [`Error::CycleDetected`] listing every cycle found.
    pub fn validate(&self) -> Result<()> {
        let cycles = self.find_all_cycles();
        if cycles.is_empty() {
            return Ok(());
        }
        warn!(cycles = cycles.len(), "task hierarchy contains cycles");
        Err(Error::CycleDetected { cycles })
    }

    /// Aggregates `task` and its descendants.
    ///
    /// The task does not have to be registered; its children are looked up
    /// by id. Reaching a task that is already on the current descent path
    /// fails with [`Error::InfiniteLoop`], whether or not [`validate`] ran.
    ///
    /// [`validate`]: TreeAnalyzer::validate
    pub fn subtree_stats(&self, task: &'a Task) -> Result<SubtreeStats> {
        self.aggregate(task, None, &mut HashMap::new())
    }

    pub fn completion_percentage(&self, task: &'a Task) -> Result<f64> {
        Ok(self.subtree_stats(task)?.completion_percentage())
    }

    /// Stats for every registered task in one pass, in registry order.
    ///
    /// Finished subtrees are memoized, so each task is aggregated once.
    pub fn all_subtree_stats(&self) -> Result<Vec<(&'a Task, SubtreeStats)>> {
        let mut memo: HashMap<usize, SubtreeStats> = HashMap::new();
        let mut results = Vec::with_capacity(self.registry.len());
        for (slot, task) in self.registry.all().iter().enumerate() {
            let stats = match memo.get(&slot) {
                Some(stats) => *stats,
                None => self.aggregate(task, Some(slot), &mut memo)?,
            };
            results.push((task, stats));
        }
        Ok(results)
    }

    /// Completion percentage for every registered task, keyed by id.
    pub fn completion_percentages(&self) -> Result<BTreeMap<String, f64>> {
        Ok(self
            .all_subtree_stats()?
            .into_iter()
            .map(|(task, stats)| (task.id.clone(), stats.completion_percentage()))
            .collect())
    }

    fn aggregate(
        &self,
        root: &'a Task,
        root_slot: Option<usize>,
        memo: &mut HashMap<usize, SubtreeStats>,
    ) -> Result<SubtreeStats> {
        let registry = self.registry;
        let mut on_path: HashSet<&'a str> = HashSet::from([root.id.as_str()]);
        let mut stack = vec![Frame {
            slot: root_slot,
            task: root,
            cursor: 0,
            stats: SubtreeStats::of(root),
        }];

        while let Some(frame) = stack.last_mut() {
            let children = registry.child_slots(&frame.task.id);
            if frame.cursor >= children.len() {
                let Some(done) = stack.pop() else { break };
                on_path.remove(done.task.id.as_str());
                if let Some(slot) = done.slot {
                    memo.insert(slot, done.stats);
                }
                match stack.last_mut() {
                    Some(parent) => parent.stats += done.stats,
                    None => return Ok(done.stats),
                }
                continue;
            }

            let child_slot = children[frame.cursor];
            frame.cursor += 1;

            if let Some(cached) = memo.get(&child_slot) {
                frame.stats += *cached;
                continue;
            }

            let child = registry.task_at(child_slot);
            if on_path.contains(child.id.as_str()) {
                let mut path: Vec<String> = stack.iter().map(|f| f.task.id.clone()).collect();
                path.push(child.id.clone());
                return Err(Error::InfiniteLoop {
                    task_id: child.id.clone(),
                    path,
                });
            }

            on_path.insert(child.id.as_str());
            stack.push(Frame {
                slot: Some(child_slot),
                task: child,
                cursor: 0,
                stats: SubtreeStats::of(child),
            });
        }

        Ok(SubtreeStats::of(root))
    }
}
