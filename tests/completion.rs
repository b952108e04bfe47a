use std::collections::BTreeMap;

use rollup::loader;
use rollup::task::{Task, TaskRecord};
use rollup::{Error, TaskRegistry, TreeAnalyzer};

fn percentages(records: &[(&str, &str, Option<&str>)]) -> BTreeMap<String, f64> {
    let registry = loader::load_and_validate(records.iter().copied()).expect("load");
    TreeAnalyzer::new(&registry)
        .completion_percentages()
        .expect("percentages")
}

fn expected(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(id, pct)| (id.to_string(), *pct)).collect()
}

#[test]
fn mixed_two_level_forest() {
    let result = percentages(&[
        ("task_001", "open", None),
        ("task_002", "open", Some("task_001")),
        ("task_003", "closed", Some("task_002")),
        ("task_004", "closed", Some("task_001")),
        ("task_005", "closed", Some("task_004")),
    ]);
    assert_eq!(
        result,
        expected(&[
            ("task_001", 60.0),
            ("task_002", 50.0),
            ("task_003", 100.0),
            ("task_004", 100.0),
            ("task_005", 100.0),
        ])
    );
}

#[test]
fn fully_closed_tree() {
    let result = percentages(&[
        ("task_100", "closed", None),
        ("task_101", "closed", Some("task_100")),
        ("task_102", "closed", Some("task_100")),
        ("task_103", "closed", Some("task_101")),
    ]);
    assert!(result.values().all(|pct| *pct == 100.0));
    assert_eq!(result.len(), 4);
}

#[test]
fn deep_alternating_chain_rounds_to_two_places() {
    let result = percentages(&[
        ("task_200", "open", None),
        ("task_201", "open", Some("task_200")),
        ("task_202", "closed", Some("task_201")),
        ("task_203", "open", Some("task_202")),
        ("task_204", "closed", Some("task_203")),
        ("task_205", "open", Some("task_200")),
        ("task_206", "closed", Some("task_205")),
    ]);
    assert_eq!(
        result,
        expected(&[
            ("task_200", 42.86),
            ("task_201", 50.0),
            ("task_202", 66.67),
            ("task_203", 50.0),
            ("task_204", 100.0),
            ("task_205", 50.0),
            ("task_206", 100.0),
        ])
    );
}

#[test]
fn wide_single_level_tree() {
    let result = percentages(&[
        ("task_300", "open", None),
        ("task_301", "closed", Some("task_300")),
        ("task_302", "open", Some("task_300")),
        ("task_303", "closed", Some("task_300")),
        ("task_304", "closed", Some("task_300")),
        ("task_305", "open", Some("task_300")),
    ]);
    assert_eq!(
        result,
        expected(&[
            ("task_300", 50.0),
            ("task_301", 100.0),
            ("task_302", 0.0),
            ("task_303", 100.0),
            ("task_304", 100.0),
            ("task_305", 0.0),
        ])
    );
}

#[test]
fn in_review_counts_toward_total_but_not_closed() {
    let registry = TaskRegistry::from_records([
        ("epic", "inreview", None),
        ("a", "closed", Some("epic")),
        ("b", "wontfix", Some("epic")),
        ("c", "inreview", Some("b")),
    ]);
    let analyzer = TreeAnalyzer::new(&registry);
    let epic = registry.find("epic").expect("epic");

    let stats = analyzer.subtree_stats(epic).expect("stats");
    assert_eq!(stats.total, 4);
    assert_eq!(stats.closed, 1);
    assert_eq!(stats.in_review, 2);
    assert_eq!(stats.open(), 1);
    assert_eq!(analyzer.completion_percentage(epic).expect("pct"), 25.0);
}

#[test]
fn subtree_totals_are_sum_of_children_plus_self() {
    let registry = TaskRegistry::from_records([
        ("r", "open", None),
        ("a", "closed", Some("r")),
        ("b", "inreview", Some("r")),
        ("a1", "closed", Some("a")),
        ("a2", "open", Some("a")),
        ("b1", "closed", Some("b")),
    ]);
    let analyzer = TreeAnalyzer::new(&registry);

    for task in registry.all() {
        let stats = analyzer.subtree_stats(task).expect("stats");
        let mut expected = rollup::SubtreeStats::of(task);
        for child in registry.children_of(&task.id) {
            expected += analyzer.subtree_stats(child).expect("child stats");
        }
        assert_eq!(stats, expected, "task {}", task.id);
        assert_eq!(stats.open(), stats.total - stats.closed - stats.in_review);
    }
}

#[test]
fn leaf_percentage_ignores_ancestors() {
    let registry = TaskRegistry::from_records([
        ("parent", "closed", None),
        ("leaf_open", "open", Some("parent")),
        ("leaf_closed", "closed", Some("parent")),
    ]);
    let result = TreeAnalyzer::new(&registry)
        .completion_percentages()
        .expect("percentages");
    assert_eq!(result["leaf_open"], 0.0);
    assert_eq!(result["leaf_closed"], 100.0);
    assert_eq!(result["parent"], 66.67);
}

#[test]
fn registered_tasks_mirror_object_style_setup() {
    let mut registry = TaskRegistry::new();
    registry.insert(Task::new("1", "open"));
    registry.insert(Task::new("2", "closed").with_parent("1"));
    registry.insert(Task::new("3", "open").with_parent("1"));
    registry.insert(Task::new("4", "closed"));
    let analyzer = TreeAnalyzer::new(&registry);

    let parent = registry.find("1").expect("parent");
    assert_eq!(analyzer.completion_percentage(parent).expect("pct"), 33.33);
    let unrelated = registry.find("4").expect("unrelated");
    assert_eq!(analyzer.completion_percentage(unrelated).expect("pct"), 100.0);

    registry.insert(Task::new("4", "closed").with_parent("2"));
    let analyzer = TreeAnalyzer::new(&registry);
    let parent = registry.find("1").expect("parent");
    let stats = analyzer.subtree_stats(parent).expect("stats");
    assert_eq!((stats.total, stats.closed), (4, 2));
    let child = registry.find("2").expect("child");
    let stats = analyzer.subtree_stats(child).expect("stats");
    assert_eq!((stats.total, stats.closed), (2, 2));
}

#[test]
fn unvalidated_cycle_fails_with_infinite_loop() {
    let registry = loader::load(
        [
            TaskRecord::new("task_001", "open", None),
            TaskRecord::new("task_002", "open", Some("task_003")),
            TaskRecord::new("task_003", "closed", Some("task_002")),
        ],
        false,
    )
    .expect("load without validation");

    let err = TreeAnalyzer::new(&registry)
        .completion_percentages()
        .expect_err("loop");
    assert!(err.to_string().contains("Infinite loop detected"));
    assert!(matches!(err, Error::InfiniteLoop { .. }));
}

#[test]
fn validated_load_rejects_cycle_before_stats() {
    let err = loader::load_and_validate([
        ("task_001", "open", Some("task_002")),
        ("task_002", "open", Some("task_001")),
    ])
    .expect_err("cycle");
    assert!(err.to_string().contains("Circular dependency detected"));
}

#[test]
fn validated_load_allows_normal_operation() {
    let result = percentages(&[
        ("task_001", "open", None),
        ("task_002", "open", Some("task_001")),
        ("task_003", "closed", Some("task_002")),
    ]);
    assert_eq!(
        result,
        expected(&[("task_001", 33.33), ("task_002", 50.0), ("task_003", 100.0)])
    );
}

#[test]
fn empty_registry_has_no_percentages() {
    let registry = TaskRegistry::new();
    let analyzer = TreeAnalyzer::new(&registry);
    assert!(analyzer.completion_percentages().expect("empty").is_empty());
    assert!(!analyzer.has_cycle());
}

#[test]
fn children_listed_before_parents_give_same_percentages() {
    let result = percentages(&[
        ("task_005", "closed", Some("task_004")),
        ("task_003", "closed", Some("task_002")),
        ("task_004", "closed", Some("task_001")),
        ("task_002", "open", Some("task_001")),
        ("task_001", "open", None),
    ]);
    assert_eq!(
        result,
        expected(&[
            ("task_001", 60.0),
            ("task_002", 50.0),
            ("task_003", 100.0),
            ("task_004", 100.0),
            ("task_005", 100.0),
        ])
    );
}

#[test]
fn short_array_records_load_as_open_roots() {
    let records =
        loader::parse_records(r#"[["a", "open"], ["b", "closed", "a"], ["c", null, null]]"#)
            .expect("parse records");
    let registry = loader::load_and_validate(records).expect("load");
    let result = TreeAnalyzer::new(&registry)
        .completion_percentages()
        .expect("percentages");

    assert_eq!(result, expected(&[("a", 50.0), ("b", 100.0), ("c", 0.0)]));
}
