mod support;

use predicates::str::contains;
use serde_json::Value;

use support::{Workdir, CYCLIC_TASKS, SAMPLE_TASKS};

#[test]
fn validate_reports_clean_forest() {
    let work = Workdir::new();
    work.write_file("tasks.json", SAMPLE_TASKS);

    work.cmd()
        .args(["validate", "tasks.json"])
        .assert()
        .success()
        .stdout(contains("rollup validate: no cycles"))
        .stdout(contains("- roots: 1"));
}

#[test]
fn validate_fails_on_cycle_with_details() {
    let work = Workdir::new();
    work.write_file("tasks.json", CYCLIC_TASKS);

    let output = work
        .cmd()
        .args(["validate", "tasks.json", "--json"])
        .assert()
        .code(3)
        .get_output()
        .clone();
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    let cycles = value["error"]["details"]["cycles"]
        .as_array()
        .expect("cycles");
    assert_eq!(cycles.len(), 2);
    assert_eq!(cycles[0][0], "task_002");
}

#[test]
fn cycles_lists_without_failing() {
    let work = Workdir::new();
    work.write_file("tasks.json", r#"[["A", "open", "A"]]"#);

    let output = work
        .cmd()
        .args(["cycles", "tasks.json", "--json"])
        .assert()
        .success()
        .get_output()
        .clone();
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["data"]["has_cycle"], true);
    assert_eq!(value["data"]["cycles"][0][0], "A");
    assert_eq!(value["data"]["cycles"][0][1], "A");
}

#[test]
fn stats_for_one_task() {
    let work = Workdir::new();
    work.write_file("tasks.json", SAMPLE_TASKS);

    let output = work
        .cmd()
        .args(["stats", "tasks.json", "task_001", "--json"])
        .assert()
        .success()
        .get_output()
        .clone();
    let value: Value = serde_json::from_slice(&output.stdout).expect("json");
    let data = &value["data"];
    assert_eq!(data["id"], "task_001");
    assert_eq!(data["total"], 5);
    assert_eq!(data["closed"], 3);
    assert_eq!(data["inreview"], 0);
    assert_eq!(data["open"], 2);
    assert_eq!(data["percentage"], 60.0);
}

#[test]
fn stats_unknown_task_is_user_error() {
    let work = Workdir::new();
    work.write_file("tasks.json", SAMPLE_TASKS);

    work.cmd()
        .args(["stats", "tasks.json", "task_999"])
        .assert()
        .code(2)
        .stderr(contains("Task not found: task_999"));
}

#[test]
fn stats_for_all_tasks_quiet() {
    let work = Workdir::new();
    work.write_file("tasks.json", SAMPLE_TASKS);

    work.cmd()
        .args(["stats", "tasks.json", "--quiet"])
        .assert()
        .success()
        .stdout("");
}
