mod support;

use predicates::str::contains;

use support::{create_task, taskmaster_cmd, TestHome};

#[test]
fn analytics_on_empty_store_reports_zeros() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();

    let output = taskmaster_cmd(&home).args(["analytics", "--json"]).output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["data"]["total"], 0);
    assert_eq!(value["data"]["completed"], 0);
    assert_eq!(value["data"]["completion_rate"], 0.0);
    assert_eq!(value["data"]["overdue"], 0);
    assert!(value["data"]["time_accuracy"].is_null());

    Ok(())
}

#[test]
fn analytics_counts_statuses_priorities_and_categories(
) -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    let done = create_task(&home, &["Done one", "-c", "work"]);
    create_task(&home, &["Open one", "-c", "work", "-p", "urgent"]);
    create_task(&home, &["Open two"]);
    create_task(&home, &["Overdue", "--due", "2020-01-01"]);
    taskmaster_cmd(&home)
        .args(["complete", &done])
        .assert()
        .success();

    let output = taskmaster_cmd(&home).args(["analytics", "--json"]).output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let data = &value["data"];
    assert_eq!(data["total"], 4);
    assert_eq!(data["completed"], 1);
    assert_eq!(data["completion_rate"], 0.25);
    assert_eq!(data["overdue"], 1);
    assert_eq!(data["by_status"]["done"], 1);
    assert_eq!(data["by_status"]["todo"], 3);
    assert_eq!(data["by_priority"]["2"], 3);
    assert_eq!(data["by_priority"]["4"], 1);
    assert_eq!(data["by_category"]["work"], 2);
    assert_eq!(data["by_category"]["none"], 2);

    Ok(())
}

#[test]
fn analytics_time_accuracy_over_estimated_tasks() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    let estimated = create_task(&home, &["Estimated", "-e", "4"]);
    create_task(&home, &["Unestimated"]);
    taskmaster_cmd(&home)
        .args(["time", &estimated, "6"])
        .assert()
        .success();

    let output = taskmaster_cmd(&home).args(["analytics", "--json"]).output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let accuracy = value["data"]["time_accuracy"].as_f64().expect("accuracy");
    assert!((accuracy - 0.5).abs() < 1e-9);
    assert_eq!(value["data"]["total_estimated_hours"], 4.0);
    assert_eq!(value["data"]["total_actual_hours"], 6.0);

    Ok(())
}

#[test]
fn analytics_human_output_summarizes() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    let done = create_task(&home, &["Done"]);
    create_task(&home, &["Open"]);
    taskmaster_cmd(&home)
        .args(["complete", &done])
        .assert()
        .success();

    taskmaster_cmd(&home)
        .arg("analytics")
        .assert()
        .success()
        .stdout(contains("Task analytics"))
        .stdout(contains("Total: 2"))
        .stdout(contains("Completed: 1 (50.0%)"))
        .stdout(contains("done: 1"))
        .stdout(contains("todo: 1"));

    Ok(())
}
