mod support;

use predicates::str::contains;

use support::{create_task, taskmaster_cmd, TestHome};

#[test]
fn create_then_show_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    let id = create_task(
        &home,
        &[
            "Write report",
            "-d",
            "quarterly summary",
            "-p",
            "high",
            "-c",
            "work",
            "--due",
            "2099-01-15",
            "-e",
            "4",
            "-t",
            "writing",
            "docs",
        ],
    );
    assert_eq!(id.len(), 8);

    taskmaster_cmd(&home)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("Write report"))
        .stdout(contains("Priority: 3 (high)"))
        .stdout(contains("Category: work"))
        .stdout(contains("Tags: docs, writing"))
        .stdout(contains("Due: 2099-01-15"))
        .stdout(contains("Description: quarterly summary"));

    Ok(())
}

#[test]
fn create_accepts_numeric_priority() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    let id = create_task(&home, &["Urgent thing", "-p", "4"]);

    taskmaster_cmd(&home)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("Priority: 4 (urgent)"));

    Ok(())
}

#[test]
fn create_rejects_bad_priority_with_validation_code() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();

    taskmaster_cmd(&home)
        .args(["create", "Bad priority", "-p", "9"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("priority"));

    taskmaster_cmd(&home)
        .args(["create", "Bad due", "--due", "tomorrow"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("due date"));

    Ok(())
}

#[test]
fn show_with_unknown_id_exits_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    create_task(&home, &["Only task"]);

    taskmaster_cmd(&home)
        .args(["show", "zzz"])
        .assert()
        .failure()
        .code(3)
        .stderr(contains("not found"));

    Ok(())
}

#[test]
fn partial_id_resolution_via_show() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    home.seed_tasks(&[("a1b2c3d4", "First"), ("a1b9f0e1", "Second")])?;

    // Unique prefix resolves.
    taskmaster_cmd(&home)
        .args(["show", "a1b2"])
        .assert()
        .success()
        .stdout(contains("First"));

    // Shared prefix is ambiguous and lists the candidates.
    taskmaster_cmd(&home)
        .args(["show", "a1b"])
        .assert()
        .failure()
        .code(4)
        .stderr(contains("a1b2c3d4"))
        .stderr(contains("a1b9f0e1"));

    Ok(())
}

#[test]
fn update_changes_fields_and_done_sets_completed_at() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    let id = create_task(&home, &["Finish me"]);

    taskmaster_cmd(&home)
        .args(["update", &id, "-s", "in_progress", "-p", "urgent"])
        .assert()
        .success();

    taskmaster_cmd(&home)
        .args(["update", &id, "-s", "done"])
        .assert()
        .success();

    taskmaster_cmd(&home)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("Status: done"))
        .stdout(contains("Priority: 4 (urgent)"))
        .stdout(contains("Completed:"));

    Ok(())
}

#[test]
fn update_rejects_unknown_status() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    let id = create_task(&home, &["Status check"]);

    taskmaster_cmd(&home)
        .args(["update", &id, "-s", "paused"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown status"));

    Ok(())
}

#[test]
fn time_logging_accumulates() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    let id = create_task(&home, &["Timed work"]);

    taskmaster_cmd(&home)
        .args(["time", &id, "2.5"])
        .assert()
        .success();
    taskmaster_cmd(&home)
        .args(["time", &id, "1.0"])
        .assert()
        .success()
        .stdout(contains("3.5h"));

    Ok(())
}

#[test]
fn negative_hours_fail_and_leave_total_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    let id = create_task(&home, &["Timed work"]);

    taskmaster_cmd(&home)
        .args(["time", &id, "2.5"])
        .assert()
        .success();

    taskmaster_cmd(&home)
        .args(["time", &id, "--", "-1"])
        .assert()
        .failure()
        .code(2);

    taskmaster_cmd(&home)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(contains("2.5h logged"));

    Ok(())
}

#[test]
fn json_output_uses_versioned_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    let id = create_task(&home, &["Envelope"]);

    let output = taskmaster_cmd(&home)
        .args(["show", &id, "--json"])
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["schema_version"], "taskmaster.v1");
    assert_eq!(value["command"], "show");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["id"], id.as_str());
    assert_eq!(value["data"]["title"], "Envelope");

    Ok(())
}

#[test]
fn json_errors_carry_code_and_candidates() -> Result<(), Box<dyn std::error::Error>> {
    let home = TestHome::new();
    home.seed_tasks(&[("a1b2c3d4", "First"), ("a1b9f0e1", "Second")])?;

    let output = taskmaster_cmd(&home)
        .args(["show", "a1b", "--json"])
        .output()?;
    assert!(!output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["code"], 4);
    assert_eq!(value["error"]["kind"], "ambiguous_id");
    let candidates = value["error"]["details"]["candidates"]
        .as_array()
        .expect("candidates");
    assert_eq!(candidates.len(), 2);

    Ok(())
}
