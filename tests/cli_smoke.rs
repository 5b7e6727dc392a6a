use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn taskmaster_help_works() {
    Command::cargo_bin("taskmaster")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("task management"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "create",
        "list",
        "show",
        "update",
        "complete",
        "delete",
        "bulk-update",
        "time",
        "pomodoro",
        "search",
        "analytics",
        "export",
        "import",
    ];

    for cmd in subcommands {
        Command::cargo_bin("taskmaster")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn remove_is_an_alias_for_delete() {
    Command::cargo_bin("taskmaster")
        .expect("binary")
        .args(["remove", "--help"])
        .assert()
        .success()
        .stdout(contains("Delete task(s)"));
}
