#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("shiftweek-cli").unwrap()
}

#[test]
fn run_writes_all_exports() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("docs");

    cli()
        .args(["run", "--json", "--out-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Final Weekly Schedule"))
        .stdout(predicate::str::contains("Weekly Summary"))
        .stdout(predicate::str::contains("Files written:"));

    for name in ["schedule.csv", "summary.csv", "schedule.md", "schedule.json"] {
        assert!(out.join(name).exists(), "{name} missing");
    }
    let csv = fs::read_to_string(out.join("schedule.csv")).unwrap();
    assert!(csv.starts_with("Day,Shift,Count,Employees\n"));
    assert_eq!(csv.lines().count(), 1 + 7 * 3);
}

#[test]
fn same_seed_gives_identical_files() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");

    for out in [&a, &b] {
        cli()
            .args(["run", "--seed", "7", "--no-fallback", "--out-dir"])
            .arg(out)
            .assert()
            .success();
    }

    for name in ["schedule.csv", "summary.csv", "schedule.md"] {
        assert_eq!(
            fs::read(a.join(name)).unwrap(),
            fs::read(b.join(name)).unwrap(),
            "{name} differs"
        );
    }
}

#[test]
fn interactive_empty_names_falls_back_to_demo() {
    cli()
        .args(["run", "--interactive", "--no-export"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alex"))
        .stdout(predicate::str::contains("Finn"));
}

#[test]
fn interactive_closed_input_fails() {
    cli()
        .args(["run", "--interactive", "--no-export"])
        .write_stdin("Zoe\nm\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input closed"));
}

#[test]
fn strict_run_flags_shortages() {
    let dir = tempdir().unwrap();
    let prefs = dir.path().join("prefs.csv");
    fs::write(
        &prefs,
        "employee,day,shift\nZoe,Mon,e\nYann,,\nZoe,Tue,afternoon\n",
    )
    .unwrap();

    cli()
        .args(["run", "--strict", "--no-export", "--preferences"])
        .arg(&prefs)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Short-staffed shifts"))
        .stdout(predicate::str::contains("evening    (1) -> Zoe"));
}

#[test]
fn unknown_shift_in_preferences_is_rejected() {
    let dir = tempdir().unwrap();
    let prefs = dir.path().join("prefs.csv");
    fs::write(&prefs, "employee,day,shift\nZoe,Mon,night\n").unwrap();

    cli()
        .args(["run", "--no-export", "--preferences"])
        .arg(&prefs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shift: night"));
}

#[test]
fn unwritable_destination_fails() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    cli()
        .args(["run", "--out-dir"])
        .arg(blocker.join("docs"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("creating directory"));
}

#[test]
fn init_config_then_run_with_it() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("shiftweek.json");

    cli()
        .args(["init-config", "--out"])
        .arg(&cfg)
        .assert()
        .success();
    let json = fs::read_to_string(&cfg).unwrap();
    assert!(json.contains("\"min_per_shift\": 2"));

    cli()
        .arg("--config")
        .arg(&cfg)
        .args(["run", "--no-export", "--week-start", "2025-10-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon (2025-10-20):"));
}

#[test]
fn invalid_rules_are_rejected() {
    cli()
        .args(["run", "--no-export", "--min-per-shift", "5", "--shift-cap", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed shift_cap"));
}
