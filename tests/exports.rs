#![forbid(unsafe_code)]
use chrono::NaiveDate;
use shiftweek::{
    io, schedule_week, Config, ConsoleRenderer, DemoSource, Employee, MarkdownRenderer,
    PreferenceSource, Preferences, Report, ScheduleRenderer, SeededPicker,
};
use std::fs;
use tempfile::tempdir;

fn one_day_config() -> Config {
    Config {
        days: vec!["Mon".into()],
        ..Config::default()
    }
}

fn two_people_outcome(config: &Config) -> shiftweek::ScheduleOutcome {
    let roster = vec![Employee::new("Blair"), Employee::new("Alex")];
    schedule_week(
        &config.calendar(),
        config.rules,
        &roster,
        &Preferences::new(),
        &mut SeededPicker::new(config.seed),
    )
}

#[test]
fn schedule_csv_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/out/schedule.csv");
    let config = Config::default();
    let cal = config.calendar();
    let mut picker = SeededPicker::new(config.seed);
    let roster = DemoSource::new(&mut picker).collect(&cal).unwrap();
    let outcome = schedule_week(
        &cal,
        config.rules,
        &roster.employees,
        &roster.preferences,
        &mut picker,
    );

    io::export_schedule_csv(&path, &cal, &outcome).unwrap();
    let rows = io::read_schedule_csv(&path).unwrap();

    assert_eq!(rows.len(), 7 * 3);
    let mut rows = rows.into_iter();
    for day in cal.days() {
        for shift in cal.shifts() {
            let row = rows.next().unwrap();
            let expected: Vec<String> = outcome
                .schedule
                .assigned(day, shift)
                .iter()
                .map(|e| e.as_str().to_string())
                .collect();
            assert_eq!(row.day, cal.day_label(day));
            assert_eq!(row.shift, cal.shift_label(shift));
            assert_eq!(row.count, expected.len());
            assert_eq!(row.employees, expected);
        }
    }
}

#[test]
fn summary_csv_sorted_and_overwritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("summary.csv");
    fs::write(&path, "stale content that must disappear\n".repeat(10)).unwrap();

    let config = Config::default();
    let outcome = two_people_outcome(&config);
    io::export_summary_csv(&path, &outcome).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Employee,DaysWorked\nAlex,5\nBlair,5\n");
}

#[test]
fn schedule_csv_keeps_empty_shifts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.csv");
    let config = one_day_config();
    let outcome = two_people_outcome(&config);
    io::export_schedule_csv(&path, &config.calendar(), &outcome).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "Day,Shift,Count,Employees\nMon,morning,2,\"Blair, Alex\"\nMon,afternoon,0,\nMon,evening,0,\n"
    );
}

#[test]
fn markdown_layout() {
    let config = one_day_config();
    let cal = config.calendar();
    let outcome = two_people_outcome(&config);
    let doc = MarkdownRenderer.render(&Report::new(&config, &cal, &outcome));

    insta::assert_snapshot!(doc, @r###"
    # Final Weekly Schedule

    ## Mon

    | Shift | Count | Employees |
    |------:|:-----:|-----------|
    | morning | 2 | Blair, Alex |
    | afternoon | 0 | - |
    | evening | 0 | - |

    ## Weekly Summary

    | Employee | Days Worked |
    |----------|-------------|
    | Alex | 1 |
    | Blair | 1 |
    "###);
}

#[test]
fn markdown_export_dates_days_when_week_start_known() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("docs/schedule.md");
    let config = Config {
        week_start: NaiveDate::from_ymd_opt(2025, 10, 20),
        ..Config::default()
    };
    let cal = config.calendar();
    let outcome = two_people_outcome(&config);
    io::export_markdown(&path, &Report::new(&config, &cal, &outcome)).unwrap();

    let doc = fs::read_to_string(&path).unwrap();
    assert!(doc.contains("## Mon (2025-10-20)"));
    assert!(doc.contains("## Sun (2025-10-26)"));
    assert_eq!(doc.matches("\n## ").count(), 8);
}

#[test]
fn console_lists_shortages() {
    let config = one_day_config();
    let cal = config.calendar();
    let outcome = two_people_outcome(&config);
    let text = ConsoleRenderer.render(&Report::new(&config, &cal, &outcome));

    assert!(text.contains("  morning    (2) -> Blair, Alex"));
    assert!(text.contains("  evening    (0) -> -"));
    assert!(text.contains("Alex       : 1 day(s)"));
    assert!(text.contains("Total assignments placed: 2"));
    assert!(text.contains("Short-staffed shifts (below minimum):"));
    assert!(text.contains("  Mon afternoon  -> 0/2"));
}

#[test]
fn console_all_clear() {
    let config = one_day_config();
    let cal = config.calendar();
    let roster: Vec<Employee> = ["A", "B", "C", "D", "E", "F", "G", "H", "I"]
        .iter()
        .map(Employee::new)
        .collect();
    let outcome = schedule_week(
        &cal,
        config.rules,
        &roster,
        &Preferences::new(),
        &mut SeededPicker::new(1),
    );
    let text = ConsoleRenderer.render(&Report::new(&config, &cal, &outcome));
    assert!(text.contains("All shifts meet the minimum staffing requirement."));
}

#[test]
fn outcome_json_lists_every_slot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.json");
    let config = Config::default();
    let cal = config.calendar();
    let outcome = two_people_outcome(&config);
    io::export_outcome_json(&path, &cal, &outcome).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["slots"].as_array().unwrap().len(), 21);
    assert_eq!(value["worked_days"][0]["employee"], "Alex");
    assert_eq!(value["shortages"].as_array().unwrap().len(), 16);
}
