use crate::model::Calendar;
use crate::report::{join_names, summary_rows, MarkdownRenderer, Report, ScheduleRenderer};
use crate::scheduler::ScheduleOutcome;
use anyhow::Context;
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Écrit `bytes` dans `path` en remplaçant le fichier existant de manière atomique ;
/// les répertoires manquants sont créés.
pub fn write_replacing(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("creating directory {}", parent.display()))?;
    let mut tmp = NamedTempFile::new_in(parent).with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(())
}

/// Export CSV du planning: header `Day,Shift,Count,Employees`
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    calendar: &Calendar,
    outcome: &ScheduleOutcome,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    w.write_record(["Day", "Shift", "Count", "Employees"])?;
    for day in calendar.days() {
        for shift in calendar.shifts() {
            let names = outcome.schedule.assigned(day, shift);
            let count = names.len().to_string();
            let joined = join_names(names);
            w.write_record([
                calendar.day_label(day),
                calendar.shift_label(shift),
                count.as_str(),
                joined.as_str(),
            ])?;
        }
    }
    let bytes = w
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing schedule csv: {}", e.error()))?;
    write_replacing(path.as_ref(), &bytes)
}

/// Export CSV du récapitulatif: header `Employee,DaysWorked`
pub fn export_summary_csv<P: AsRef<Path>>(path: P, outcome: &ScheduleOutcome) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    w.write_record(["Employee", "DaysWorked"])?;
    for (employee, days) in summary_rows(&outcome.worked_days) {
        let days = days.to_string();
        w.write_record([employee.as_str(), days.as_str()])?;
    }
    let bytes = w
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing summary csv: {}", e.error()))?;
    write_replacing(path.as_ref(), &bytes)
}

pub fn export_markdown<P: AsRef<Path>>(path: P, report: &Report<'_>) -> anyhow::Result<()> {
    let doc = MarkdownRenderer.render(report);
    write_replacing(path.as_ref(), doc.as_bytes())
}

#[derive(Debug, Serialize)]
struct OutcomeJson<'a> {
    slots: Vec<SlotJson<'a>>,
    worked_days: Vec<WorkedJson<'a>>,
    shortages: Vec<ShortageJson<'a>>,
}

#[derive(Debug, Serialize)]
struct SlotJson<'a> {
    day: &'a str,
    shift: &'a str,
    employees: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct WorkedJson<'a> {
    employee: &'a str,
    days: u32,
}

#[derive(Debug, Serialize)]
struct ShortageJson<'a> {
    day: &'a str,
    shift: &'a str,
    count: usize,
}

/// Export JSON du résultat complet (jolie mise en forme)
pub fn export_outcome_json<P: AsRef<Path>>(
    path: P,
    calendar: &Calendar,
    outcome: &ScheduleOutcome,
) -> anyhow::Result<()> {
    let mut slots = Vec::new();
    for day in calendar.days() {
        for shift in calendar.shifts() {
            slots.push(SlotJson {
                day: calendar.day_label(day),
                shift: calendar.shift_label(shift),
                employees: outcome
                    .schedule
                    .assigned(day, shift)
                    .iter()
                    .map(|e| e.as_str())
                    .collect(),
            });
        }
    }
    let view = OutcomeJson {
        slots,
        worked_days: summary_rows(&outcome.worked_days)
            .into_iter()
            .map(|(e, days)| WorkedJson {
                employee: e.as_str(),
                days,
            })
            .collect(),
        shortages: outcome
            .shortages
            .iter()
            .map(|s| ShortageJson {
                day: calendar.day_label(s.day),
                shift: calendar.shift_label(s.shift),
                count: s.count,
            })
            .collect(),
    };
    let s = serde_json::to_string_pretty(&view)?;
    write_replacing(path.as_ref(), s.as_bytes())
}

/// Ligne relue d'un export `schedule.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawScheduleRow {
    day: String,
    shift: String,
    count: usize,
    employees: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub day: String,
    pub shift: String,
    pub count: usize,
    pub employees: Vec<String>,
}

/// Relit un export `schedule.csv` (ordre des lignes conservé).
pub fn read_schedule_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ScheduleRow>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut out = Vec::new();
    for rec in rdr.deserialize() {
        let raw: RawScheduleRow = rec?;
        let employees = raw
            .employees
            .split(", ")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        out.push(ScheduleRow {
            day: raw.day,
            shift: raw.shift,
            count: raw.count,
            employees,
        });
    }
    Ok(out)
}
