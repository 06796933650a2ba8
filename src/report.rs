use crate::config::Config;
use crate::model::{Calendar, Day, Employee, WorkedDays};
use crate::scheduler::ScheduleOutcome;

/// Vue en lecture seule passée aux renderers.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub config: &'a Config,
    pub calendar: &'a Calendar,
    pub outcome: &'a ScheduleOutcome,
}

impl<'a> Report<'a> {
    pub fn new(config: &'a Config, calendar: &'a Calendar, outcome: &'a ScheduleOutcome) -> Self {
        Self {
            config,
            calendar,
            outcome,
        }
    }

    /// `Mon`, ou `Mon (2025-10-20)` quand la semaine est datée.
    pub fn day_heading(&self, day: Day) -> String {
        let label = self.calendar.day_label(day);
        match self.config.date_of(day.index()) {
            Some(date) => format!("{label} ({date})"),
            None => label.to_string(),
        }
    }
}

/// Tri du récapitulatif : jours travaillés décroissants, puis nom.
pub fn summary_rows(worked_days: &WorkedDays) -> Vec<(&Employee, u32)> {
    let mut rows: Vec<(&Employee, u32)> = worked_days.iter().map(|(e, d)| (e, *d)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows
}

/// Permet de décliner le rendu du planning (console, Markdown, etc.).
pub trait ScheduleRenderer {
    fn render(&self, report: &Report<'_>) -> String;
}

/// Rendu texte pour le terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleRenderer;

impl ScheduleRenderer for ConsoleRenderer {
    fn render(&self, report: &Report<'_>) -> String {
        let calendar = report.calendar;
        let outcome = report.outcome;
        let min = report.config.rules.min_per_shift;
        let rule = "=".repeat(28);
        let thin = "-".repeat(28);

        let mut lines = vec![
            rule.clone(),
            "      Final Weekly Schedule".to_string(),
            rule,
        ];
        for day in calendar.days() {
            lines.push(String::new());
            lines.push(format!("{}:", report.day_heading(day)));
            for shift in calendar.shifts() {
                let names = outcome.schedule.assigned(day, shift);
                lines.push(format!(
                    "  {:10} ({}) -> {}",
                    calendar.shift_label(shift),
                    names.len(),
                    join_or_dash(names)
                ));
            }
        }

        lines.extend([
            String::new(),
            thin.clone(),
            "         Weekly Summary".to_string(),
            thin,
        ]);
        for (employee, days) in summary_rows(&outcome.worked_days) {
            lines.push(format!("{:10} : {} day(s)", employee.as_str(), days));
        }
        lines.push(String::new());
        lines.push(format!(
            "Total assignments placed: {}",
            outcome.schedule.total_assignments()
        ));
        lines.push(String::new());

        if outcome.shortages.is_empty() {
            lines.push("All shifts meet the minimum staffing requirement.".to_string());
        } else {
            lines.push("Short-staffed shifts (below minimum):".to_string());
            for s in &outcome.shortages {
                lines.push(format!(
                    "  {:3} {:10} -> {}/{}",
                    calendar.day_label(s.day),
                    calendar.shift_label(s.shift),
                    s.count,
                    min
                ));
            }
        }
        finish(lines)
    }
}

/// Document Markdown lisible directement sur une forge.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl ScheduleRenderer for MarkdownRenderer {
    fn render(&self, report: &Report<'_>) -> String {
        let calendar = report.calendar;
        let outcome = report.outcome;

        let mut lines = vec!["# Final Weekly Schedule".to_string()];
        for day in calendar.days() {
            lines.extend([
                String::new(),
                format!("## {}", report.day_heading(day)),
                String::new(),
                "| Shift | Count | Employees |".to_string(),
                "|------:|:-----:|-----------|".to_string(),
            ]);
            for shift in calendar.shifts() {
                let names = outcome.schedule.assigned(day, shift);
                lines.push(format!(
                    "| {} | {} | {} |",
                    calendar.shift_label(shift),
                    names.len(),
                    join_or_dash(names)
                ));
            }
        }

        lines.extend([
            String::new(),
            "## Weekly Summary".to_string(),
            String::new(),
            "| Employee | Days Worked |".to_string(),
            "|----------|-------------|".to_string(),
        ]);
        for (employee, days) in summary_rows(&outcome.worked_days) {
            lines.push(format!("| {} | {} |", employee, days));
        }
        finish(lines)
    }
}

/// Une ligne par entrée, newline final compris.
fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub(crate) fn join_names(names: &[Employee]) -> String {
    names
        .iter()
        .map(Employee::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_or_dash(names: &[Employee]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        join_names(names)
    }
}
