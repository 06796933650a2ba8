#![forbid(unsafe_code)]
//! Shiftweek — répartition gloutonne d'employés sur une semaine de shifts (sans BD).
//!
//! - Préférences par jour, plancher d'effectif, capacité par shift, plafond de jours.
//! - Trois passes par jour : préférence, repli, complément aléatoire reproductible.
//! - Exports CSV/Markdown/JSON ; aucune E/S dans le moteur.

pub mod config;
pub mod io;
pub mod model;
pub mod preferences;
pub mod report;
pub mod scheduler;

pub use config::{export_config_json, load_config_from_file, Config};
pub use model::{Calendar, Day, Employee, Preferences, Schedule, Shift, WorkedDays};
pub use preferences::{
    CsvSource, DemoSource, InteractiveSource, PreferenceError, PreferenceSource, Roster,
};
pub use report::{summary_rows, ConsoleRenderer, MarkdownRenderer, Report, ScheduleRenderer};
pub use scheduler::{
    schedule_week, FallbackPolicy, Picker, Rules, ScheduleOutcome, Scheduler, SeededPicker,
    Shortage,
};
