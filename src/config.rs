use crate::model::Calendar;
use crate::scheduler::Rules;
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const DEFAULT_SEED: u64 = 42;

/// Configuration complète d'un run : règles, graine, libellés de la grille.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rules: Rules,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_days")]
    pub days: Vec<String>,
    #[serde(default = "default_shifts")]
    pub shifts: Vec<String>,
    /// Date du premier jour, affichée dans les rapports si présente.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_start: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            seed: DEFAULT_SEED,
            days: default_days(),
            shifts: default_shifts(),
            week_start: None,
        }
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_days() -> Vec<String> {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .iter()
    .map(|d| d.to_string())
    .collect()
}

fn default_shifts() -> Vec<String> {
    ["morning", "afternoon", "evening"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        validate_labels("day", &self.days)?;
        validate_labels("shift", &self.shifts)?;
        if self.rules.shift_cap == 0 {
            bail!("shift_cap must be > 0");
        }
        if self.rules.max_days_per_employee == 0 {
            bail!("max_days_per_employee must be > 0");
        }
        if self.rules.min_per_shift > self.rules.shift_cap {
            bail!(
                "min_per_shift ({}) cannot exceed shift_cap ({})",
                self.rules.min_per_shift,
                self.rules.shift_cap
            );
        }
        Ok(())
    }

    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.days.clone(), self.shifts.clone())
    }

    /// Date réelle du n-ième jour de la grille, si `week_start` est connu.
    pub fn date_of(&self, day_index: usize) -> Option<NaiveDate> {
        let start = self.week_start?;
        start.checked_add_days(chrono::Days::new(day_index as u64))
    }
}

fn validate_labels(kind: &str, labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        bail!("at least one {kind} label is required");
    }
    let mut seen = HashSet::new();
    for label in labels {
        if label.trim().is_empty() {
            bail!("{kind} label cannot be empty");
        }
        if !seen.insert(label.to_lowercase()) {
            bail!("duplicate {kind} label: {label}");
        }
    }
    Ok(())
}

pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: Config = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn export_config_json<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    config.validate()?;
    let json = serde_json::to_string_pretty(config)?;
    crate::io::write_replacing(path.as_ref(), json.as_bytes())
}
