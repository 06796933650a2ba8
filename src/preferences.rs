use crate::model::{Calendar, Employee, Preferences};
use crate::scheduler::Picker;
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Roster de démonstration (ordre fixe).
pub const DEMO_ROSTER: [&str; 6] = ["Alex", "Blair", "Casey", "Dev", "Eden", "Finn"];

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("input closed while collecting preferences")]
    InputClosed,
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("unknown day: {0}")]
    UnknownDay(String),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("missing column {0} in preferences row")]
    MissingColumn(&'static str),
    #[error("employee name cannot contain a comma: {0}")]
    InvalidName(String),
}

/// Employés dans l'ordre de passage et leurs préférences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub employees: Vec<Employee>,
    pub preferences: Preferences,
}

impl Roster {
    /// Construit un roster sans préférences ; doublons et noms vides sont écartés.
    pub fn from_names<I, S>(names: I) -> Result<Self, PreferenceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::default();
        for name in names {
            roster.add_employee(name.as_ref())?;
        }
        Ok(roster)
    }

    /// Ajoute l'employé s'il est nouveau ; `None` pour un nom vide.
    /// Les virgules sont refusées : les exports joignent les noms par `", "`.
    fn add_employee(&mut self, name: &str) -> Result<Option<Employee>, PreferenceError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        if name.contains(',') {
            return Err(PreferenceError::InvalidName(name.to_string()));
        }
        let employee = Employee::new(name);
        if !self.employees.contains(&employee) {
            self.employees.push(employee.clone());
        }
        Ok(Some(employee))
    }
}

/// Fournit le roster et les préférences avant le calcul.
pub trait PreferenceSource {
    fn collect(&mut self, calendar: &Calendar) -> Result<Roster, PreferenceError>;
}

/// Préférences aléatoires sur le roster de démonstration.
pub struct DemoSource<'p, P: Picker> {
    picker: &'p mut P,
}

impl<'p, P: Picker> DemoSource<'p, P> {
    pub fn new(picker: &'p mut P) -> Self {
        Self { picker }
    }
}

impl<P: Picker> PreferenceSource for DemoSource<'_, P> {
    fn collect(&mut self, calendar: &Calendar) -> Result<Roster, PreferenceError> {
        let mut roster = Roster::from_names(DEMO_ROSTER)?;
        let shifts: Vec<_> = calendar.shifts().collect();
        for employee in &roster.employees {
            for day in calendar.days() {
                if let Some(&shift) = self.picker.pick(&shifts) {
                    roster.preferences.set(employee.clone(), day, shift);
                }
            }
        }
        info!(employees = roster.employees.len(), "demo preferences generated");
        Ok(roster)
    }
}

/// Saisie interactive : noms séparés par des virgules, puis un shift par employé et par jour.
/// Une liste de noms vide bascule sur la démo.
pub struct InteractiveSource<'p, R, W, P: Picker> {
    input: R,
    output: W,
    picker: &'p mut P,
}

impl<'p, R: BufRead, W: Write, P: Picker> InteractiveSource<'p, R, W, P> {
    pub fn new(input: R, output: W, picker: &'p mut P) -> Self {
        Self {
            input,
            output,
            picker,
        }
    }

    fn read_line(&mut self) -> Result<String, PreferenceError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PreferenceError::InputClosed);
        }
        Ok(line)
    }

    fn prompt(&mut self, text: &str) -> Result<String, PreferenceError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }
}

impl<R: BufRead, W: Write, P: Picker> PreferenceSource for InteractiveSource<'_, R, W, P> {
    fn collect(&mut self, calendar: &Calendar) -> Result<Roster, PreferenceError> {
        let raw = self.prompt("Enter employee names, comma-separated (or press Enter to use demo): ")?;
        let mut roster = Roster::from_names(raw.split(','))?;
        if roster.employees.is_empty() {
            return DemoSource::new(&mut *self.picker).collect(calendar);
        }

        let names: Vec<&str> = roster.employees.iter().map(Employee::as_str).collect();
        let choices: Vec<&str> = calendar.shifts().map(|s| calendar.shift_label(s)).collect();
        writeln!(
            self.output,
            "\nCaptured {} employees: {}",
            names.len(),
            names.join(", ")
        )?;
        writeln!(
            self.output,
            "Enter a preference per day: {} (initial or full word, any case)\n",
            choices.join(" / ")
        )?;

        let employees = roster.employees.clone();
        for employee in &employees {
            for day in calendar.days() {
                loop {
                    let answer = self.prompt(&format!(
                        "{} preference for {}: ",
                        employee,
                        calendar.day_label(day)
                    ))?;
                    if let Some(shift) = calendar.parse_shift(&answer) {
                        roster.preferences.set(employee.clone(), day, shift);
                        break;
                    }
                    writeln!(self.output, "  Sorry, please enter one of: {}", choices.join(" / "))?;
                }
            }
            writeln!(self.output)?;
        }
        Ok(roster)
    }
}

/// Import CSV : header `employee,day,shift`. Une ligne sans jour ni shift déclare
/// seulement l'employé. L'ordre de première apparition fixe l'ordre de passage.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceSource for CsvSource {
    fn collect(&mut self, calendar: &Calendar) -> Result<Roster, PreferenceError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;
        let mut roster = Roster::default();
        let mut seen_days = HashSet::new();
        for rec in rdr.records() {
            let rec = rec?;
            let name = rec.get(0).ok_or(PreferenceError::MissingColumn("employee"))?;
            let Some(employee) = roster.add_employee(name)? else {
                continue;
            };
            let day = rec.get(1).unwrap_or("").trim();
            let shift = rec.get(2).unwrap_or("").trim();
            match (day.is_empty(), shift.is_empty()) {
                (true, true) => continue,
                (true, false) => return Err(PreferenceError::MissingColumn("day")),
                (false, true) => return Err(PreferenceError::MissingColumn("shift")),
                (false, false) => {}
            }
            let day = calendar
                .find_day(day)
                .ok_or_else(|| PreferenceError::UnknownDay(day.to_string()))?;
            let shift = calendar
                .parse_shift(shift)
                .ok_or_else(|| PreferenceError::UnknownShift(shift.to_string()))?;
            seen_days.insert((employee.clone(), day));
            roster.preferences.set(employee, day, shift);
        }
        info!(
            employees = roster.employees.len(),
            preferences = seen_days.len(),
            path = %self.path.display(),
            "preferences imported"
        );
        Ok(roster)
    }
}
