use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifiant fort pour un employé (son nom, unique dans un run).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Employee(String);

impl Employee {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index d'un jour dans le calendrier (ordre calendaire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(usize);

impl Day {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index d'un shift dans la journée (ordre fixe : morning, afternoon, evening par défaut).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Shift(usize);

impl Shift {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Grille fixe jours × shifts, avec leurs libellés.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    days: Vec<String>,
    shifts: Vec<String>,
}

impl Calendar {
    pub fn new(days: Vec<String>, shifts: Vec<String>) -> Self {
        Self { days, shifts }
    }

    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        (0..self.days.len()).map(Day)
    }
    pub fn shifts(&self) -> impl Iterator<Item = Shift> + '_ {
        (0..self.shifts.len()).map(Shift)
    }
    pub fn day_count(&self) -> usize {
        self.days.len()
    }
    pub fn shift_count(&self) -> usize {
        self.shifts.len()
    }

    /// Vrai si le couple (jour, shift) appartient bien à cette grille.
    pub fn contains(&self, day: Day, shift: Shift) -> bool {
        day.0 < self.days.len() && shift.0 < self.shifts.len()
    }

    pub fn day_label(&self, day: Day) -> &str {
        &self.days[day.0]
    }
    pub fn shift_label(&self, shift: Shift) -> &str {
        &self.shifts[shift.0]
    }

    pub fn find_day(&self, label: &str) -> Option<Day> {
        let label = label.trim();
        self.days
            .iter()
            .position(|d| d.eq_ignore_ascii_case(label))
            .map(Day)
    }

    /// Interprète une saisie de shift : libellé complet ou initiale non ambiguë,
    /// sans tenir compte de la casse ni des espaces autour (`m`, `Morning`, ` E `).
    pub fn parse_shift(&self, input: &str) -> Option<Shift> {
        let choice = input.trim().to_lowercase();
        if choice.is_empty() {
            return None;
        }
        if let Some(pos) = self.shifts.iter().position(|s| s.to_lowercase() == choice) {
            return Some(Shift(pos));
        }
        let mut chars = choice.chars();
        let (Some(initial), None) = (chars.next(), chars.next()) else {
            return None;
        };
        let mut matches = self
            .shifts
            .iter()
            .enumerate()
            .filter(|(_, s)| s.to_lowercase().starts_with(initial));
        match (matches.next(), matches.next()) {
            (Some((pos, _)), None) => Some(Shift(pos)),
            _ => None,
        }
    }
}

/// Préférences : au plus un shift souhaité par (employé, jour). Lecture seule pendant le calcul.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    by_employee: BTreeMap<Employee, BTreeMap<Day, Shift>>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remplace la préférence éventuelle déjà posée pour ce jour.
    pub fn set(&mut self, employee: Employee, day: Day, shift: Shift) {
        self.by_employee.entry(employee).or_default().insert(day, shift);
    }

    pub fn get(&self, employee: &Employee, day: Day) -> Option<Shift> {
        self.by_employee
            .get(employee)
            .and_then(|days| days.get(&day))
            .copied()
    }
}

/// Planning : (jour, shift) → employés affectés, dans l'ordre d'affectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    shift_count: usize,
    slots: Vec<Vec<Employee>>,
}

impl Schedule {
    pub fn empty(calendar: &Calendar) -> Self {
        Self {
            shift_count: calendar.shift_count(),
            slots: vec![Vec::new(); calendar.day_count() * calendar.shift_count()],
        }
    }

    fn slot_index(&self, day: Day, shift: Shift) -> usize {
        day.0 * self.shift_count + shift.0
    }

    pub fn assigned(&self, day: Day, shift: Shift) -> &[Employee] {
        &self.slots[self.slot_index(day, shift)]
    }

    pub fn count(&self, day: Day, shift: Shift) -> usize {
        self.assigned(day, shift).len()
    }

    pub(crate) fn push(&mut self, day: Day, shift: Shift, employee: Employee) {
        let idx = self.slot_index(day, shift);
        self.slots[idx].push(employee);
    }

    /// Shift(s) tenus par `employee` ce jour-là (au plus un une fois le calcul terminé).
    pub fn shifts_of(&self, employee: &Employee, day: Day) -> Vec<Shift> {
        (0..self.shift_count)
            .map(Shift)
            .filter(|s| self.assigned(day, *s).contains(employee))
            .collect()
    }

    pub fn total_assignments(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }
}

/// Nombre de jours travaillés par employé ; tout le roster y figure, à 0 au besoin.
pub type WorkedDays = BTreeMap<Employee, u32>;
