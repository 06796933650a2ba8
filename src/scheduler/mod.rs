mod assignment;
mod picker;
mod staffing;
mod types;

pub use picker::{Picker, SeededPicker};
pub use types::{FallbackPolicy, Rules, ScheduleOutcome, Shortage};

use crate::model::{Calendar, Day, Employee, Preferences, Schedule, Shift, WorkedDays};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Scheduler : état mutable d'un seul run (planning, jours travaillés, présents du jour).
///
/// Construit par run puis consommé par [`Scheduler::schedule_week`] ; deux runs ne
/// partagent jamais d'état.
#[derive(Debug)]
pub struct Scheduler<'c> {
    calendar: &'c Calendar,
    rules: Rules,
    schedule: Schedule,
    worked_days: WorkedDays,
    assigned_today: Vec<BTreeSet<Employee>>,
}

impl<'c> Scheduler<'c> {
    pub fn new(calendar: &'c Calendar, rules: Rules) -> Self {
        Self {
            calendar,
            rules,
            schedule: Schedule::empty(calendar),
            worked_days: WorkedDays::new(),
            assigned_today: vec![BTreeSet::new(); calendar.day_count()],
        }
    }

    /// Planifie la semaine, jour par jour dans l'ordre du calendrier.
    ///
    /// L'ordre de `employees` est un paramètre d'équité : à chaque jour, les premiers
    /// de la liste passent en premier sur les passes préférence puis repli, et gagnent
    /// donc les places disputées. Le hasard n'intervient que dans le complément au
    /// minimum, via `picker`.
    pub fn schedule_week<P: Picker>(
        mut self,
        employees: &[Employee],
        preferences: &Preferences,
        picker: &mut P,
    ) -> ScheduleOutcome {
        for employee in employees {
            self.worked_days.entry(employee.clone()).or_insert(0);
        }

        let calendar = self.calendar;
        for day in calendar.days() {
            assignment::place_by_preference(&mut self, day, employees, preferences);
            staffing::fill_minimum_staff(&mut self, day, employees, picker);
            info!(
                day = calendar.day_label(day),
                placed = self.assigned_today[day.index()].len(),
                "day scheduled"
            );
        }

        let shortages = self.shortages();
        for s in &shortages {
            warn!(
                day = calendar.day_label(s.day),
                shift = calendar.shift_label(s.shift),
                count = s.count,
                min = self.rules.min_per_shift,
                "shift below minimum staffing"
            );
        }

        ScheduleOutcome {
            schedule: self.schedule,
            worked_days: self.worked_days,
            shortages,
        }
    }

    fn can_assign(&self, employee: &Employee, day: Day) -> bool {
        !self.assigned_today[day.index()].contains(employee)
            && self.days_worked(employee) < self.rules.max_days_per_employee
    }

    fn shift_has_room(&self, day: Day, shift: Shift) -> bool {
        self.schedule.count(day, shift) < self.rules.shift_cap
    }

    fn days_worked(&self, employee: &Employee) -> u32 {
        self.worked_days.get(employee).copied().unwrap_or(0)
    }

    /// Valide puis enregistre l'affectation ; `false` si l'employé ou le shift ne s'y prête pas.
    fn assign(&mut self, employee: &Employee, day: Day, shift: Shift) -> bool {
        if !self.calendar.contains(day, shift) {
            return false;
        }
        if !self.can_assign(employee, day) || !self.shift_has_room(day, shift) {
            return false;
        }
        debug!(
            employee = employee.as_str(),
            day = self.calendar.day_label(day),
            shift = self.calendar.shift_label(shift),
            "assigned"
        );
        self.schedule.push(day, shift, employee.clone());
        self.assigned_today[day.index()].insert(employee.clone());
        *self.worked_days.entry(employee.clone()).or_insert(0) += 1;
        true
    }

    fn shortages(&self) -> Vec<Shortage> {
        let mut out = Vec::new();
        for day in self.calendar.days() {
            for shift in self.calendar.shifts() {
                let count = self.schedule.count(day, shift);
                if count < self.rules.min_per_shift {
                    out.push(Shortage { day, shift, count });
                }
            }
        }
        out
    }
}

/// Raccourci : un run complet sur un état neuf.
pub fn schedule_week<P: Picker>(
    calendar: &Calendar,
    rules: Rules,
    employees: &[Employee],
    preferences: &Preferences,
    picker: &mut P,
) -> ScheduleOutcome {
    Scheduler::new(calendar, rules).schedule_week(employees, preferences, picker)
}
