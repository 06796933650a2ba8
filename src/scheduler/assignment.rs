use super::{FallbackPolicy, Scheduler};
use crate::model::{Day, Employee, Preferences, Shift};

/// Passes 1 et 2 d'une journée : préférence, puis repli selon la politique.
pub(super) fn place_by_preference(
    scheduler: &mut Scheduler<'_>,
    day: Day,
    employees: &[Employee],
    preferences: &Preferences,
) {
    for employee in employees {
        if !scheduler.can_assign(employee, day) {
            continue;
        }

        let preferred = preferred_shift(scheduler, employee, day, preferences);
        if let Some(shift) = preferred {
            if scheduler.assign(employee, day, shift) {
                continue;
            }
        }

        if scheduler.rules.fallback == FallbackPolicy::FixedOrder {
            fall_back(scheduler, employee, day, preferences);
        }
    }
}

/// Préférence du jour, ignorée si elle vise un shift hors de cette grille.
fn preferred_shift(
    scheduler: &Scheduler<'_>,
    employee: &Employee,
    day: Day,
    preferences: &Preferences,
) -> Option<Shift> {
    preferences
        .get(employee, day)
        .filter(|shift| scheduler.calendar.contains(day, *shift))
}

/// Premier shift du jour avec de la place, dans l'ordre fixe, sauf celui déjà tenté.
fn fall_back(
    scheduler: &mut Scheduler<'_>,
    employee: &Employee,
    day: Day,
    preferences: &Preferences,
) -> bool {
    let preferred = preferred_shift(scheduler, employee, day, preferences);
    let calendar = scheduler.calendar;
    for shift in calendar.shifts() {
        if Some(shift) == preferred {
            continue;
        }
        if scheduler.assign(employee, day, shift) {
            return true;
        }
    }
    false
}
