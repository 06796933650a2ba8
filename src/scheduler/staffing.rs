use super::{Picker, Scheduler};
use crate::model::{Day, Employee};
use tracing::debug;

/// Passe 3 : complète chaque shift jusqu'au minimum par tirage uniforme parmi
/// les employés encore éligibles du roster complet.
///
/// Un shift qui ne peut plus être complété (plus personne d'éligible) est laissé
/// tel quel ; il ressortira dans les manques.
pub(super) fn fill_minimum_staff<P: Picker>(
    scheduler: &mut Scheduler<'_>,
    day: Day,
    employees: &[Employee],
    picker: &mut P,
) {
    let calendar = scheduler.calendar;
    for shift in calendar.shifts() {
        let mut pool: Vec<&Employee> = employees
            .iter()
            .filter(|e| scheduler.can_assign(e, day))
            .collect();

        while scheduler.schedule.count(day, shift) < scheduler.rules.min_per_shift {
            // l'éligibilité est revérifiée à chaque tirage, pas seulement à la construction
            pool.retain(|e| scheduler.can_assign(e, day));
            let Some(&pick) = picker.pick(&pool) else {
                debug!(
                    day = calendar.day_label(day),
                    shift = calendar.shift_label(shift),
                    "no eligible employee left"
                );
                break;
            };
            if !scheduler.assign(pick, day, shift) {
                pool.retain(|e| *e != pick);
            }
        }
    }
}
