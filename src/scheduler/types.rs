use crate::model::{Day, Schedule, Shift, WorkedDays};
use serde::{Deserialize, Serialize};

/// Règles d'affectation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub min_per_shift: usize,
    pub max_days_per_employee: u32,
    pub shift_cap: usize,
    pub fallback: FallbackPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            min_per_shift: 2,
            max_days_per_employee: 5,
            shift_cap: 3,
            fallback: FallbackPolicy::FixedOrder,
        }
    }
}

/// Que faire d'un employé dont la préférence n'a pas pu être honorée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Premier shift libre du jour dans l'ordre fixe (biais connu vers le premier shift).
    FixedOrder,
    /// Pas de repli : seul le complément aléatoire peut encore le placer.
    Disabled,
}

/// Shift resté sous le minimum après complément.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortage {
    pub day: Day,
    pub shift: Shift,
    pub count: usize,
}

/// Résultat d'une semaine de planification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub schedule: Schedule,
    pub worked_days: WorkedDays,
    pub shortages: Vec<Shortage>,
}

impl ScheduleOutcome {
    pub fn is_fully_staffed(&self) -> bool {
        self.shortages.is_empty()
    }
}
