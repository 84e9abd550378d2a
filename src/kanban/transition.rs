use crate::kanban::PlanStatus;

/// Minimum progress implied by sitting in a column.
pub fn progress_floor(status: PlanStatus) -> u8 {
    match status {
        PlanStatus::Todo => 0,
        PlanStatus::Inprogress => 20,
        PlanStatus::Validation => 80,
        PlanStatus::Done => 100,
    }
}

/// Progress after dropping a plan on `target`. The column floor is applied
/// without ever lowering progress already above it; `todo` leaves progress
/// untouched even when moving backward.
pub fn progress_after_drop(target: PlanStatus, current_progress: u8) -> u8 {
    match target {
        PlanStatus::Todo => current_progress,
        other => current_progress.max(progress_floor(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::{progress_after_drop, progress_floor};
    use crate::kanban::PlanStatus;

    #[test]
    fn validation_floor_lifts_low_progress() {
        assert_eq!(progress_after_drop(PlanStatus::Validation, 50), 80);
    }

    #[test]
    fn validation_floor_keeps_higher_progress() {
        assert_eq!(progress_after_drop(PlanStatus::Validation, 90), 90);
    }

    #[test]
    fn done_pins_progress_to_hundred() {
        assert_eq!(progress_after_drop(PlanStatus::Done, 0), 100);
        assert_eq!(progress_after_drop(PlanStatus::Done, 100), 100);
    }

    #[test]
    fn todo_leaves_progress_untouched() {
        // a backward move keeps whatever progress was reached
        assert_eq!(progress_after_drop(PlanStatus::Todo, 100), 100);
        assert_eq!(progress_after_drop(PlanStatus::Todo, 0), 0);
    }

    #[test]
    fn progress_never_decreases_on_forward_columns() {
        for status in [
            PlanStatus::Inprogress,
            PlanStatus::Validation,
            PlanStatus::Done,
        ] {
            for current in [0u8, 10, 20, 50, 80, 99, 100] {
                let after = progress_after_drop(status, current);
                assert!(after >= current);
                assert!(after >= progress_floor(status));
            }
        }
    }
}
