//! Tests pinning configuration constants the algorithms rely on

#[cfg(test)]
mod tests {
    use roadweave::io::configuration::{
        ANIMATION_DURATION, CHANGING_DURATION, CONSTRUCTION_DURATION, GENERATED_DURATION,
        MAX_BACKTRACKS, RECENT_PLACEMENT_LIMIT, REMOVAL_DURATION, WFC_STEPS_PER_CYCLE,
    };

    #[test]
    fn test_backtrack_budget() {
        assert_eq!(MAX_BACKTRACKS, 100);
    }

    #[test]
    fn test_lifecycle_timers_are_positive() {
        for duration in [
            CONSTRUCTION_DURATION,
            GENERATED_DURATION,
            CHANGING_DURATION,
            REMOVAL_DURATION,
            ANIMATION_DURATION,
        ] {
            assert!(!duration.is_zero());
        }
        // Solver-placed tiles settle faster than user-built ones.
        assert!(GENERATED_DURATION < CONSTRUCTION_DURATION);
    }

    #[test]
    fn test_driven_runs_get_a_meaningful_step_budget() {
        assert!(WFC_STEPS_PER_CYCLE >= 100);
        assert!(RECENT_PLACEMENT_LIMIT >= 1);
    }
}
