//! Tests for the failure taxonomy and error formatting

#[cfg(test)]
mod tests {
    use roadweave::catalog::tile::TileId;
    use roadweave::io::error::{GeneratorError, SolverFailure, invalid_parameter};
    use roadweave::spatial::cell::{Cell, GridSize};

    #[test]
    fn test_recoverable_failures() {
        assert!(SolverFailure::NoSuperpositionOptions.is_recoverable());
        assert!(SolverFailure::TileUnavailable(TileId::new(3)).is_recoverable());
        assert!(!SolverFailure::InvalidDirection.is_recoverable());
        assert!(!SolverFailure::TileNotFound.is_recoverable());
        assert!(!SolverFailure::BacktrackFailed.is_recoverable());
    }

    #[test]
    fn test_failure_display_names_the_tile() {
        let size = GridSize {
            horizontal_cells: 4,
            vertical_cells: 4,
        };
        let cell = Cell::new(size, 2, 3).expect("cell exists");
        let failure = SolverFailure::InvalidLargeTilePlacement {
            cell,
            id: TileId::new(25),
            reason: "cell is fixed",
        };
        let text = failure.to_string();
        assert!(text.contains("#25"));
        assert!(text.contains("(2, 3)"));
        assert!(text.contains("cell is fixed"));
    }

    #[test]
    fn test_solver_failure_converts_to_crate_error() {
        let error: GeneratorError = SolverFailure::BacktrackFailed.into();
        assert!(matches!(
            error,
            GeneratorError::Solve {
                failure: SolverFailure::BacktrackFailed
            }
        ));
        assert!(error.to_string().contains("solve failed"));
    }

    #[test]
    fn test_invalid_parameter_formatting() {
        let error = invalid_parameter("width", &0, &"map width must be at least 1 cell");
        let text = error.to_string();
        assert!(text.contains("width"));
        assert!(text.contains("at least 1 cell"));
    }
}
