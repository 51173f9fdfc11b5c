//! Tests for the solve progress display

#[cfg(test)]
mod tests {
    use roadweave::io::progress::SolveProgress;

    // The display has no observable output surface in tests; these pin the
    // quiet and visible paths against panics and misuse.
    #[test]
    fn test_quiet_display_swallows_updates() {
        let progress = SolveProgress::new(25, true);
        progress.start_attempt(0);
        progress.update(10);
        progress.update(25);
        progress.finish("done".to_string());
    }

    #[test]
    fn test_visible_display_accepts_the_full_range() {
        let progress = SolveProgress::new(4, false);
        progress.start_attempt(0);
        for fixed in 0..=4 {
            progress.update(fixed);
        }
        progress.start_attempt(1);
        progress.update(0);
        progress.finish("map written".to_string());
    }
}
