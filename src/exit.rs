use glam::{dvec2, DVec2};

/// Decides when user input should end the display.
///
/// Keys and mouse buttons exit immediately. Cursor movement exits once the cursor has
/// travelled more than [`ExitPolicy::MOVE_THRESHOLD`] from the first position seen; that
/// first sample only sets the baseline.
#[derive(Debug, Copy, Clone, Default)]
pub struct ExitPolicy {
    baseline: Option<DVec2>,
}

impl ExitPolicy {
    pub const MOVE_THRESHOLD: f64 = 10.;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key(&mut self) -> bool {
        true
    }

    pub fn on_mouse_button(&mut self) -> bool {
        true
    }

    pub fn on_cursor_moved(&mut self, (x, y): (f64, f64)) -> bool {
        let position = dvec2(x, y);
        match self.baseline {
            None => {
                self.baseline = Some(position);
                false
            }
            Some(baseline) => position.distance(baseline) > Self::MOVE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_move_only_records_baseline() {
        let mut policy = ExitPolicy::new();
        assert!(!policy.on_cursor_moved((500., 500.)));
        assert!(!policy.on_cursor_moved((500., 500.)));
    }

    #[test]
    fn move_threshold_is_strict() {
        let mut policy = ExitPolicy::new();
        policy.on_cursor_moved((100., 100.));
        assert!(!policy.on_cursor_moved((110., 100.)));
        assert!(!policy.on_cursor_moved((100., 90.)));
        assert!(policy.on_cursor_moved((110.01, 100.)));
    }

    #[test]
    fn movement_is_measured_from_the_first_sample() {
        let mut policy = ExitPolicy::new();
        policy.on_cursor_moved((0., 0.));
        // Small steps add up against the baseline, not the previous sample.
        for x in 1..=10 {
            assert!(!policy.on_cursor_moved((x as f64, 0.)));
        }
        assert!(policy.on_cursor_moved((11., 0.)));
    }

    #[test]
    fn diagonal_distance_is_euclidean() {
        let mut policy = ExitPolicy::new();
        policy.on_cursor_moved((0., 0.));
        assert!(!policy.on_cursor_moved((7., 7.)));
        assert!(policy.on_cursor_moved((8., 8.)));
    }

    #[test]
    fn keys_and_buttons_always_exit() {
        let mut policy = ExitPolicy::new();
        assert!(policy.on_key());
        assert!(policy.on_mouse_button());
    }
}
