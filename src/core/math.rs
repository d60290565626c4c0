// Math utilities and helper functions

/// Move `current` toward `target` by at most `max_delta`
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else if target > current {
        current + max_delta
    } else {
        current - max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approach_moves_toward_target() {
        assert_eq!(approach(0.0, 10.0, 2.0), 2.0);
        assert_eq!(approach(10.0, 0.0, 2.0), 8.0);
    }

    #[test]
    fn test_approach_clamps_at_target() {
        assert_eq!(approach(9.5, 10.0, 2.0), 10.0);
        assert_eq!(approach(10.0, 10.0, 2.0), 10.0);
    }
}
