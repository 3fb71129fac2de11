mod tests {
    use countdown_light_composer::{Duration, ReloadPolicy};

    fn policy() -> ReloadPolicy {
        ReloadPolicy::for_positions(Duration::from_millis(20), 5)
    }

    #[test]
    fn test_quantize_rounds_down_to_ticks() {
        assert_eq!(policy().quantize(Duration::from_millis(15_000)), 15_000);
        assert_eq!(policy().quantize(Duration::from_millis(15_019)), 15_000);
        assert_eq!(policy().quantize(Duration::from_millis(15_020)), 15_020);
    }

    #[test]
    fn test_quantize_clamps_to_one_tick_per_position() {
        assert_eq!(policy().minimum(), 100);
        assert_eq!(policy().quantize(Duration::from_millis(0)), 100);
        assert_eq!(policy().quantize(Duration::from_millis(99)), 100);
        assert_eq!(policy().quantize(Duration::from_millis(100)), 100);
    }

    #[test]
    fn test_quantize_caps_long_requests() {
        let full_scale = policy().quantize(Duration::from_secs(60 * 60 * 24 * 365));
        assert_eq!(full_scale % 20, 0);
        assert!(full_scale > u32::MAX - 20);
    }

    #[test]
    fn test_policy_accessors() {
        let policy = ReloadPolicy::new(Duration::from_millis(50), 3);
        assert_eq!(policy.tick_period(), Duration::from_millis(50));
        assert_eq!(policy.tick_millis(), 50);
        assert_eq!(policy.minimum(), 150);
    }
}
