mod tests {
    use countdown_light_composer::color::{BLACK, Rgb, WHITE};
    use countdown_light_composer::render::{PositionState, position_state, render, render_lane};

    const POSITIONS: usize = 5;
    const FULL_SCALE: u32 = 15000;

    fn gray(value: u8) -> Rgb {
        Rgb::new(value, value, value)
    }

    fn lane(remaining: u32, full_scale: u32) -> [Rgb; POSITIONS] {
        let mut leds = [BLACK; POSITIONS];
        render_lane(remaining, full_scale, WHITE, &mut leds);
        leds
    }

    #[test]
    fn test_countdown_zero_is_black() {
        assert_eq!(lane(0, FULL_SCALE), [BLACK; POSITIONS]);
        for full_scale in [1, 7, 100, FULL_SCALE, u32::MAX] {
            for position in 0..POSITIONS {
                assert_eq!(render(position, 0, full_scale, WHITE, POSITIONS), BLACK);
            }
        }
    }

    #[test]
    fn test_full_scale_lights_every_position() {
        for full_scale in [5, 7, 100, 15001, FULL_SCALE, u32::MAX] {
            for position in 0..POSITIONS {
                assert_eq!(
                    render(position, full_scale, full_scale, WHITE, POSITIONS),
                    WHITE
                );
            }
        }
    }

    #[test]
    fn test_partial_pixel_zero() {
        assert_eq!(lane(1500, FULL_SCALE), [gray(127), BLACK, BLACK, BLACK, BLACK]);
    }

    #[test]
    fn test_complete_pixel_zero() {
        assert_eq!(lane(3000, FULL_SCALE), [WHITE, BLACK, BLACK, BLACK, BLACK]);
    }

    #[test]
    fn test_partial_pixel_one() {
        assert_eq!(lane(4500, FULL_SCALE), [WHITE, gray(127), BLACK, BLACK, BLACK]);
    }

    #[test]
    fn test_full_pixel_one() {
        assert_eq!(lane(6000, FULL_SCALE), [WHITE, WHITE, BLACK, BLACK, BLACK]);
    }

    #[test]
    fn test_partial_pixel_four() {
        assert_eq!(lane(14000, FULL_SCALE), [WHITE, WHITE, WHITE, WHITE, gray(170)]);
    }

    #[test]
    fn test_full_pixel_four() {
        assert_eq!(lane(FULL_SCALE, FULL_SCALE), [WHITE; POSITIONS]);
    }

    #[test]
    fn test_just_below_first_bucket() {
        assert_eq!(lane(2999, FULL_SCALE), [gray(254), BLACK, BLACK, BLACK, BLACK]);
        assert_eq!(lane(1, FULL_SCALE), [BLACK; POSITIONS]);
        assert_eq!(
            position_state(0, 1, FULL_SCALE, POSITIONS),
            PositionState::Partial {
                local_remaining: 1,
                span: 3000
            }
        );
    }

    #[test]
    fn test_partial_scales_each_channel() {
        let color = Rgb::new(200, 100, 50);
        assert_eq!(render(0, 1500, FULL_SCALE, color, POSITIONS), Rgb::new(100, 50, 25));
        assert_eq!(render(1, 1500, FULL_SCALE, color, POSITIONS), BLACK);
    }

    #[test]
    fn test_rounding_bias_lands_on_partial() {
        // 15001 / 5 leaves one unit over; bucket 4 starts at 12000
        assert_eq!(render(4, 13500, 15001, WHITE, POSITIONS), gray(127));
        assert_eq!(render(4, 15000, 15001, WHITE, POSITIONS), WHITE);
        assert_eq!(render(4, 12001, 15001, WHITE, POSITIONS), BLACK);
        assert_eq!(render(3, 12001, 15001, WHITE, POSITIONS), WHITE);
    }

    #[test]
    fn test_partial_saturates_instead_of_wrapping() {
        // span is 1 but the bucket holds 2 units
        assert_eq!(
            position_state(3, 7, 9, POSITIONS),
            PositionState::Partial {
                local_remaining: 2,
                span: 1
            }
        );
        assert_eq!(render(3, 7, 9, WHITE, POSITIONS), WHITE);
    }

    #[test]
    fn test_full_scale_shorter_than_lane() {
        assert_eq!(lane(3, 3), [WHITE; POSITIONS]);
        assert_eq!(lane(2, 3), [WHITE, WHITE, WHITE, BLACK, BLACK]);
        assert_eq!(lane(1, 3), [WHITE, BLACK, BLACK, BLACK, BLACK]);
    }

    #[test]
    fn test_out_of_domain_inputs() {
        assert_eq!(lane(100, 0), [BLACK; POSITIONS]);
        assert_eq!(lane(20000, FULL_SCALE), [WHITE; POSITIONS]);
        assert_eq!(render(POSITIONS, FULL_SCALE, FULL_SCALE, WHITE, POSITIONS), BLACK);
        assert_eq!(render(0, 10, 10, WHITE, 0), BLACK);
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let half = u32::MAX / 2;
        let leds = lane(half, u32::MAX);
        assert_eq!(leds[0], WHITE);
        assert_eq!(leds[1], WHITE);
        assert_eq!(leds[3], BLACK);
        assert_eq!(leds[4], BLACK);
    }

    #[test]
    fn test_positions_never_relight() {
        for full_scale in [7, 100, 1234, FULL_SCALE] {
            for position in 0..POSITIONS {
                let mut previous = u8::MAX;
                for remaining in (0..=full_scale).rev() {
                    let value = render(position, remaining, full_scale, WHITE, POSITIONS).r;
                    assert!(
                        value <= previous,
                        "position {position} relit at {remaining}/{full_scale}"
                    );
                    previous = value;
                }
                assert_eq!(previous, 0);
            }
        }
    }

    #[test]
    fn test_single_partial_position() {
        for full_scale in [100, 1234, FULL_SCALE] {
            for remaining in 1..full_scale {
                let partial = (0..POSITIONS)
                    .filter(|&position| {
                        matches!(
                            position_state(position, remaining, full_scale, POSITIONS),
                            PositionState::Partial { .. }
                        )
                    })
                    .count();
                assert_eq!(partial, 1, "at {remaining}/{full_scale}");

                let dimmed = lane(remaining, full_scale)
                    .iter()
                    .filter(|led| led.r != 0 && led.r != 255)
                    .count();
                assert!(dimmed <= 1);
            }
        }
    }
}
