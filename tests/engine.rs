mod tests {
    use card_light_composer::engine::{Envelope, Script, ScriptSeg, Shimmer, ShimmerSeg};
    use card_light_composer::topology::STARS_LIST;
    use card_light_composer::{Brightness, Duration, Rng};

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn calm_shimmer(duration: Option<Duration>) -> Shimmer {
        Shimmer {
            bright_br: 47,
            // Never dims during the fade-in
            bright_delay: ms(100_000),
            dimmed_br: 15,
            dimmed_delay: ms(400),
            fade_delay: ms(640),
            duration,
        }
    }

    #[test]
    fn test_fade_in_reaches_nominal_brightness() {
        let mut script = calm_shimmer(None).script(&STARS_LIST);
        let mut rng = Rng::with_seed(5);
        let mut leds = Brightness::new();

        let step = script.step(&mut rng, &mut leds);
        assert_eq!(step.delay, ms(10));
        assert!(STARS_LIST.iter().all(|&led| leds.get(led) == 0));

        for _ in 1..64 {
            let step = script.step(&mut rng, &mut leds);
            assert_eq!(step.delay, ms(10));
            assert!(!step.last);
        }
        assert!(STARS_LIST.iter().all(|&led| leds.get(led) == 47));

        // Holds after the fade-in
        let step = script.step(&mut rng, &mut leds);
        assert!(step.delay >= ms(100_000 / 8 - 640));
        assert!(!script.envelope().is_fading());
        assert!(STARS_LIST.iter().all(|&led| leds.get(led) == 47));
    }

    #[test]
    fn test_script_ends_with_dark_last_step() {
        let segs = [ScriptSeg::hold(ms(0), ms(0))];
        let mut script = Script::new(&segs, &[0, 1, 2], 40, ms(64), Some(ms(100)));
        let mut rng = Rng::with_seed(5);
        let mut leds = Brightness::filled(63);
        let mut elapsed = ms(0);

        let mut steps = 0;
        loop {
            let step = script.step(&mut rng, &mut leds);
            elapsed += step.delay;
            steps += 1;
            if step.last {
                break;
            }
            assert!(steps < 1000);
        }

        // 64 fade-in steps, the body, 64 fade-out steps
        assert_eq!(steps, 129);
        assert_eq!(elapsed, ms(64 + 100 + 64));
        assert_eq!(&leds.as_slice()[..4], &[0, 0, 0, 63]);
    }

    #[test]
    fn test_script_leds_cycle_through_segments() {
        let segs = [
            ScriptSeg::hold(ms(50), ms(50)),
            ScriptSeg::fixed(2, -10, ms(20)),
            ScriptSeg::fixed(2, 10, ms(20)),
        ];
        // No fade
        let mut script = Script::new(&segs, &[5], 40, ms(0), None);
        let mut rng = Rng::with_seed(5);
        let mut leds = Brightness::new();

        // Fade-in steps are 1 ms long, skip them
        while script.envelope().is_fading() {
            script.step(&mut rng, &mut leds);
        }

        let mut seen = Vec::new();
        for _ in 0..8 {
            script.step(&mut rng, &mut leds);
            seen.push(leds.get(5));
        }
        assert!(seen.contains(&20));
        assert!(seen.iter().all(|&br| (20..=40).contains(&br)));
    }

    #[test]
    fn test_shimmer_segments() {
        let segs = calm_shimmer(None).segments();

        let bright = segs[ShimmerSeg::Bright as usize];
        assert_eq!(bright.step_delay_min, ms(12_500));
        assert_eq!(bright.step_delay_max, ms(100_000));

        let dimming = segs[ShimmerSeg::Dimming as usize];
        assert_eq!(dimming.step_num_min, 6);
        assert_eq!(dimming.step_br_off, -5);
        assert_eq!(dimming.step_delay_min, ms(25));

        let dimmed = segs[ShimmerSeg::Dimmed as usize];
        assert_eq!(dimmed.step_delay_min, ms(100));

        let restoring = segs[ShimmerSeg::Restoring as usize];
        assert_eq!(restoring.step_br_off, 5);
    }

    #[test]
    fn test_shimmer_small_delta_uses_unit_steps() {
        let shimmer = Shimmer {
            bright_br: 20,
            dimmed_br: 17,
            ..calm_shimmer(None)
        };
        let dimming = shimmer.segments()[ShimmerSeg::Dimming as usize];
        assert_eq!(dimming.step_num_min, 3);
        assert_eq!(dimming.step_br_off, -1);
        assert_eq!(dimming.step_delay_min, ms(50));
    }

    #[test]
    fn test_envelope_without_duration_never_fades_out() {
        let mut envelope = Envelope::new(ms(64), None);
        for _ in 0..64 {
            envelope.elapse(envelope.next_event());
        }
        assert!(!envelope.is_fading());
        assert_eq!(envelope.next_event(), Duration::MAX);
        assert_eq!(envelope.apply(47), 47);
        assert!(!envelope.is_done());
    }
}
