mod tests {
    use card_light_composer::fx::{STARS_POOL, STOP_DELAY};
    use card_light_composer::topology::{BALLS_LIST, STARS_LIST, TOPPER_LIST};
    use card_light_composer::{Anim, AnimConfig, AnimThread, Brightness, Duration, EffectId, Rng};

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_idle_threads_keep_their_delay() {
        let mut anim = Anim::new([
            AnimThread::new(&STARS_LIST, EffectId::Stop, STOP_DELAY),
            AnimThread::new(&TOPPER_LIST, EffectId::Stop, STOP_DELAY),
            AnimThread::new(&BALLS_LIST, EffectId::Stop, STOP_DELAY),
        ]);
        let mut leds = Brightness::filled(20);
        let mut rng = Rng::with_seed(3);

        for _ in 0..3 {
            assert_eq!(anim.step(&mut leds, &mut rng), STOP_DELAY);
            assert_eq!(leds, Brightness::filled(20));
        }
    }

    #[test]
    fn test_first_step_runs_stars_only() {
        let mut anim = Anim::from_config(&AnimConfig::DEFAULT);
        let mut leds = Brightness::new();
        let mut rng = Rng::with_seed(3);

        assert_eq!(anim.step(&mut leds, &mut rng), ms(46));
        let [stars, topper, balls] = anim.threads();
        assert!(stars.ran());
        assert!(!topper.ran());
        assert!(!balls.ran());
        assert_eq!(topper.delay(), ms(1000));
        assert_eq!(balls.delay(), ms(1500));
        assert_eq!(anim.changed_groups().collect::<Vec<_>>(), vec![&STARS_LIST[..]]);

        assert_eq!(anim.step(&mut leds, &mut rng), ms(46));
        let [_, topper, balls] = anim.threads();
        assert_eq!(topper.delay(), ms(1000 - 46));
        assert_eq!(balls.delay(), ms(1500 - 46));
    }

    #[test]
    fn test_threads_start_at_their_offsets() {
        let mut anim = Anim::from_config(&AnimConfig::DEFAULT);
        let mut leds = Brightness::new();
        let mut rng = Rng::with_seed(3);
        let mut now = ms(0);

        while now < ms(1000) {
            now += anim.step(&mut leds, &mut rng);
            assert!(!anim.threads()[1].ran());
        }
        // The step reaching the topper start only schedules it
        assert!(anim.threads()[1].delay() < ms(46));
        assert_eq!(anim.threads()[1].effect(), EffectId::TopperFadeIn);
    }

    #[test]
    fn test_zero_delay_hands_over_within_step() {
        let mut anim = Anim::new([AnimThread::new(&STARS_LIST, EffectId::StarsRandom, ms(0))]);
        let mut leds = Brightness::new();
        let mut rng = Rng::with_seed(9);

        let delay = anim.step(&mut leds, &mut rng);

        let [stars] = anim.threads();
        assert!(delay > ms(0));
        assert!(STARS_POOL.contains(&stars.effect()));
        assert_eq!(stars.delay(), delay);
    }

    #[test]
    fn test_random_rotation_never_repeats() {
        let mut anim = Anim::new([AnimThread::new(&BALLS_LIST, EffectId::BallsRandom, ms(0))]);
        let mut leds = Brightness::new();
        let mut rng = Rng::with_seed(11);
        let mut picks = Vec::new();

        // Ten minutes of balls effects
        let mut now = ms(0);
        while now < ms(600_000) {
            now += anim.step(&mut leds, &mut rng);
            let effect = anim.threads()[0].effect();
            if picks.last() != Some(&effect) {
                picks.push(effect);
            }
        }

        let random_picks: Vec<_> = picks
            .iter()
            .copied()
            .filter(|id| !matches!(id, EffectId::BallsWave | EffectId::BallsFadeOut))
            .collect();
        assert!(random_picks.len() > 5);
        assert!(random_picks.windows(2).all(|pair| pair[0] != pair[1]));
    }
}
