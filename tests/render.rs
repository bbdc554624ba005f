mod tests {
    use card_light_composer::renderer::PULSE_LENGTHS;
    use card_light_composer::topology::{BALLS_LIST, LEDS_BR_MAX, LEDS_NUM};
    use card_light_composer::{Brightness, PwmBanks, Renderer, pulse_length};

    /// Scattered brightness levels, shifted by `offset` LEDs
    #[allow(clippy::cast_possible_truncation)]
    fn ramp(offset: usize) -> Brightness {
        let levels = usize::from(LEDS_BR_MAX) + 1;
        let mut leds = Brightness::new();
        for led in 0..LEDS_NUM {
            leds.set(led as u8, ((led + offset) * 7 % levels) as u8);
        }
        leds
    }

    #[test]
    fn test_pulse_lengths_do_not_decrease() {
        assert!(PULSE_LENGTHS.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(pulse_length(0), 0);
        assert_eq!(pulse_length(LEDS_BR_MAX), 64);
    }

    #[test]
    fn test_render_lights_pulse_length_phases() {
        let mut seen = [false; LEDS_BR_MAX as usize + 1];
        for offset in [0, LEDS_NUM] {
            let banks = PwmBanks::new();
            let leds = ramp(offset);
            Renderer::new(&banks).render(&leds);

            let bank = banks.inactive();
            for led in 0..LEDS_NUM as u8 {
                seen[usize::from(leds.get(led))] = true;
                let length = usize::from(pulse_length(leds.get(led)));
                assert_eq!(banks.pulse_length(bank, led), length);
                // Lit phases come first
                for phase in 0..64 {
                    assert_eq!(banks.is_lit(bank, phase, led), phase < length);
                }
            }
        }
        // Every brightness level was rendered
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_render_leaves_active_bank_alone() {
        let banks = PwmBanks::new();
        Renderer::new(&banks).render(&Brightness::filled(LEDS_BR_MAX));
        for phase in 0..64 {
            assert_eq!(banks.phase(banks.active(), phase), [0; 5]);
        }
    }

    #[test]
    fn test_render_list_matches_full_render() {
        let full = PwmBanks::new();
        let partial = PwmBanks::new();
        let before = Brightness::filled(20);
        let mut after = before.clone();
        for &led in &BALLS_LIST {
            after.set(led, led % 64);
        }

        Renderer::new(&full).render(&after);
        let renderer = Renderer::new(&partial);
        renderer.render(&before);
        renderer.render_list(&after, &BALLS_LIST);

        for phase in 0..64 {
            assert_eq!(
                full.phase(full.inactive(), phase),
                partial.phase(partial.inactive(), phase)
            );
        }
    }
}
