mod tests {
    use card_light_composer::output::TICKS_PER_MS;
    use card_light_composer::{AnimConfig, Card, PhaseFrame, PwmBanks, PwmOutput, PwmStreamer};

    struct NullOutput;

    impl PwmOutput for NullOutput {
        type Error = ();

        fn send(&mut self, _frame: &PhaseFrame) -> Result<(), ()> {
            Ok(())
        }

        fn load(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    fn stream_until_swapped(banks: &PwmBanks, streamer: &mut PwmStreamer) -> u32 {
        let mut ticks = 0;
        while banks.is_swap_pending() {
            streamer.on_tick(banks, &mut NullOutput);
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_prepare_waits_for_pending_swap() {
        let banks = PwmBanks::new();
        let mut card = Card::new(&AnimConfig::DEFAULT, 1);
        card.start(&banks);

        assert_eq!(card.prepare(&banks), Some(46 * TICKS_PER_MS));
        assert_eq!(card.prepare(&banks), None);

        let mut streamer = PwmStreamer::new();
        let ticks = stream_until_swapped(&banks, &mut streamer);
        assert!(ticks >= 46 * TICKS_PER_MS);

        assert_eq!(card.prepare(&banks), Some(2 * 46 * TICKS_PER_MS));
    }

    #[test]
    fn test_active_bank_shows_brightness() {
        let banks = PwmBanks::new();
        let mut card = Card::new(&AnimConfig::DEFAULT, 1);
        let mut streamer = PwmStreamer::new();
        card.start(&banks);

        // Run through the stars fade-in and past the topper and balls starts
        for _ in 0..200 {
            card.prepare(&banks);
            stream_until_swapped(&banks, &mut streamer);
        }

        let leds = card.leds();
        let active = banks.active();
        for led in 0..40 {
            assert_eq!(
                banks.pulse_length(active, led),
                usize::from(card_light_composer::pulse_length(leds.get(led))),
                "LED {led}"
            );
        }
    }
}
