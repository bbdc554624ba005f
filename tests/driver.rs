mod tests {
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    use card_light_composer::{DriverError, PwmOutput, SpiPwmOutput};
    use embedded_hal::digital::{self, OutputPin};
    use embedded_hal::spi::{self, SpiBus};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Write(Vec<u8>),
        Flush,
        Low,
        High,
    }

    type Log = Rc<RefCell<Vec<Op>>>;

    struct MockSpi(Log);

    impl spi::ErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiBus<u8> for MockSpi {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Infallible> {
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
            self.0.borrow_mut().push(Op::Write(words.to_vec()));
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Infallible> {
            self.write(write)?;
            self.read(read)
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Infallible> {
            self.write(&words.to_vec())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().push(Op::Flush);
            Ok(())
        }
    }

    struct MockPin {
        log: Log,
        fail: bool,
    }

    impl digital::ErrorType for MockPin {
        type Error = digital::ErrorKind;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), digital::ErrorKind> {
            if self.fail {
                return Err(digital::ErrorKind::Other);
            }
            self.log.borrow_mut().push(Op::Low);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), digital::ErrorKind> {
            if self.fail {
                return Err(digital::ErrorKind::Other);
            }
            self.log.borrow_mut().push(Op::High);
            Ok(())
        }
    }

    fn output(fail: bool) -> (SpiPwmOutput<MockSpi, MockPin>, Log) {
        let log = Log::default();
        let output = SpiPwmOutput::new(
            MockSpi(log.clone()),
            MockPin {
                log: log.clone(),
                fail,
            },
        );
        (output, log)
    }

    #[test]
    fn test_send_shifts_with_latch_low() {
        let (mut output, log) = output(false);
        output.send(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(*log.borrow(), vec![Op::Low, Op::Write(vec![1, 2, 3, 4, 5])]);
    }

    #[test]
    fn test_load_flushes_then_latches() {
        let (mut output, log) = output(false);
        output.load().unwrap();
        assert_eq!(*log.borrow(), vec![Op::Flush, Op::High]);
    }

    #[test]
    fn test_pin_error_is_reported() {
        let (mut output, log) = output(true);
        assert_eq!(
            output.send(&[0; 5]),
            Err(DriverError::Pin(digital::ErrorKind::Other))
        );
        // Nothing shifted with the latch in an unknown state
        assert!(log.borrow().is_empty());
    }
}
