#[cfg(feature = "std")]
mod tests {
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
    use sht3x_device::domain::temperature::TemperatureUnit;
    use sht3x_device::drivers::sensors::sht3x::crc::checksum;
    use sht3x_device::drivers::sensors::sht3x::{Sht3x, ADDR};
    use sht3x_device::kernel::signal::StopSignal;
    use sht3x_device::logger::Logger;
    use sht3x_device::testutil::{FakeSensor, FixedClock, RecordingSink};
    use std::io::ErrorKind;
    use std::time::Duration;

    fn logger(unit: TemperatureUnit) -> Logger {
        Logger::new(Duration::ZERO, unit)
    }

    #[test]
    fn one_row_per_iteration_until_stopped() {
        let stop = StopSignal::new();
        let mut sensor = FakeSensor::new().sample(77.0, 40.0).sample(78.5, 41.25);
        let mut sink = RecordingSink::new().stop_after(3, &stop);

        let written = logger(TemperatureUnit::Fahrenheit)
            .run(&mut sensor, &mut sink, &FixedClock::new(), &stop)
            .unwrap();

        assert_eq!(written, 3);
        assert_eq!(
            sink.lines(),
            vec![
                "2024-01-01 00:00:00,77.0,40.0",
                "2024-01-01 00:00:01,78.5,41.25",
                "2024-01-01 00:00:02,None,None",
            ]
        );
        assert_eq!(sensor.units, vec![TemperatureUnit::Fahrenheit; 3]);
    }

    #[test]
    fn switches_to_periodic_and_starts_once() {
        let stop = StopSignal::new();
        let mut sensor = FakeSensor::new();
        let mut sink = RecordingSink::new().stop_after(4, &stop);
        let mut logger = logger(TemperatureUnit::Celsius);

        logger
            .run(&mut sensor, &mut sink, &FixedClock::new(), &stop)
            .unwrap();

        assert_eq!(sensor.configure_calls, 1);
        assert_eq!(sensor.begin_calls, 1);
        assert!(logger.acquisition_started());
    }

    #[test]
    fn already_periodic_sensor_is_not_reconfigured() {
        let stop = StopSignal::new();
        let mut sensor = FakeSensor::new().periodic();
        let mut sink = RecordingSink::new().stop_after(1, &stop);

        logger(TemperatureUnit::Celsius)
            .run(&mut sensor, &mut sink, &FixedClock::new(), &stop)
            .unwrap();

        assert_eq!(sensor.configure_calls, 0);
    }

    #[test]
    fn failed_start_is_retried_next_iteration() {
        let stop = StopSignal::new();
        let mut sensor = FakeSensor::new().fail_begin(2).sample(20.0, 50.0);
        let mut sink = RecordingSink::new().stop_after(3, &stop);

        logger(TemperatureUnit::Celsius)
            .run(&mut sensor, &mut sink, &FixedClock::new(), &stop)
            .unwrap();

        assert_eq!(sensor.begin_calls, 3);
        assert_eq!(
            sink.lines(),
            vec![
                "2024-01-01 00:00:00,None,None",
                "2024-01-01 00:00:01,None,None",
                "2024-01-01 00:00:02,20.0,50.0",
            ]
        );
    }

    #[test]
    fn bus_error_yields_row_without_values() {
        let stop = StopSignal::new();
        let mut sensor = FakeSensor::new().bus_error().sample(21.5, 30.0);
        let mut sink = RecordingSink::new().stop_after(2, &stop);

        logger(TemperatureUnit::Celsius)
            .run(&mut sensor, &mut sink, &FixedClock::new(), &stop)
            .unwrap();

        assert_eq!(
            sink.lines(),
            vec![
                "2024-01-01 00:00:00,None,None",
                "2024-01-01 00:00:01,21.5,30.0",
            ]
        );
    }

    #[test]
    fn sink_failure_ends_the_loop() {
        let stop = StopSignal::new();
        let mut sensor = FakeSensor::new().sample(1.0, 2.0).sample(3.0, 4.0);
        let mut sink = RecordingSink::new().fail_on(1);

        let err = logger(TemperatureUnit::Celsius)
            .run(&mut sensor, &mut sink, &FixedClock::new(), &stop)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(sink.rows.len(), 1);
        assert!(!stop.is_signaled());
    }

    #[test]
    fn stop_raised_before_run_still_logs_one_row() {
        let stop = StopSignal::new();
        stop.signal();
        let mut sensor = FakeSensor::new().sample(22.0, 45.0);
        let mut sink = RecordingSink::new();

        let written = Logger::new(Duration::from_secs(60), TemperatureUnit::Celsius)
            .run(&mut sensor, &mut sink, &FixedClock::new(), &stop)
            .unwrap();

        assert_eq!(written, 1);
    }

    #[test]
    fn drives_the_sht3x_driver() {
        let frame = {
            let word = [0x66, 0x66];
            let sum = checksum(word);
            vec![word[0], word[1], sum, word[0], word[1], sum]
        };
        let i2c = I2cMock::new(&[
            Transaction::write(ADDR, vec![0x21, 0x26]),
            Transaction::write(ADDR, vec![0xE0, 0x00]),
            Transaction::read(ADDR, frame.clone()),
            Transaction::write(ADDR, vec![0xE0, 0x00]),
            Transaction::read(ADDR, frame),
        ]);
        let mut sensor = Sht3x::new(i2c, NoopDelay::new(), ADDR);
        let stop = StopSignal::new();
        let mut sink = RecordingSink::new().stop_after(2, &stop);

        logger(TemperatureUnit::Fahrenheit)
            .run(&mut sensor, &mut sink, &FixedClock::new(), &stop)
            .unwrap();

        assert_eq!(
            sink.lines(),
            vec![
                "2024-01-01 00:00:00,77.0,40.0",
                "2024-01-01 00:00:01,77.0,40.0",
            ]
        );
        let (mut i2c, _) = sensor.release();
        i2c.done();
    }
}
