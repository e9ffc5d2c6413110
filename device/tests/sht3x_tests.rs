use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
use sht3x_device::domain::temperature::TemperatureUnit;
use sht3x_device::drivers::sensors::sht3x::config::{Mode, Rate, Repeatability};
use sht3x_device::drivers::sensors::sht3x::crc::checksum;
use sht3x_device::drivers::sensors::sht3x::register::status::{Alert, Status, StatusRead};
use sht3x_device::drivers::sensors::sht3x::{Error, Sht3x, State, ADDR, ADDR_ALT};

fn word(value: u16) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    vec![bytes[0], bytes[1], checksum(bytes)]
}

fn frame(temperature: u16, humidity: u16) -> Vec<u8> {
    let mut frame = word(temperature);
    frame.extend(word(humidity));
    frame
}

fn command(code: u16) -> Transaction {
    Transaction::write(ADDR, code.to_be_bytes().to_vec())
}

fn sensor(expectations: &[Transaction]) -> Sht3x<I2cMock, NoopDelay> {
    Sht3x::new(I2cMock::new(expectations), NoopDelay::new(), ADDR)
}

fn done(sensor: Sht3x<I2cMock, NoopDelay>) {
    let (mut i2c, _) = sensor.release();
    i2c.done();
}

#[test]
fn periodic_acquisition_fetches_on_sample() {
    let mut sht = sensor(&[
        command(0x2126),
        command(0xE000),
        Transaction::read(ADDR, frame(0x6666, 0x6666)),
    ]);
    let configured = sht.configure("periodic", Some(1.0), "med", false).unwrap();
    assert!(configured.notes.is_empty());
    assert_eq!(sht.state(), State::Configured);

    sht.begin_acquisition().unwrap();
    assert_eq!(sht.state(), State::Acquiring);
    assert!(!sht.is_ready());

    let sample = sht.sample(TemperatureUnit::Celsius).unwrap();
    assert_eq!(sample.temperature, Some(25.0));
    assert_eq!(sample.relative_humidity, Some(40.0));
    assert_eq!(sht.state(), State::DataReady);
    assert!(!sht.is_ready());
    done(sht);
}

#[test]
fn blocking_single_shot_reads_immediately() {
    let mut sht = sensor(&[
        command(0x2C06),
        Transaction::read(ADDR, frame(0x6666, 0x8000)),
    ]);
    sht.configure("single-shot", None, "high", true).unwrap();
    sht.begin_acquisition().unwrap();
    assert!(sht.is_ready());

    let sample = sht.sample(TemperatureUnit::Fahrenheit).unwrap();
    assert_eq!(sample.temperature, Some(77.0));
    assert_eq!(sample.relative_humidity, Some(50.001));
    done(sht);
}

#[test]
fn non_blocking_single_shot_uses_polling_code() {
    let mut sht = sensor(&[command(0x2416)]);
    sht.configure("single-shot", None, "low", false).unwrap();
    sht.begin_acquisition().unwrap();
    assert!(!sht.is_ready());
    done(sht);
}

#[test]
fn checksum_failure_keeps_previous_value() {
    let mut corrupt = frame(0x8000, 0x8000);
    corrupt[2] ^= 0x01;
    let mut sht = sensor(&[
        command(0x240B),
        Transaction::read(ADDR, frame(0x6666, 0x6666)),
        Transaction::read(ADDR, corrupt),
    ]);
    sht.configure("single-shot", None, "med", false).unwrap();
    sht.begin_acquisition().unwrap();

    let first = sht.sample(TemperatureUnit::Celsius).unwrap();
    assert_eq!(first.temperature, Some(25.0));

    let second = sht.sample(TemperatureUnit::Celsius).unwrap();
    assert!(second.is_empty());
    assert_eq!(sht.state(), State::DataInvalid);
    assert!(!sht.reading().temperature_valid);
    assert!(sht.reading().humidity_valid);

    // the stale temperature is still handed out, the fresh humidity too
    assert_eq!(sht.temperature(TemperatureUnit::Celsius), 25.0);
    assert_eq!(sht.humidity(), 50.001);
    done(sht);
}

#[test]
fn accessors_consume_ready_flags() {
    let mut sht = sensor(&[
        command(0x2C0D),
        Transaction::read(ADDR, frame(0x6666, 0x6666)),
        Transaction::read(ADDR, frame(0x6666, 0x6666)),
    ]);
    sht.configure("single-shot", None, "med", true).unwrap();
    sht.begin_acquisition().unwrap();
    assert!(sht.is_ready());

    assert_eq!(sht.humidity(), 40.0);
    assert!(!sht.is_ready());

    // humidity already consumed, so sample fetches a new frame
    let sample = sht.sample(TemperatureUnit::Celsius).unwrap();
    assert_eq!(sample.relative_humidity, Some(40.0));
    done(sht);
}

#[test]
fn bus_error_is_propagated() {
    let mut sht = sensor(&[
        command(0x2126),
        command(0xE000).with_error(ErrorKind::Other),
    ]);
    sht.configure("periodic", None, "med", false).unwrap();
    sht.begin_acquisition().unwrap();
    assert_eq!(
        sht.sample(TemperatureUnit::Celsius),
        Err(Error::I2c(ErrorKind::Other))
    );
    done(sht);
}

#[test]
fn invalid_mode_leaves_configuration_untouched() {
    let mut sht = sensor(&[]);
    assert_eq!(
        sht.configure("continuous", Some(1.0), "med", false).unwrap_err(),
        Error::InvalidMode
    );
    assert_eq!(sht.state(), State::Idle);
    assert!(sht.config().is_blocking());
    done(sht);
}

#[test]
fn fallbacks_are_applied() {
    let mut sht = sensor(&[command(0x2126)]);
    let configured = sht.configure("periodic", Some(3.0), "ultra", true).unwrap();
    assert_eq!(configured.warnings().count(), 3);
    assert_eq!(sht.config().mode, Mode::Periodic { rate: Rate::Hz1 });
    assert_eq!(sht.config().repeatability, Repeatability::Medium);
    sht.begin_acquisition().unwrap();
    done(sht);
}

#[test]
fn stop_only_breaks_periodic_mode() {
    let mut sht = sensor(&[]);
    sht.configure("single-shot", None, "med", false).unwrap();
    sht.stop().unwrap();
    done(sht);

    let mut sht = sensor(&[command(0x2130), command(0x3093)]);
    sht.configure("periodic", Some(1.0), "high", false).unwrap();
    sht.begin_acquisition().unwrap();
    sht.stop().unwrap();
    assert_eq!(sht.state(), State::Configured);
    done(sht);
}

#[test]
fn control_commands() {
    let mut sht = sensor(&[
        command(0x30A2),
        command(0x306D),
        command(0x3066),
        command(0x2B32),
    ]);
    sht.reset().unwrap();
    sht.set_heater(true).unwrap();
    sht.set_heater(false).unwrap();
    sht.enable_art().unwrap();
    assert_eq!(sht.config().mode, Mode::Periodic { rate: Rate::Hz4 });
    assert_eq!(sht.state(), State::Acquiring);
    done(sht);
}

#[test]
fn alternate_address() {
    let mut sht = Sht3x::new(
        I2cMock::new(&[Transaction::write(ADDR_ALT, vec![0x30, 0xA2])]),
        NoopDelay::new(),
        ADDR_ALT,
    );
    assert_eq!(u8::from(sht.address()), ADDR_ALT);
    sht.reset().unwrap();
    done(sht);
}

#[test]
fn status_register_queries() {
    let mut sht = sensor(&[
        command(0xF32D),
        Transaction::read(ADDR, word(0x8010)),
        command(0xF32D),
        Transaction::read(ADDR, word(0x2000)),
        command(0xF32D),
        Transaction::read(ADDR, word(0x0000)),
        command(0xF32D),
        Transaction::read(ADDR, word(0x0000)),
    ]);
    assert_eq!(
        sht.read_status().unwrap(),
        StatusRead::Valid(Status::from(0x8010))
    );
    assert!(sht.heater_on().unwrap());
    assert!(sht.command_succeeded().unwrap());
    assert!(sht.write_checksum_ok().unwrap());
    done(sht);
}

#[test]
fn corrupt_status_reads_as_false() {
    let mut sht = sensor(&[
        command(0xF32D),
        Transaction::read(ADDR, vec![0x80, 0x10, 0x00]),
        command(0xF32D),
        Transaction::read(ADDR, vec![0x80, 0x10, 0x00]),
        command(0xF32D),
        Transaction::read(ADDR, vec![0x80, 0x10, 0x00]),
        // 0x0000 would report success and heater off; its checksum is 0x81
        command(0xF32D),
        Transaction::read(ADDR, vec![0x00, 0x00, 0x00]),
        command(0xF32D),
        Transaction::read(ADDR, vec![0x00, 0x00, 0x00]),
        command(0xF32D),
        Transaction::read(ADDR, vec![0x20, 0x00, 0x00]),
    ]);
    assert_eq!(sht.read_status().unwrap().bits(), 0xFFFF);
    assert!(!sht.alert_pending().unwrap());
    assert!(sht.consume_alerts().unwrap().is_empty());
    assert!(!sht.command_succeeded().unwrap());
    assert!(!sht.write_checksum_ok().unwrap());
    assert!(!sht.heater_on().unwrap());
    done(sht);
}

#[test]
fn consuming_alerts_clears_status() {
    let mut sht = sensor(&[
        command(0xF32D),
        Transaction::read(ADDR, word(0x8010)),
        command(0x3041),
    ]);
    assert_eq!(&sht.consume_alerts().unwrap()[..], &[Alert::Reset]);
    done(sht);
}
