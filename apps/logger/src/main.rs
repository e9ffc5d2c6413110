use anyhow::Context;
use linux_embedded_hal::{Delay, I2cdev};
use nix::sys::signal::{SigSet, Signal};
use sht3x_device::drivers::sensors::sht3x::Sht3x;
use sht3x_device::kernel::signal::StopSignal;
use sht3x_device::logger::clock::LocalClock;
use sht3x_device::logger::{Logger, LoggerConfig};
use std::process;

mod args;

use args::{Args, USAGE};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            process::exit(2);
        }
    };
    if args.help {
        println!("{}", USAGE);
        return;
    }

    let config = match load(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        log::error!("{:#}", e);
        process::exit(1);
    }
}

fn load(args: Args) -> anyhow::Result<LoggerConfig> {
    let mut config = match &args.config {
        Some(path) => LoggerConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LoggerConfig::default(),
    };
    args.apply(&mut config).map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(config)
}

fn run(config: LoggerConfig) -> anyhow::Result<()> {
    let stop = StopSignal::new();
    watch_signals(stop.clone())?;

    let i2c = I2cdev::new(&config.bus)
        .with_context(|| format!("opening {}", config.bus.display()))?;
    let mut sensor = Sht3x::new(i2c, Delay, config.address);
    let settings = &config.sensor;
    sensor.configure(
        &settings.mode,
        settings.rate,
        &settings.accuracy,
        settings.blocking,
    )?;
    log::info!(
        "[logger] sampling sensor at {:#x} on {} every {}s",
        config.address,
        config.bus.display(),
        config.interval_secs
    );

    let mut sink = config.sink.open().context("opening sink")?;
    let mut logger = Logger::new(config.interval(), config.unit);
    let result = logger.run(&mut sensor, &mut sink, &LocalClock, &stop);

    if let Err(e) = sensor.stop() {
        log::warn!("[logger] unable to stop acquisition: {}", e);
    }
    result.context("writing sample")?;
    Ok(())
}

/// Blocks SIGINT and SIGTERM on the calling thread, and thus on every
/// thread spawned after it, and raises `stop` from a dedicated thread when
/// one of them arrives.
fn watch_signals(stop: StopSignal) -> anyhow::Result<()> {
    let mut mask = SigSet::empty();
    mask.add(Signal::SIGINT);
    mask.add(Signal::SIGTERM);
    mask.thread_block()
        .context("blocking termination signals")?;

    std::thread::spawn(move || match mask.wait() {
        Ok(signal) => {
            log::info!("[logger] received {:?}, stopping", signal);
            stop.signal();
        }
        Err(e) => log::error!("[logger] waiting for signals: {}", e),
    });
    Ok(())
}
