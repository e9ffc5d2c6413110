use heapless::Vec;

/// Measurement repeatability. Higher repeatability averages longer and
/// lowers noise at the cost of acquisition time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Repeatability {
    Low,
    Medium,
    High,
}

impl Repeatability {
    pub fn parse(accuracy: &str) -> Option<Self> {
        match accuracy {
            "low" => Some(Repeatability::Low),
            "med" => Some(Repeatability::Medium),
            "high" => Some(Repeatability::High),
            _ => None,
        }
    }
}

/// Measurements per second in periodic mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rate {
    Hz0_5,
    Hz1,
    Hz2,
    Hz4,
    Hz10,
}

impl Rate {
    pub fn from_hz(hz: f32) -> Option<Self> {
        if hz == 0.5 {
            Some(Rate::Hz0_5)
        } else if hz == 1.0 {
            Some(Rate::Hz1)
        } else if hz == 2.0 {
            Some(Rate::Hz2)
        } else if hz == 4.0 {
            Some(Rate::Hz4)
        } else if hz == 10.0 {
            Some(Rate::Hz10)
        } else {
            None
        }
    }

    pub fn hz(&self) -> f32 {
        match self {
            Rate::Hz0_5 => 0.5,
            Rate::Hz1 => 1.0,
            Rate::Hz2 => 2.0,
            Rate::Hz4 => 4.0,
            Rate::Hz10 => 10.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// One measurement per command. With `blocking` the sensor stretches
    /// the clock until the result is available.
    SingleShot { blocking: bool },
    /// The sensor free-runs at `rate` until it receives a break.
    Periodic { rate: Rate },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    pub mode: Mode,
    pub repeatability: Repeatability,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            mode: Mode::SingleShot { blocking: true },
            repeatability: Repeatability::Medium,
        }
    }
}

/// Adjustments made while turning loosely typed settings into a
/// [`SensorConfig`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigNote {
    /// The accuracy was not one of `low`, `med` or `high`; `med` is used.
    InvalidAccuracy,
    /// The rate was not one of 0.5, 1, 2, 4 or 10; 1 Hz is used.
    InvalidRate,
    /// No rate was given for periodic mode; 1 Hz is used.
    MissingRate,
    /// A rate was given for single-shot mode and is ignored.
    RateIgnored,
    /// Blocking was requested in periodic mode; it is forced off.
    BlockingUnavailable,
}

impl ConfigNote {
    pub fn is_warning(&self) -> bool {
        !matches!(self, ConfigNote::MissingRate | ConfigNote::RateIgnored)
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConfigNote::InvalidAccuracy => {
                "invalid accuracy, valid options are \"low\", \"med\" or \"high\"; using \"med\""
            }
            ConfigNote::InvalidRate => {
                "invalid sample rate, valid options are 0.5, 1, 2, 4 and 10; using 1"
            }
            ConfigNote::MissingRate => "sample rate not supplied; using 1",
            ConfigNote::RateIgnored => "sample rate is ignored in single-shot mode",
            ConfigNote::BlockingUnavailable => "blocking is not available in periodic mode",
        }
    }
}

pub type ConfigNotes = Vec<ConfigNote, 4>;

/// The mode was neither `single-shot` nor `periodic`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InvalidMode;

/// A parsed configuration along with every fallback applied to get it.
#[derive(Debug, Clone, PartialEq)]
pub struct Configured {
    pub config: SensorConfig,
    pub notes: ConfigNotes,
}

impl Configured {
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigNote> {
        self.notes.iter().filter(|n| n.is_warning())
    }
}

impl SensorConfig {
    pub const fn periodic(rate: Rate, repeatability: Repeatability) -> Self {
        Self {
            mode: Mode::Periodic { rate },
            repeatability,
        }
    }

    pub const fn single_shot(blocking: bool, repeatability: Repeatability) -> Self {
        Self {
            mode: Mode::SingleShot { blocking },
            repeatability,
        }
    }

    /// Builds a configuration from the textual settings `mode`
    /// (`single-shot` or `periodic`), `accuracy` (`low`, `med`, `high`),
    /// an optional `rate` in Hz and a `blocking` flag.
    ///
    /// Invalid accuracy or rate fall back to defaults and are reported in
    /// [`Configured::notes`]. An unknown mode is fatal.
    pub fn parse(
        mode: &str,
        rate: Option<f32>,
        accuracy: &str,
        blocking: bool,
    ) -> Result<Configured, InvalidMode> {
        let mut notes = ConfigNotes::new();
        let mut note = |n| {
            // capacity covers every note a single parse can raise
            let _ = notes.push(n);
        };

        let mode = match mode {
            "single-shot" => {
                if rate.is_some() {
                    note(ConfigNote::RateIgnored);
                }
                Mode::SingleShot { blocking }
            }
            "periodic" => {
                let rate = match rate {
                    None => {
                        note(ConfigNote::MissingRate);
                        Rate::Hz1
                    }
                    Some(hz) => Rate::from_hz(hz).unwrap_or_else(|| {
                        note(ConfigNote::InvalidRate);
                        Rate::Hz1
                    }),
                };
                if blocking {
                    note(ConfigNote::BlockingUnavailable);
                }
                Mode::Periodic { rate }
            }
            _ => return Err(InvalidMode),
        };

        let repeatability = Repeatability::parse(accuracy).unwrap_or_else(|| {
            note(ConfigNote::InvalidAccuracy);
            Repeatability::Medium
        });

        Ok(Configured {
            config: SensorConfig {
                mode,
                repeatability,
            },
            notes,
        })
    }

    pub fn is_periodic(&self) -> bool {
        matches!(self.mode, Mode::Periodic { .. })
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self.mode, Mode::SingleShot { blocking: true })
    }
}
