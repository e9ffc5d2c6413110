#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channel {
    Temperature,
    Humidity,
}

/// Per-channel data-ready flags. A flag is raised when its channel decodes
/// successfully and lowered when the value is handed out.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DataReady {
    temperature: bool,
    humidity: bool,
}

impl DataReady {
    pub fn set(&mut self, temperature: bool, humidity: bool) {
        self.temperature = temperature;
        self.humidity = humidity;
    }

    pub fn is_set(&self, channel: Channel) -> bool {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Humidity => self.humidity,
        }
    }

    pub fn both(&self) -> bool {
        self.temperature && self.humidity
    }

    /// Lowers the flag of `channel`, returning whether it was raised.
    pub fn consume(&mut self, channel: Channel) -> bool {
        let flag = match channel {
            Channel::Temperature => &mut self.temperature,
            Channel::Humidity => &mut self.humidity,
        };
        core::mem::replace(flag, false)
    }

    /// Lowers both flags if both are raised.
    pub fn consume_both(&mut self) -> bool {
        if self.both() {
            self.consume(Channel::Temperature);
            self.consume(Channel::Humidity);
            true
        } else {
            false
        }
    }
}
