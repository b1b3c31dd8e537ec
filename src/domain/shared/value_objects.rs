//! Shared value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a device endpoint string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid device endpoint '{0}', expected hw:<card>,<device>")]
pub struct EndpointParseError(String);

/// ALSA card/device pair addressing the voice-call PCM path
///
/// Supplied once on the command line and immutable for the process
/// lifetime. The same endpoint is used for both the capture and the
/// playback direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceEndpoint {
    card: u32,
    device: u32,
}

impl DeviceEndpoint {
    pub fn new(card: u32, device: u32) -> Self {
        Self { card, device }
    }

    pub fn card(&self) -> u32 {
        self.card
    }

    pub fn device(&self) -> u32 {
        self.device
    }
}

impl FromStr for DeviceEndpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || EndpointParseError(s.to_string());

        let rest = s.strip_prefix("hw:").ok_or_else(err)?;
        let (card, device) = rest.split_once(',').ok_or_else(err)?;

        let card = card.parse::<u32>().map_err(|_| err())?;
        let device = device.parse::<u32>().map_err(|_| err())?;

        Ok(Self { card, device })
    }
}

impl fmt::Display for DeviceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hw:{},{}", self.card, self.device)
    }
}
