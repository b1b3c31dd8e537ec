//! PCM device access
//!
//! The backend trait is the seam between the path controller and the
//! hardware; the real implementation opens raw `hw:` devices through
//! ALSA. Opening a device starts the stream as a side effect, dropping
//! the handle stops it. No samples are ever transferred.

use crate::config::StreamConfig;
use crate::domain::shared::DeviceEndpoint;
use alsa::pcm::{Access, Format, HwParams, PCM};
use alsa::{Direction, ValueOr};
use std::fmt;
use thiserror::Error;

/// Direction of one PCM stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamDirection {
    /// Modem uplink (tx)
    Capture,
    /// Modem downlink (rx)
    Playback,
}

impl StreamDirection {
    fn as_alsa(self) -> Direction {
        match self {
            StreamDirection::Capture => Direction::Capture,
            StreamDirection::Playback => Direction::Playback,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StreamDirection::Capture => "capture",
            StreamDirection::Playback => "playback",
        }
    }
}

impl fmt::Display for StreamDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open {direction} stream: {source}")]
    Open {
        direction: StreamDirection,
        source: alsa::Error,
    },
    #[error("failed to configure {direction} stream: {source}")]
    Configure {
        direction: StreamDirection,
        source: alsa::Error,
    },
    #[error("failed to prepare {direction} stream: {source}")]
    Prepare {
        direction: StreamDirection,
        source: alsa::Error,
    },
}

/// An open directional PCM stream; closed when dropped
pub trait PcmStream {}

/// Opens PCM streams for the voice path
#[cfg_attr(test, mockall::automock)]
pub trait PcmBackend {
    fn open(
        &self,
        endpoint: &DeviceEndpoint,
        direction: StreamDirection,
        stream: &StreamConfig,
    ) -> Result<Box<dyn PcmStream>, AudioError>;
}

/// Real backend opening `hw:<card>,<device>` through ALSA
pub struct AlsaBackend;

struct AlsaStream {
    // Held only for its drop; closing the device stops the stream.
    _pcm: PCM,
}

impl PcmStream for AlsaStream {}

impl PcmBackend for AlsaBackend {
    fn open(
        &self,
        endpoint: &DeviceEndpoint,
        direction: StreamDirection,
        stream: &StreamConfig,
    ) -> Result<Box<dyn PcmStream>, AudioError> {
        let pcm = PCM::new(&endpoint.to_string(), direction.as_alsa(), false)
            .map_err(|source| AudioError::Open { direction, source })?;

        apply_hw_params(&pcm, stream)
            .map_err(|source| AudioError::Configure { direction, source })?;

        pcm.prepare()
            .map_err(|source| AudioError::Prepare { direction, source })?;

        Ok(Box::new(AlsaStream { _pcm: pcm }))
    }
}

fn apply_hw_params(pcm: &PCM, stream: &StreamConfig) -> Result<(), alsa::Error> {
    let hwp = HwParams::any(pcm)?;
    hwp.set_access(Access::RWInterleaved)?;
    hwp.set_format(Format::S16LE)?;
    hwp.set_channels(stream.channels)?;
    hwp.set_rate(stream.rate, ValueOr::Nearest)?;
    hwp.set_period_size(stream.period_size as alsa::pcm::Frames, ValueOr::Nearest)?;
    hwp.set_periods(stream.period_count, ValueOr::Nearest)?;
    pcm.hw_params(&hwp)
}
