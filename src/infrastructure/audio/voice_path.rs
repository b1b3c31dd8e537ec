//! Voice path controller
//!
//! Owns the capture/playback PCM pair for the modem codec and keeps it
//! in lockstep with the call activity decisions. Both operations are
//! idempotent so duplicate decisions are harmless.

use crate::config::StreamConfig;
use crate::domain::shared::DeviceEndpoint;
use crate::infrastructure::audio::backend::{PcmBackend, PcmStream, StreamDirection};
use tracing::{error, info};

/// The two directional handles, created and destroyed together.
///
/// A direction that failed to open carries no handle, but the pair as a
/// whole still counts as open: the PCM open is a best-effort routing
/// hint and nothing downstream reads from the handles.
struct PcmPair {
    _tx: Option<Box<dyn PcmStream>>,
    _rx: Option<Box<dyn PcmStream>>,
}

/// Controller for the voice-call PCM pair
///
/// Exclusively owns the pair; only the single event-processing task
/// ever calls into it, so no locking is involved.
pub struct VoicePath<B: PcmBackend> {
    backend: B,
    endpoint: DeviceEndpoint,
    stream: StreamConfig,
    pair: Option<PcmPair>,
}

impl<B: PcmBackend> VoicePath<B> {
    pub fn new(backend: B, endpoint: DeviceEndpoint, stream: StreamConfig) -> Self {
        Self {
            backend,
            endpoint,
            stream,
            pair: None,
        }
    }

    /// Whether the PCM pair is currently open
    pub fn is_open(&self) -> bool {
        self.pair.is_some()
    }

    /// Open the PCM pair; no-op if it is already open.
    ///
    /// Opening the devices starts the stream at the hardware level.
    /// A failed direction is logged and left without a handle.
    pub fn activate(&mut self) {
        if self.pair.is_some() {
            return; // Already active
        }

        let tx = self.open_stream(StreamDirection::Capture);
        let rx = self.open_stream(StreamDirection::Playback);
        self.pair = Some(PcmPair { _tx: tx, _rx: rx });

        info!("PCM pair on {} opened", self.endpoint);
    }

    /// Close the PCM pair; no-op if it is not open.
    pub fn deactivate(&mut self) {
        if self.pair.take().is_none() {
            return; // Not active
        }

        info!("PCM pair on {} closed", self.endpoint);
    }

    fn open_stream(&self, direction: StreamDirection) -> Option<Box<dyn PcmStream>> {
        match self.backend.open(&self.endpoint, direction, &self.stream) {
            Ok(handle) => Some(handle),
            Err(err) => {
                error!("{} on {}: {}", direction, self.endpoint, err);
                None
            }
        }
    }
}
