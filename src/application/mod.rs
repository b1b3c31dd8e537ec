//! Application layer - the daemon's receive loop
//!
//! Wires the signal decoder, the activity state machine and the voice
//! path controller together. One message is fully processed before the
//! next is fetched, so events apply strictly in bus arrival order.

use crate::config::Config;
use crate::domain::call::{CallActivity, CallEvent, PathDecision, TelephonyBackend};
use crate::infrastructure::audio::{PcmBackend, VoicePath};
use crate::infrastructure::bus::{decode_signal, CallSignals};
use tracing::{debug, info, warn};
use zbus::Message;

/// Daemon context owning all mutable state: the call activity machine
/// and the PCM pair behind the voice path controller.
pub struct CallPathService<B: PcmBackend> {
    activity: CallActivity,
    path: VoicePath<B>,
}

impl<B: PcmBackend> CallPathService<B> {
    pub fn new(config: &Config, backend: B) -> Self {
        Self {
            activity: CallActivity::new(),
            path: VoicePath::new(backend, config.endpoint, config.stream.clone()),
        }
    }

    /// Whether any call is currently considered active
    pub fn call_active(&self) -> bool {
        self.activity.is_active()
    }

    /// Whether the PCM pair is currently open
    pub fn path_open(&self) -> bool {
        self.path.is_open()
    }

    /// Apply one normalized event and act on the decision.
    ///
    /// After this returns, the activity state and the path's open/closed
    /// state agree.
    pub fn apply_event(&mut self, backend: TelephonyBackend, event: CallEvent) {
        debug!("{} event: {:?}", backend.name(), event);

        match self.activity.apply(&event) {
            PathDecision::Activate => self.path.activate(),
            PathDecision::Deactivate => self.path.deactivate(),
            PathDecision::NoChange => {}
        }
    }

    /// Decode and process one raw bus message.
    ///
    /// Messages that match neither protocol are skipped; a malformed
    /// signal is logged and dropped without touching any state.
    pub fn handle_message(&mut self, msg: &Message) {
        match decode_signal(msg) {
            Ok(Some((backend, event))) => self.apply_event(backend, event),
            Ok(None) => {}
            Err(err) => warn!("dropping signal: {}", err),
        }
    }

    /// Run the receive loop until the connection closes or the process
    /// is asked to stop. An open PCM pair is closed on the way out.
    pub async fn run(&mut self, mut signals: CallSignals) {
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                next = signals.next() => match next {
                    Some(Ok(msg)) => self.handle_message(&msg),
                    Some(Err(err)) => warn!("bus receive error: {}", err),
                    None => {
                        info!("bus connection closed");
                        break;
                    }
                },
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break;
                }
            }
        }

        self.path.deactivate();
    }
}
