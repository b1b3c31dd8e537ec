//! callpathd - voice-call audio path daemon
//!
//! Watches telephony call-state signals on the system bus (oFono or
//! ModemManager, whichever is present) and opens or closes the modem
//! codec's voice-call PCM pair to match. No audio data passes through
//! the process; opening the devices is what routes the call audio.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use domain::call::{CallActivity, CallEvent, PathDecision, TelephonyBackend};
pub use domain::shared::DeviceEndpoint;
