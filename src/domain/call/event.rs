//! Normalized call events
//!
//! The two telephony managers publish very different signal shapes; both
//! are reduced to this one closed event type before any state is touched.

/// Telephony manager a signal originated from
///
/// Only one of the two is expected to be present on a given device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelephonyBackend {
    /// oFono - publishes call existence only
    Ofono,
    /// ModemManager - publishes graded call state transitions
    ModemManager,
}

impl TelephonyBackend {
    /// D-Bus interface whose signals this backend is watched on
    pub fn interface(&self) -> &'static str {
        match self {
            TelephonyBackend::Ofono => "org.ofono.VoiceCallManager",
            TelephonyBackend::ModemManager => "org.freedesktop.ModemManager1.Call",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TelephonyBackend::Ofono => "oFono",
            TelephonyBackend::ModemManager => "ModemManager",
        }
    }
}

/// A telephony signal reduced to what the activity machine needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallEvent {
    /// A call object came into existence (oFono CallAdded)
    Appeared,
    /// A call object went away (oFono CallRemoved)
    Disappeared,
    /// A call moved between state codes (ModemManager StateChanged).
    /// Carries the backend's raw codes; old == new never reaches here,
    /// the decoder filters no-op transitions.
    StateChanged { old: i32, new: i32 },
}
