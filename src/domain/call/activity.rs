//! Call activity state machine
//!
//! Aggregates normalized call events into a single active/inactive
//! notion and decides when the voice path must be opened or closed.

use crate::domain::call::event::CallEvent;

/// ModemManager call-state codes relevant to the voice path.
/// See MMCallState in ModemManager-enums.h.
pub const MM_CALL_STATE_DIALING: i32 = 1;
pub const MM_CALL_STATE_RINGING_OUT: i32 = 2;
pub const MM_CALL_STATE_ACTIVE: i32 = 4;

/// Check whether a ModemManager state code needs the voice path open.
///
/// Some modems never report the DIALING -> ACTIVE transition, so the
/// pre-connect states count as active alongside the connected one.
/// Every other code (held, waiting, terminated, unknown) is inactive.
pub fn state_code_is_active(code: i32) -> bool {
    matches!(
        code,
        MM_CALL_STATE_DIALING | MM_CALL_STATE_RINGING_OUT | MM_CALL_STATE_ACTIVE
    )
}

/// What the voice path controller should do after an event is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDecision {
    /// Nothing to do, the path already matches the call state
    NoChange,
    /// Open the PCM pair
    Activate,
    /// Close the PCM pair
    Deactivate,
}

/// State machine tracking whether any call is currently active
///
/// Starts inactive. Events are applied one at a time, in bus arrival
/// order; duplicate and out-of-order signals collapse into `NoChange`
/// so the controller sees each transition exactly once.
#[derive(Debug, Clone, Default)]
pub struct CallActivity {
    active: bool,
}

impl CallActivity {
    pub fn new() -> Self {
        Self { active: false }
    }

    /// Whether any call is currently considered active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Apply one normalized event and decide the path transition
    pub fn apply(&mut self, event: &CallEvent) -> PathDecision {
        match *event {
            CallEvent::Appeared => {
                if self.active {
                    // A call is already up; a second Appeared adds nothing.
                    PathDecision::NoChange
                } else {
                    self.active = true;
                    PathDecision::Activate
                }
            }
            CallEvent::Disappeared => {
                if self.active {
                    self.active = false;
                    PathDecision::Deactivate
                } else {
                    PathDecision::NoChange
                }
            }
            CallEvent::StateChanged { old, new } => {
                // Both the transition's own edge and the machine's current
                // state must agree before anything moves; redundant bus
                // signals and inactive->inactive code shuffles fall through.
                if state_code_is_active(new) && !self.active {
                    self.active = true;
                    PathDecision::Activate
                } else if state_code_is_active(old) && !state_code_is_active(new) && self.active {
                    self.active = false;
                    PathDecision::Deactivate
                } else {
                    PathDecision::NoChange
                }
            }
        }
    }
}
