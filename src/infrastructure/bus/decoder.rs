//! Signal decoding
//!
//! Pure translation from raw bus messages to normalized call events.
//! Protocol differences between the two telephony managers end here;
//! the state machine never sees a D-Bus type.

use crate::domain::call::{CallEvent, TelephonyBackend};
use crate::infrastructure::bus::BusError;
use zbus::message::Type as MessageType;
use zbus::Message;

/// Decode one raw message into zero or one normalized event.
///
/// Returns `Ok(None)` for messages that match neither backend protocol
/// and for ModemManager no-op transitions (old == new). A StateChanged
/// signal whose body is not exactly two signed 32-bit integers is a
/// decode failure; the caller logs it and drops the message.
pub fn decode_signal(
    msg: &Message,
) -> Result<Option<(TelephonyBackend, CallEvent)>, BusError> {
    let header = msg.header();
    if header.message_type() != MessageType::Signal {
        return Ok(None);
    }

    let (interface, member) = match (header.interface(), header.member()) {
        (Some(interface), Some(member)) => (interface.as_str(), member.as_str()),
        _ => return Ok(None),
    };

    if interface == TelephonyBackend::Ofono.interface() {
        // Call state is deliberately not inspected for oFono: any
        // existing call implies active.
        match member {
            "CallAdded" => Ok(Some((TelephonyBackend::Ofono, CallEvent::Appeared))),
            "CallRemoved" => Ok(Some((TelephonyBackend::Ofono, CallEvent::Disappeared))),
            _ => Ok(None),
        }
    } else if interface == TelephonyBackend::ModemManager.interface() && member == "StateChanged"
    {
        let (old, new): (i32, i32) =
            msg.body()
                .deserialize()
                .map_err(|source| BusError::MalformedSignal {
                    member: "StateChanged",
                    source,
                })?;

        if old == new {
            return Ok(None); // No change
        }

        Ok(Some((
            TelephonyBackend::ModemManager,
            CallEvent::StateChanged { old, new },
        )))
    } else {
        Ok(None)
    }
}
