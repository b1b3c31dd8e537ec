//! Bus infrastructure - system-bus connection and call-signal stream

pub mod decoder;

pub use decoder::decode_signal;

use crate::domain::call::TelephonyBackend;
use futures::stream::{select, Select, StreamExt};
use thiserror::Error;
use zbus::message::Type as MessageType;
use zbus::{Connection, MatchRule, Message, MessageStream};

#[derive(Debug, Error)]
pub enum BusError {
    #[error("failed to connect to the system bus: {0}")]
    Connection(#[source] zbus::Error),

    #[error("failed to subscribe to {interface} signals: {source}")]
    Subscribe {
        interface: &'static str,
        source: zbus::Error,
    },

    #[error("malformed {member} signal arguments: {source}")]
    MalformedSignal {
        member: &'static str,
        source: zbus::Error,
    },
}

/// Connect to the system bus
pub async fn connect_system() -> Result<Connection, BusError> {
    Connection::system().await.map_err(BusError::Connection)
}

/// The merged, arrival-ordered stream of call signals from both
/// telephony backends.
///
/// Match rules for the two interfaces are registered up front; from
/// then on every received message either decodes to a call event or is
/// classified "not applicable" cheaply.
pub struct CallSignals {
    stream: Select<MessageStream, MessageStream>,
}

impl CallSignals {
    /// Register the signal filters for both backends on the connection.
    pub async fn subscribe(connection: &Connection) -> Result<Self, BusError> {
        let ofono = signal_stream(connection, TelephonyBackend::Ofono).await?;
        let modem = signal_stream(connection, TelephonyBackend::ModemManager).await?;

        Ok(Self {
            stream: select(ofono, modem),
        })
    }

    /// Wait for the next raw message; `None` once the connection closes.
    pub async fn next(&mut self) -> Option<zbus::Result<Message>> {
        self.stream.next().await
    }
}

async fn signal_stream(
    connection: &Connection,
    backend: TelephonyBackend,
) -> Result<MessageStream, BusError> {
    let subscribe_err = |source| BusError::Subscribe {
        interface: backend.interface(),
        source,
    };

    let rule = MatchRule::builder()
        .msg_type(MessageType::Signal)
        .interface(backend.interface())
        .map_err(subscribe_err)?
        .build();

    MessageStream::for_match_rule(rule, connection, None)
        .await
        .map_err(subscribe_err)
}
