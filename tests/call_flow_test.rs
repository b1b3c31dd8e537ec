//! Call flow integration tests
//!
//! Drive event sequences through the full service (decoder -> activity
//! machine -> voice path) with a counting fake backend and check that
//! the PCM pair tracks the call state exactly.

use std::cell::Cell;
use std::rc::Rc;

use callpathd::application::CallPathService;
use callpathd::config::{Config, StreamConfig};
use callpathd::domain::call::{CallEvent, TelephonyBackend};
use callpathd::domain::shared::DeviceEndpoint;
use callpathd::infrastructure::audio::{AudioError, PcmBackend, PcmStream, StreamDirection};
use zbus::Message;

struct NullStream;
impl PcmStream for NullStream {}

/// Fake backend counting stream opens; optionally fails one direction.
#[derive(Default)]
struct CountingBackend {
    opened: Rc<Cell<u32>>,
    fail_capture: bool,
}

impl CountingBackend {
    fn with_counter() -> (Self, Rc<Cell<u32>>) {
        let opened = Rc::new(Cell::new(0));
        let backend = Self {
            opened: opened.clone(),
            fail_capture: false,
        };
        (backend, opened)
    }
}

impl PcmBackend for CountingBackend {
    fn open(
        &self,
        _endpoint: &DeviceEndpoint,
        direction: StreamDirection,
        _stream: &StreamConfig,
    ) -> Result<Box<dyn PcmStream>, AudioError> {
        if self.fail_capture && direction == StreamDirection::Capture {
            return Err(AudioError::Open {
                direction,
                source: alsa::Error::unsupported("snd_pcm_open"),
            });
        }
        self.opened.set(self.opened.get() + 1);
        Ok(Box::new(NullStream))
    }
}

fn test_config() -> Config {
    Config {
        endpoint: DeviceEndpoint::new(1, 0),
        stream: StreamConfig::default(),
    }
}

fn service() -> CallPathService<CountingBackend> {
    CallPathService::new(&test_config(), CountingBackend::default())
}

#[test]
fn ofono_call_cycle_drives_the_path() {
    let mut service = service();
    assert!(!service.path_open());

    service.apply_event(TelephonyBackend::Ofono, CallEvent::Appeared);
    assert!(service.call_active());
    assert!(service.path_open());

    service.apply_event(TelephonyBackend::Ofono, CallEvent::Disappeared);
    assert!(!service.call_active());
    assert!(!service.path_open());
}

#[test]
fn duplicate_appeared_activates_once() {
    let (backend, opened) = CountingBackend::with_counter();
    let mut service = CallPathService::new(&test_config(), backend);

    service.apply_event(TelephonyBackend::Ofono, CallEvent::Appeared);
    service.apply_event(TelephonyBackend::Ofono, CallEvent::Appeared);

    assert!(service.path_open());
    // One stream per direction, opened exactly once.
    assert_eq!(opened.get(), 2);
}

#[test]
fn modem_manager_graded_states_drive_the_path() {
    let mut service = service();

    // New call object starts dialing.
    service.apply_event(
        TelephonyBackend::ModemManager,
        CallEvent::StateChanged { old: 0, new: 1 },
    );
    assert!(service.path_open());

    // Dialing -> connected: path already open, nothing changes.
    service.apply_event(
        TelephonyBackend::ModemManager,
        CallEvent::StateChanged { old: 1, new: 4 },
    );
    assert!(service.path_open());

    // Connected -> terminated closes the path.
    service.apply_event(
        TelephonyBackend::ModemManager,
        CallEvent::StateChanged { old: 4, new: 7 },
    );
    assert!(!service.path_open());
}

#[test]
fn activity_and_path_agree_after_every_event() {
    let events = [
        CallEvent::Appeared,
        CallEvent::Appeared,
        CallEvent::Disappeared,
        CallEvent::StateChanged { old: 0, new: 2 },
        CallEvent::StateChanged { old: 2, new: 4 },
        CallEvent::StateChanged { old: 4, new: 7 },
        CallEvent::Disappeared,
        CallEvent::StateChanged { old: 5, new: 7 },
        CallEvent::Appeared,
    ];

    let mut service = service();
    for event in events {
        service.apply_event(TelephonyBackend::Ofono, event);
        assert_eq!(
            service.call_active(),
            service.path_open(),
            "state diverged after {:?}",
            event
        );
    }
}

#[test]
fn capture_open_failure_does_not_stop_activation() {
    let backend = CountingBackend {
        fail_capture: true,
        ..CountingBackend::default()
    };
    let mut service = CallPathService::new(&test_config(), backend);

    service.apply_event(TelephonyBackend::Ofono, CallEvent::Appeared);
    assert!(service.path_open());

    service.apply_event(TelephonyBackend::Ofono, CallEvent::Disappeared);
    assert!(!service.path_open());
}

#[test]
fn raw_ofono_signals_flow_end_to_end() {
    let mut service = service();

    let added = Message::signal("/ril_0", "org.ofono.VoiceCallManager", "CallAdded")
        .unwrap()
        .build(&())
        .unwrap();
    service.handle_message(&added);
    assert!(service.path_open());

    let removed = Message::signal("/ril_0", "org.ofono.VoiceCallManager", "CallRemoved")
        .unwrap()
        .build(&())
        .unwrap();
    service.handle_message(&removed);
    assert!(!service.path_open());
}

#[test]
fn malformed_state_changed_leaves_state_untouched() {
    let mut service = service();

    // Only one of the two expected integer arguments.
    let malformed = Message::signal(
        "/org/freedesktop/ModemManager1/Call/0",
        "org.freedesktop.ModemManager1.Call",
        "StateChanged",
    )
    .unwrap()
    .build(&4i32)
    .unwrap();

    service.handle_message(&malformed);
    assert!(!service.call_active());
    assert!(!service.path_open());

    // The loop keeps going: a well-formed signal afterwards still works.
    let connected = Message::signal(
        "/org/freedesktop/ModemManager1/Call/0",
        "org.freedesktop.ModemManager1.Call",
        "StateChanged",
    )
    .unwrap()
    .build(&(2i32, 4i32))
    .unwrap();

    service.handle_message(&connected);
    assert!(service.path_open());
}
