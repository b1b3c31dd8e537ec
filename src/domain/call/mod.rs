//! Call bounded context - call activity aggregation

pub mod activity;
pub mod event;

pub use activity::{state_code_is_active, CallActivity, PathDecision};
pub use event::{CallEvent, TelephonyBackend};
