//! Audio infrastructure - PCM stream lifecycle for the voice path

pub mod backend;
pub mod voice_path;

pub use backend::{AlsaBackend, AudioError, PcmBackend, PcmStream, StreamDirection};
pub use voice_path::VoicePath;
