//! Offline asset-preparation tools for the game content pipeline.
//!
//! Every module is an independent, run-once utility invoked during content
//! authoring; nothing here coordinates at runtime:
//!
//! - [`audio::convert`] — PCM WAV bit-depth/downmix conversion
//! - [`audio::click`] — metronome click-track synthesis
//! - [`draw::templates`] — coloring-book line-art templates
//! - [`draw::pastel`] — pastel placeholder sprites and backgrounds
//! - [`remote`] — hosted image-generation clients (sync run and queue poll)
//! - [`tts`] — Piper text-to-speech batching

pub mod audio;
pub mod draw;
pub mod error;
pub mod manifest;
pub mod remote;
pub mod tts;

pub use error::PipelineError;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
