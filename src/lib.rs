//! Drop-to-GIF conversion: a thin orchestration layer over the system ffmpeg.
//!
//! [`ConversionEngine`] turns one source video plus a [`ConversionOptions`]
//! snapshot into a single deterministic ffmpeg invocation. [`batch`] filters a
//! dropped set of paths and maps each outcome to a user-facing status line.

pub mod batch;
pub mod convert;
pub mod ffmpeg;
pub mod options;

pub use convert::{ConversionEngine, ConvertError, Outcome};
pub use options::ConversionOptions;
