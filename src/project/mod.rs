//! Package emission: the I/O boundary of the pipeline
//!
//! Everything above this module is pure; only the emitter touches the
//! filesystem.

mod emitter;

pub use emitter::{EmitSummary, emit_package};
