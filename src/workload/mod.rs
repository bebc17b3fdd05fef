//! The pure computations behind each stage.
//!
//! Nothing in here touches the network or the object store, so every stage
//! is a thin I/O wrapper around one of these:
//!
//! * [`split`] cuts a document into contiguous line ranges.
//! * [`wc`] counts words in one range and merges counts across ranges.

pub mod split;
pub mod wc;
