//! Command line arguments of the binaries.

pub mod ctl;
pub mod stage;
pub mod standalone;
