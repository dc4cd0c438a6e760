//! Report module - summarizing scan and download results

pub mod summary;

pub use summary::*;
