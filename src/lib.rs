//! In-memory productivity dashboard for the terminal. One session tracks
//! activities with per-task stopwatches, a to-do list, a work/break focus
//! timer, a journal, freeform thoughts and sketches, all driven by a shared
//! one-second pulse. Nothing survives the process.
//!

pub mod board;
pub mod cli;
pub mod session;
pub mod utils;
