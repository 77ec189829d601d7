//! Utility helpers for the command layer

pub mod logging;
