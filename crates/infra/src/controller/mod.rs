//! Controller API adapters

pub mod client;

pub use client::ControllerClient;
