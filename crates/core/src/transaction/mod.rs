//! Transaction building and commit

pub mod builder;
pub mod client;
pub mod ports;
pub mod validation;
