//! Typed resources for commonly used EDA applications.
//!
//! Hand-maintained subsets of the published OpenAPI models. Spec fields use
//! [`Field`](crate::Field) so only explicitly set values reach the wire.

pub mod interfaces;
pub mod siteinfo;

pub use interfaces::{Interface, InterfaceMember, InterfaceSpec};
pub use siteinfo::{Banner, BannerSpec};
