//! Core data models for price detection and conversion

pub mod rates;
pub mod registry;
pub mod message;

pub use rates::*;
pub use registry::*;
pub use message::*;
