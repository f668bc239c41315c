//! Registry implementations.
//!
//! The usecase layer depends on the domain traits, not on these types
//! directly (dependency inversion).

pub mod inmemory;

pub use inmemory::{InMemoryConnectionRegistry, InMemoryRoomRegistry};
