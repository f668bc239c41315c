//! Infrastructure layer: wire-format DTOs and registry implementations.

pub mod dto;
pub mod registry;
