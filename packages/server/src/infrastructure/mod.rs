//! Infrastructure layer: transport-facing implementations.

pub mod broadcast;
pub mod dto;
