//! Domain rules shared across Carechart services.
//!
//! This crate contains only pure types and functions with no web framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `handlers/`.

pub mod attachment;
pub mod id;
pub mod password;
pub mod reset_token;
pub mod survey;
