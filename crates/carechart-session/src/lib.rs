//! Session Gate shared by Carechart services.
//!
//! Provides signed session tokens, the session cookie builders, and the `DoctorSession`
//! extractor that every protected handler takes as a parameter.

pub mod cookie;
pub mod gate;
pub mod token;
