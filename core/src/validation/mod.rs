//! Input validation and correctness verification

pub mod correctness;
pub mod input;
