//! Core Kernel - Foundational types for the bill engine
//!
//! This crate provides the building blocks shared by the billing domain and
//! its consumers:
//! - Lenient decimal parsing for partially filled forms
//! - Percentage values that are applied without clamping
//! - Serde helpers that keep raw form input as text

pub mod decimal;
pub mod input;
pub mod error;

pub use decimal::{parse_lenient, is_well_formed, Percentage};
pub use error::CoreError;
