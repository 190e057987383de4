//! Core domain types and logic.

pub mod tree;
pub mod position;
pub mod portfolio;
pub mod normalizer;
pub mod valuation;
pub mod settings;
pub mod error;
