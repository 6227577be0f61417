//! Stratus Core Types and Definitions
//!
//! This crate provides the foundational types for Stratus architecture
//! diagrams. It includes:
//!
//! - **Errors**: Construction failures ([`error::ConstructError`])
//! - **Colors**: CSS color parsing with Graphviz output ([`color::Color`])
//! - **Kinds**: Infrastructure node kinds and their categories ([`kind`] module)
//! - **Style**: Edge direction and line styling ([`style`] module)
//! - **Semantic**: The declared diagram model ([`semantic`] module)

pub mod color;
pub mod error;
pub mod kind;
pub mod semantic;
pub mod style;
