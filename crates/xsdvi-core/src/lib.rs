//! Xsdvi Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Xsdvi crates:
//!
//! - **Schema**: The read-only XML Schema component graph ([`schema`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Text**: Text measurement backends ([`text`] module)
//! - **Symbol**: Renderable diagram nodes and their sizing ([`symbol`] module)

pub mod geometry;
pub mod schema;
pub mod symbol;
pub mod text;
