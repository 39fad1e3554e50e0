//! Core data structures for reframe
//!
//! This crate provides the reference frame graph used to convert surveyed
//! coordinates between named coordinate systems: points, primitive
//! transformations and their chains, declarative configuration (with an XML
//! reader) and path resolution between frames.

pub mod config;
pub mod error;
pub mod frame;
pub mod graph;
pub mod point;
pub mod transform;
pub mod xml;

pub use config::*;
pub use error::*;
pub use frame::*;
pub use graph::*;
pub use point::*;
pub use transform::*;
