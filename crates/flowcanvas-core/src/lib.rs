//! Flowcanvas Core Types
//!
//! This crate provides the value types shared by the Flowcanvas dialog-graph
//! pipeline. It includes:
//!
//! - **Geometry**: points, boundaries with connector axes, and the boundary
//!   algebra used to compose layouts ([`geometry`] module)
//! - **Graph**: nodes, anchored edges and layouter output ([`graph`] module)
//! - **Selection**: rendered element rectangles used for keyboard
//!   navigation ([`selection`] module)

pub mod geometry;
pub mod graph;
pub mod selection;
