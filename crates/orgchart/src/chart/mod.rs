//! Org chart layout
//!
//! Turns a flat list of [`Entity`](crate::core::Entity) records into banded
//! box positions and orthogonal connectors.
//!
//! Pipeline, leaf-first:
//! - [`bands`]: group entities by level
//! - [`hierarchy`]: resolve parents into an adjacency index
//! - [`positioning`]: provisional left-to-right placement
//! - [`centering`] and [`overlap`]: bottom-up centering with per-band overlap resolution
//! - [`routing`]: connector geometry
//! - [`bounds`]: viewport rectangle

pub mod bands;
pub mod bounds;
mod cache;
pub mod centering;
mod database;
pub mod hierarchy;
mod layout;
pub mod overlap;
pub mod positioning;
pub mod routing;

pub use cache::LayoutCache;
pub use database::OrgDatabase;
pub use layout::OrgChartLayoutAlgorithm;
