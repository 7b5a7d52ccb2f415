//! ECS components for entities.
//!
//! Submodules overview:
//! - [`screenposition`] – screen-space position for UI elements
//! - [`uitable`] – table layout: cells, bounds, the table itself and its builder
//! - [`widget`] – labels, text buttons and image buttons

pub mod screenposition;
pub mod uitable;
pub mod widget;
