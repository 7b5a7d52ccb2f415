//! Presentation systems and observers.
//!
//! Submodules overview
//! - [`camerashake`] – queue shakes on player hits and move the camera
//! - [`gameconfig`] – push configuration changes into dependent resources
//! - [`menu`] – high-score updates and menu button actions
//! - [`time`] – update simulation time and delta
//! - [`uiinput`] – pointer clicks on UI buttons
//! - [`uilayout`] – table layout for UI widgets

pub mod camerashake;
pub mod gameconfig;
pub mod menu;
pub mod time;
pub mod uiinput;
pub mod uilayout;
