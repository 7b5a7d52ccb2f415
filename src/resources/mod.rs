//! ECS resources made available to systems.
//!
//! Overview
//! - `camera2d` – shared 2D camera moved by the shake effect
//! - `camerashake` – pool and queue of camera shakes
//! - `gameconfig` – settings loaded from `config.ini`
//! - `i18n` – localized strings from `.properties` bundles
//! - `input` – per-frame pointer state
//! - `menuui` – entities of the main menu and its high-score line
//! - `pool` – generic object pool
//! - `screensize` – render resolution UI tables are laid out against
//! - `skin` – named widget styles
//! - `worldsignals` – global flags set by the menu
//! - `worldtime` – simulation time and delta
pub mod camera2d;
pub mod camerashake;
pub mod gameconfig;
pub mod i18n;
pub mod input;
pub mod menuui;
pub mod pool;
pub mod screensize;
pub mod skin;
pub mod worldsignals;
pub mod worldtime;
