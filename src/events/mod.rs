//! Event types used by the presentation systems.
//!
//! Events provide a decoupled way for gameplay code to notify presentation
//! code (and back) without direct dependencies. All events here are
//! observer events: trigger them with `commands.trigger(..)` or
//! `world.trigger(..)` and react with an `On<E>` observer.
//!
//! Submodules:
//! - [`gameevent`] – gameplay notifications, e.g. the player taking a hit
//! - [`ui`] – widget clicks and high-score updates for the menu
pub mod gameevent;
pub mod ui;
