//! Global signal storage resource.
//!
//! The [`WorldSignals`] resource is a world-wide flag set for cross-system
//! communication. The menu writes what the player picked here
//! ("start_game", "quit_game", ...) and the game flow reads it.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashSet;

/// Global signal storage for cross-system communication.
#[derive(Debug, Clone, Default, Resource)]
pub struct WorldSignals {
    /// Presence-only boolean flags; a key being present means "true".
    pub flags: FxHashSet<String>,
}

impl WorldSignals {
    /// Set a flag.
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    /// Clear a flag.
    pub fn clear_flag(&mut self, key: &str) {
        self.flags.remove(key);
    }
    /// Set or clear a flag from a boolean.
    pub fn set_flag_to(&mut self, key: impl Into<String>, value: bool) {
        let key = key.into();
        if value {
            self.flags.insert(key);
        } else {
            self.flags.remove(&key);
        }
    }
    /// Check if a flag is set.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut s = WorldSignals::default();
        s.set_flag("quit_game");
        assert!(s.has_flag("quit_game"));
        s.clear_flag("quit_game");
        assert!(!s.has_flag("quit_game"));
        s.set_flag_to("sound_muted", true);
        assert!(s.has_flag("sound_muted"));
        s.set_flag_to("sound_muted", false);
        assert!(!s.has_flag("sound_muted"));
    }

    #[test]
    fn test_set_flag_twice_keeps_one_entry() {
        let mut s = WorldSignals::default();
        s.set_flag("start_game");
        s.set_flag("start_game");
        assert_eq!(s.flags.len(), 1);
    }
}
