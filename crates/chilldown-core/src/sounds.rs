//! Ambient sound mixer: the fixed sound catalog, mix presets, and the
//! per-sound volume/playing state the frontend renders from.
//!
//! Audio decoding and output stay in the frontend; this module only
//! tracks which loops are on and how loud, so the mix survives restarts.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Loudest allowed per-sound volume.
pub const MAX_VOLUME: u8 = 100;
/// Volume a sound gets before the user ever touches its slider.
pub const DEFAULT_VOLUME: u8 = 50;

/// One loopable ambient sound in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sound {
    pub id: &'static str,
    pub name: &'static str,
}

/// A named combination of sounds and volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SoundPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// `(sound id, volume)` pairs the preset turns on.
    pub levels: &'static [(&'static str, u8)],
}

const SOUNDS: &[Sound] = &[
    Sound { id: "rain", name: "Rain" },
    Sound { id: "forest", name: "Forest" },
    Sound { id: "cafe", name: "Cafe" },
    Sound { id: "garden", name: "Garden" },
    Sound { id: "farm", name: "Farm" },
    Sound { id: "restaurant", name: "Restaurant" },
];

const PRESETS: &[SoundPreset] = &[
    SoundPreset {
        id: "focus",
        name: "Focus",
        description: "Perfect for deep work",
        levels: &[("rain", 60), ("forest", 40)],
    },
    SoundPreset {
        id: "cafe",
        name: "Coffee Shop",
        description: "Cafe ambiance",
        levels: &[("cafe", 70), ("garden", 40)],
    },
    SoundPreset {
        id: "nature",
        name: "Nature",
        description: "Natural sounds",
        levels: &[("garden", 50), ("farm", 50), ("rain", 30)],
    },
    SoundPreset {
        id: "restaurant",
        name: "Restaurant",
        description: "Restaurant ambiance",
        levels: &[("restaurant", 70), ("rain", 30)],
    },
];

/// Every sound the mixer knows about.
pub fn catalog() -> &'static [Sound] {
    SOUNDS
}

/// Every built-in mix preset.
pub fn presets() -> &'static [SoundPreset] {
    PRESETS
}

pub fn find_preset(id: &str) -> Option<&'static SoundPreset> {
    PRESETS.iter().find(|p| p.id == id)
}

fn is_known(id: &str) -> bool {
    SOUNDS.iter().any(|s| s.id == id)
}

/// Current mix state. Sounds absent from `volumes` sit at
/// [`DEFAULT_VOLUME`]; sounds absent from `playing` are off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundMixer {
    #[serde(default)]
    pub volumes: BTreeMap<String, u8>,
    #[serde(default)]
    pub playing: BTreeSet<String>,
}

impl SoundMixer {
    pub fn volume(&self, id: &str) -> u8 {
        self.volumes.get(id).copied().unwrap_or(DEFAULT_VOLUME)
    }

    pub fn is_playing(&self, id: &str) -> bool {
        self.playing.contains(id)
    }

    /// Set a sound's volume, clamped to `0..=MAX_VOLUME`. Does not
    /// start or stop the sound. Unknown ids are ignored.
    pub fn set_volume(&mut self, id: &str, volume: u8) -> bool {
        if !is_known(id) {
            return false;
        }
        self.volumes.insert(id.to_string(), volume.min(MAX_VOLUME));
        true
    }

    /// Set a sound's playing state outright. Returns `false` for an
    /// unknown id.
    pub fn set_playing(&mut self, id: &str, playing: bool) -> bool {
        if !is_known(id) {
            return false;
        }
        if playing {
            self.playing.insert(id.to_string());
        } else {
            self.playing.remove(id);
        }
        true
    }

    /// Flip a sound between playing and stopped. Returns the new
    /// playing state, or `None` for an unknown id.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        if !is_known(id) {
            return None;
        }
        if self.playing.remove(id) {
            Some(false)
        } else {
            self.playing.insert(id.to_string());
            Some(true)
        }
    }

    pub fn stop_all(&mut self) {
        self.playing.clear();
    }

    /// Replace the current mix with a preset: everything stops first,
    /// then each preset sound gets its volume and starts.
    pub fn apply_preset(&mut self, preset_id: &str) -> bool {
        let Some(preset) = find_preset(preset_id) else {
            return false;
        };
        self.stop_all();
        for &(id, volume) in preset.levels {
            self.set_volume(id, volume);
            self.playing.insert(id.to_string());
        }
        true
    }

    /// Sounds currently on, with their volumes.
    pub fn active(&self) -> Vec<(&str, u8)> {
        self.playing
            .iter()
            .map(|id| (id.as_str(), self.volume(id)))
            .collect()
    }
}
