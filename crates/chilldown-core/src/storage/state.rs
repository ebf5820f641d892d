//! Typed persistence facade over the kv table.
//!
//! Every field of widget state lives under its own key as JSON. Loads
//! validate and fall back to `None` on anything unreadable; saves are
//! fire-and-forget (log and continue), so a broken disk never takes the
//! timer down with it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::database::Database;
use crate::error::StorageError;
use crate::sounds::{SoundMixer, MAX_VOLUME};
use crate::stats::StatsLog;
use crate::theme::Theme;
use crate::timer::{PomodoroState, Time, MAX_HOURS, MAX_MINUTES, MAX_SECONDS};

const KEY_TIME: &str = "timer_time";
const KEY_INITIAL_TIME: &str = "initial_time";
const KEY_RUNNING: &str = "timer_running";
const KEY_EDITING: &str = "timer_editing";
const KEY_POMODORO: &str = "pomodoro_state";
const KEY_STATS: &str = "timer_stats";
const KEY_THEME: &str = "theme";
const KEY_SOUND_VOLUMES: &str = "sound_volumes";
const KEY_SOUNDS_PLAYING: &str = "sounds_playing";

/// Persisted widget state, one kv key per logical field.
pub struct StateStore {
    db: Database,
}

impl StateStore {
    pub fn new(db: Database) -> Self {
        StateStore { db }
    }

    /// Open the default on-disk store.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self::new(Database::open()?))
    }

    /// Open a store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        Ok(Self::new(Database::open_at(path)?))
    }

    // ── Timer ────────────────────────────────────────────────────────────

    pub fn load_time(&self) -> Option<Time> {
        self.load::<Time>(KEY_TIME).filter(in_display_range)
    }

    pub fn save_time(&self, time: &Time) {
        self.save(KEY_TIME, time);
    }

    pub fn load_initial_time(&self) -> Option<Time> {
        self.load::<Time>(KEY_INITIAL_TIME).filter(in_display_range)
    }

    pub fn save_initial_time(&self, time: &Time) {
        self.save(KEY_INITIAL_TIME, time);
    }

    /// Whether the timer was running when last saved. The engine never
    /// restores this as live state; it exists for display only.
    pub fn load_running(&self) -> Option<bool> {
        self.load(KEY_RUNNING)
    }

    pub fn save_running(&self, running: bool) {
        self.save(KEY_RUNNING, &running);
    }

    pub fn load_editing(&self) -> Option<bool> {
        self.load(KEY_EDITING)
    }

    pub fn save_editing(&self, editing: bool) {
        self.save(KEY_EDITING, &editing);
    }

    pub fn load_pomodoro(&self) -> Option<PomodoroState> {
        self.load(KEY_POMODORO)
    }

    pub fn save_pomodoro(&self, state: &PomodoroState) {
        self.save(KEY_POMODORO, state);
    }

    pub fn load_stats(&self) -> Option<StatsLog> {
        self.load(KEY_STATS)
    }

    pub fn save_stats(&self, stats: &StatsLog) {
        self.save(KEY_STATS, stats);
    }

    // ── Theme & sounds ───────────────────────────────────────────────────

    pub fn load_theme(&self) -> Option<Theme> {
        self.load(KEY_THEME)
    }

    pub fn save_theme(&self, theme: Theme) {
        self.save(KEY_THEME, &theme);
    }

    /// Load the sound mix, clamping any out-of-range stored volume.
    pub fn load_mixer(&self) -> SoundMixer {
        let mut volumes: BTreeMap<String, u8> =
            self.load(KEY_SOUND_VOLUMES).unwrap_or_default();
        for v in volumes.values_mut() {
            *v = (*v).min(MAX_VOLUME);
        }
        SoundMixer {
            volumes,
            playing: self.load(KEY_SOUNDS_PLAYING).unwrap_or_default(),
        }
    }

    pub fn save_mixer(&self, mixer: &SoundMixer) {
        self.save(KEY_SOUND_VOLUMES, &mixer.volumes);
        self.save(KEY_SOUNDS_PLAYING, &mixer.playing);
    }

    // ── Internal ─────────────────────────────────────────────────────────

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.db.kv_get(key) {
            Ok(value) => value?,
            Err(e) => {
                log::warn!("failed to read '{key}': {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring corrupt value for '{key}': {e}");
                None
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to serialize '{key}': {e}");
                return;
            }
        };
        if let Err(e) = self.db.kv_set(key, &json) {
            log::warn!("failed to save '{key}': {e}");
        }
    }
}

fn in_display_range(t: &Time) -> bool {
    t.hours <= MAX_HOURS && t.minutes <= MAX_MINUTES && t.seconds <= MAX_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::PomodoroPhase;

    fn memory_store() -> StateStore {
        StateStore::new(Database::open_memory().unwrap())
    }

    #[test]
    fn unset_fields_load_as_none() {
        let store = memory_store();
        assert!(store.load_time().is_none());
        assert!(store.load_running().is_none());
        assert!(store.load_theme().is_none());
        assert!(store.load_stats().is_none());
    }

    #[test]
    fn timer_fields_roundtrip() {
        let store = memory_store();
        let time = Time::new(0, 25, 0);
        store.save_time(&time);
        store.save_initial_time(&time);
        store.save_running(true);
        store.save_editing(false);

        assert_eq!(store.load_time(), Some(time));
        assert_eq!(store.load_initial_time(), Some(time));
        assert_eq!(store.load_running(), Some(true));
        assert_eq!(store.load_editing(), Some(false));
    }

    #[test]
    fn pomodoro_state_roundtrip() {
        let store = memory_store();
        let state = PomodoroState {
            phase: PomodoroPhase::Break,
            session_count: 4,
        };
        store.save_pomodoro(&state);
        assert_eq!(store.load_pomodoro(), Some(state));
    }

    #[test]
    fn corrupt_json_falls_back_to_none() {
        let store = memory_store();
        store.db.kv_set(KEY_TIME, "{not json").unwrap();
        store.db.kv_set(KEY_RUNNING, "\"maybe\"").unwrap();
        assert!(store.load_time().is_none());
        assert!(store.load_running().is_none());
    }

    #[test]
    fn out_of_range_time_is_rejected() {
        let store = memory_store();
        store
            .db
            .kv_set(KEY_TIME, "{\"hours\":120,\"minutes\":0,\"seconds\":0}")
            .unwrap();
        assert!(store.load_time().is_none());
    }

    #[test]
    fn mixer_roundtrip_and_clamp() {
        let store = memory_store();
        let mut mixer = SoundMixer::default();
        mixer.set_volume("rain", 80);
        mixer.toggle("rain");
        mixer.toggle("cafe");
        store.save_mixer(&mixer);

        assert_eq!(store.load_mixer(), mixer);

        // stored volumes past the max come back clamped
        store
            .db
            .kv_set(KEY_SOUND_VOLUMES, "{\"rain\":200}")
            .unwrap();
        assert_eq!(store.load_mixer().volume("rain"), MAX_VOLUME);
    }

    #[test]
    fn theme_roundtrip() {
        let store = memory_store();
        store.save_theme(Theme::Night);
        assert_eq!(store.load_theme(), Some(Theme::Night));
    }
}
