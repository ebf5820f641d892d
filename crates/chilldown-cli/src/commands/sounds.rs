use chilldown_core::sounds::{catalog, presets};
use chilldown_core::StateStore;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum SoundsAction {
    /// Sound catalog and mix presets
    List,
    /// Current mix state as JSON
    Status,
    /// Start looping a sound
    Play {
        /// Sound id (e.g. "rain")
        id: String,
    },
    /// Stop a sound
    Stop {
        /// Sound id
        id: String,
    },
    /// Set a sound's volume (0-100)
    Volume {
        /// Sound id
        id: String,
        /// Volume, clamped to 100
        volume: u8,
    },
    /// Replace the mix with a named preset
    Preset {
        /// Preset id (e.g. "focus")
        id: String,
    },
    /// Stop every sound
    StopAll,
}

pub fn run(action: SoundsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = StateStore::open()?;
    let mut mixer = store.load_mixer();

    match action {
        SoundsAction::List => {
            let json = serde_json::json!({
                "sounds": catalog(),
                "presets": presets(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        SoundsAction::Status => {
            println!("{}", serde_json::to_string_pretty(&mixer)?);
        }
        SoundsAction::Play { id } => {
            if !mixer.set_playing(&id, true) {
                eprintln!("unknown sound: {id}");
                std::process::exit(1);
            }
            store.save_mixer(&mixer);
            println!("playing {id} at volume {}", mixer.volume(&id));
        }
        SoundsAction::Stop { id } => {
            if !mixer.set_playing(&id, false) {
                eprintln!("unknown sound: {id}");
                std::process::exit(1);
            }
            store.save_mixer(&mixer);
            println!("stopped {id}");
        }
        SoundsAction::Volume { id, volume } => {
            if !mixer.set_volume(&id, volume) {
                eprintln!("unknown sound: {id}");
                std::process::exit(1);
            }
            store.save_mixer(&mixer);
            println!("{id} volume set to {}", mixer.volume(&id));
        }
        SoundsAction::Preset { id } => {
            if !mixer.apply_preset(&id) {
                eprintln!("unknown preset: {id}");
                std::process::exit(1);
            }
            store.save_mixer(&mixer);
            for (sound, volume) in mixer.active() {
                println!("{sound} at {volume}");
            }
        }
        SoundsAction::StopAll => {
            mixer.stop_all();
            store.save_mixer(&mixer);
            println!("all sounds stopped");
        }
    }
    Ok(())
}
