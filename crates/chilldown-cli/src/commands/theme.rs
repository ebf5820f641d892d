use chilldown_core::{Config, StateStore, Theme};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Current theme and its palette
    Show,
    /// Flip between day and night
    Toggle,
    /// Select a theme
    Set {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum ThemeArg {
    Day,
    Night,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Day => Theme::Day,
            ThemeArg::Night => Theme::Night,
        }
    }
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = StateStore::open()?;
    let current = store
        .load_theme()
        .unwrap_or_else(|| Config::load_or_default().ui.default_theme);

    match action {
        ThemeAction::Show => {
            let json = serde_json::json!({
                "theme": current,
                "palette": current.palette(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        ThemeAction::Toggle => {
            let next = current.toggled();
            store.save_theme(next);
            println!("theme set to {next}");
        }
        ThemeAction::Set { theme } => {
            let next = Theme::from(theme);
            store.save_theme(next);
            println!("theme set to {next}");
        }
    }
    Ok(())
}
