pub mod config;
pub mod sounds;
pub mod stats;
pub mod theme;
pub mod timer;
