//! Ember Services Layer
//!
//! Runtime-facing services that sit outside the core: currently the
//! on-disk settings used to configure the headless runtime.

pub mod settings;

pub use settings::{LoggingSettings, Settings, SettingsError, SimulationSettings, WindowSettings};
