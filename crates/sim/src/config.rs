//! Simulator configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use anyhow::Context;
use rotation_content::bard::BardKit;
use rotation_content::{ConfigLoader, OpenerLoader};
use rotation_core::EngineConfig;

/// Encounter and output settings for one simulated pull.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Seconds of combat to simulate.
    pub duration: f32,
    /// Seconds between decision ticks.
    pub tick: f32,
    /// Main-action slot length.
    pub gcd: f32,
    /// Hostiles in range of area actions.
    pub targets: u8,
    /// Combat time of the first party burst window (repeats every 120 s).
    pub party_burst_at: f32,
    /// Engine configuration file (`.toml` or `.ron`).
    pub config_path: Option<PathBuf>,
    /// Opener script file (`.toml` or `.ron`).
    pub opener_path: Option<PathBuf>,
    /// Emit one JSON line per issued action on stdout.
    pub json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            duration: 180.0,
            tick: 0.1,
            gcd: 2.5,
            targets: 1,
            party_burst_at: 7.0,
            config_path: None,
            opener_path: None,
            json: false,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `SIM_DURATION` / `SIM_TICK` / `SIM_GCD`
    /// - `SIM_TARGETS`
    /// - `SIM_PARTY_BURST_AT`
    /// - `SIM_CONFIG` / `SIM_OPENER`
    /// - `SIM_JSON`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(duration) = read_env::<f32>("SIM_DURATION") {
            config.duration = duration.max(0.0);
        }
        if let Some(tick) = read_env::<f32>("SIM_TICK") {
            config.tick = tick.max(0.01);
        }
        if let Some(gcd) = read_env::<f32>("SIM_GCD") {
            config.gcd = gcd.max(1.0);
        }
        if let Some(targets) = read_env::<u8>("SIM_TARGETS") {
            config.targets = targets;
        }
        if let Some(at) = read_env::<f32>("SIM_PARTY_BURST_AT") {
            config.party_burst_at = at.max(0.0);
        }
        config.config_path = read_env::<PathBuf>("SIM_CONFIG");
        config.opener_path = read_env::<PathBuf>("SIM_OPENER");
        if let Some(json) = read_env::<bool>("SIM_JSON") {
            config.json = json;
        }

        config
    }

    /// Engine configuration from `config_path`, or the defaults.
    pub fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        match &self.config_path {
            Some(path) => ConfigLoader::load(path),
            None => Ok(EngineConfig::default()),
        }
    }

    /// Job kit with the opener from `opener_path`, if given.
    pub fn kit(&self) -> anyhow::Result<BardKit> {
        let kit = BardKit::default();
        match &self.opener_path {
            Some(path) => {
                let opener = OpenerLoader::load(path)
                    .with_context(|| format!("failed to load opener {}", path.display()))?;
                Ok(kit.with_opener(opener))
            }
            None => Ok(kit),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
