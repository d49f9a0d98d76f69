use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use shared::{domain::Item, error::CarouselError};
use tracing::warn;

use crate::{
    controller::{CarouselOptions, DEFAULT_INTERVAL, DEFAULT_THRESHOLD},
    direction::DirectionMode,
    navigation::NavVariant,
    visibility::VisibilityMode,
};

pub const DEFAULT_SETTINGS_FILE: &str = "carousel.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub interval_ms: u64,
    pub threshold: f64,
    pub direction_mode: DirectionMode,
    pub visibility_mode: VisibilityMode,
    pub nav_variant: NavVariant,
    pub autoplay: bool,
    pub initial_index: usize,
    pub pause_on_hover: bool,
    pub pause_on_manual_navigation: bool,
    pub restart_timer_on_navigation: bool,
    pub items_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            threshold: DEFAULT_THRESHOLD,
            direction_mode: DirectionMode::Linear,
            visibility_mode: VisibilityMode::Follow,
            nav_variant: NavVariant::Desktop,
            autoplay: false,
            initial_index: 0,
            pause_on_hover: false,
            pause_on_manual_navigation: false,
            restart_timer_on_navigation: true,
            items_path: None,
        }
    }
}

impl Settings {
    pub fn to_options(&self) -> Result<CarouselOptions, CarouselError> {
        let options = CarouselOptions {
            interval: Duration::from_millis(self.interval_ms),
            threshold: self.threshold,
            direction_mode: self.direction_mode,
            initial_index: self.initial_index,
            start_auto_playing: self.autoplay,
            pause_on_hover: self.pause_on_hover,
            pause_on_manual_navigation: self.pause_on_manual_navigation,
            restart_timer_on_navigation: self.restart_timer_on_navigation,
        };
        options.validate()?;
        Ok(options)
    }
}

/// Defaults, then the settings file, then environment overrides.
///
/// An explicit `path` must exist; without one, `carousel.toml` in the working
/// directory is used when present.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match path {
        Some(path) => read_settings_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_SETTINGS_FILE);
            if default_path.exists() {
                read_settings_file(default_path)?
            } else {
                Settings::default()
            }
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    parse_settings(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))
}

pub fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str(raw)?)
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup_any(&lookup, &["CAROUSEL_INTERVAL_MS", "APP__INTERVAL_MS"]) {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.interval_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring unparseable interval override"),
        }
    }

    if let Some(v) = lookup_any(&lookup, &["CAROUSEL_THRESHOLD", "APP__THRESHOLD"]) {
        match v.trim().parse::<f64>() {
            Ok(parsed) => settings.threshold = parsed,
            Err(_) => warn!(value = %v, "ignoring unparseable threshold override"),
        }
    }

    if let Some(v) = lookup_any(&lookup, &["CAROUSEL_DIRECTION_MODE", "APP__DIRECTION_MODE"]) {
        match v.parse::<DirectionMode>() {
            Ok(parsed) => settings.direction_mode = parsed,
            Err(error) => warn!(%error, "ignoring direction mode override"),
        }
    }

    if let Some(v) = lookup_any(&lookup, &["CAROUSEL_AUTOPLAY", "APP__AUTOPLAY"]) {
        match parse_flag(&v) {
            Some(parsed) => settings.autoplay = parsed,
            None => warn!(value = %v, "ignoring unparseable autoplay override"),
        }
    }

    if let Some(v) = lookup_any(&lookup, &["CAROUSEL_ITEMS", "APP__ITEMS"]) {
        settings.items_path = Some(PathBuf::from(v));
    }
}

fn lookup_any(lookup: &impl Fn(&str) -> Option<String>, keys: &[&str]) -> Option<String> {
    // The APP__ spelling wins when both are set.
    keys.iter().filter_map(|key| lookup(key)).last()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct ItemsFile {
    #[serde(default)]
    items: Vec<Item>,
}

pub fn load_items(path: &Path) -> anyhow::Result<Vec<Item>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read items file '{}'", path.display()))?;
    parse_items(&raw).with_context(|| format!("failed to parse items file '{}'", path.display()))
}

pub fn parse_items(raw: &str) -> anyhow::Result<Vec<Item>> {
    let file: ItemsFile = toml::from_str(raw)?;
    Ok(file.items)
}
