use std::{
    collections::HashMap,
    env, fs,
    path::Path,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::{
    config::{
        apply_env_overrides, load_items, load_settings, parse_items, parse_settings, Settings,
    },
    direction::DirectionMode,
    navigation::NavVariant,
    visibility::VisibilityMode,
    CarouselError, ItemId,
};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let stem = name.replace('.', "_");
    let dir = env::temp_dir().join(format!("carousel_config_test_{stem}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write");
    path
}

#[test]
fn defaults_match_documented_values() {
    let settings = Settings::default();
    assert_eq!(settings.interval_ms, 5000);
    assert_eq!(settings.threshold, 0.1);
    assert_eq!(settings.direction_mode, DirectionMode::Linear);
    assert!(!settings.autoplay);
    assert!(settings.restart_timer_on_navigation);

    let options = settings.to_options().expect("options");
    assert_eq!(options.interval, Duration::from_millis(5000));
}

#[test]
fn settings_file_overrides_only_given_keys() {
    let settings = parse_settings(
        r#"
interval_ms = 3000
direction_mode = "circular"
visibility_mode = "latch"
nav_variant = "with_mobile_menu"
autoplay = true
"#,
    )
    .expect("parse");

    assert_eq!(settings.interval_ms, 3000);
    assert_eq!(settings.direction_mode, DirectionMode::Circular);
    assert_eq!(settings.visibility_mode, VisibilityMode::Latch);
    assert_eq!(settings.nav_variant, NavVariant::WithMobileMenu);
    assert!(settings.autoplay);
    assert_eq!(settings.threshold, 0.1);
}

#[test]
fn unknown_enum_value_in_file_is_an_error() {
    assert!(parse_settings(r#"direction_mode = "diagonal""#).is_err());
}

#[test]
fn env_overrides_apply_with_app_prefix_winning() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        lookup(&[
            ("CAROUSEL_INTERVAL_MS", "2500"),
            ("APP__INTERVAL_MS", "1200"),
            ("CAROUSEL_THRESHOLD", "0.5"),
            ("CAROUSEL_DIRECTION_MODE", "circular"),
            ("APP__AUTOPLAY", "on"),
            ("CAROUSEL_ITEMS", "projects.toml"),
        ]),
    );

    assert_eq!(settings.interval_ms, 1200);
    assert_eq!(settings.threshold, 0.5);
    assert_eq!(settings.direction_mode, DirectionMode::Circular);
    assert!(settings.autoplay);
    assert_eq!(settings.items_path.as_deref(), Some(Path::new("projects.toml")));
}

#[test]
fn unparseable_env_values_are_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        lookup(&[
            ("CAROUSEL_INTERVAL_MS", "soon"),
            ("CAROUSEL_THRESHOLD", "half"),
            ("CAROUSEL_DIRECTION_MODE", "zigzag"),
            ("CAROUSEL_AUTOPLAY", "maybe"),
        ]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn to_options_rejects_invalid_values() {
    let zero = Settings {
        interval_ms: 0,
        ..Settings::default()
    };
    assert_eq!(zero.to_options().unwrap_err(), CarouselError::NonPositiveInterval(0));

    let threshold = Settings {
        threshold: 1.5,
        ..Settings::default()
    };
    assert_eq!(threshold.to_options().unwrap_err(), CarouselError::InvalidThreshold(1.5));
}

#[test]
fn load_settings_reads_explicit_file() {
    let path = temp_file("carousel.toml", "interval_ms = 750\npause_on_hover = true\n");
    let settings = load_settings(Some(path.as_path())).expect("load");
    assert!(settings.pause_on_hover);
    // The environment may override the interval on a developer machine.
    if env::var("CAROUSEL_INTERVAL_MS").is_err() && env::var("APP__INTERVAL_MS").is_err() {
        assert_eq!(settings.interval_ms, 750);
    }
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn load_settings_fails_for_missing_explicit_file() {
    let missing = env::temp_dir().join("carousel_config_test_missing/none.toml");
    let error = load_settings(Some(missing.as_path())).unwrap_err();
    assert!(error.to_string().contains("failed to read settings file"));
}

#[test]
fn items_file_parses_tables_in_order() {
    let items = parse_items(
        r##"
[[items]]
id = 1
title = "Night of info"
tools = "React, Tailwind CSS"
demo_link = "https://example.org"
image = "info.png"

[[items]]
id = 2
title = "Turnover model"
demo_link = "#"
"##,
    )
    .expect("items");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, ItemId(1));
    assert!(items[0].has_demo());
    assert!(!items[1].has_demo());
    assert_eq!(items[1].image, "");
}

#[test]
fn load_items_reports_path_on_failure() {
    let path = temp_file("items.toml", "[[items]]\ntitle = 3\n");
    let error = load_items(&path).unwrap_err();
    assert!(format!("{error:#}").contains("items.toml"));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}
