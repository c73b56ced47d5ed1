use std::path::{Path, PathBuf};

use css_sprite_core::prelude::*;

#[test]
fn parses_kebab_case_json_and_ignores_unknown_keys() {
    let text = r#"{
        "path": "web/css",
        "settings": { "max-width": 512, "min-size": 4, "max-size": 128, "quality": 3, "sort": true, "color": "red" },
        "sprites": [
            { "name": "ui", "path": "icons/ui" },
            { "name": "flags", "path": "icons/flags", "output": "web/img" }
        ]
    }"#;
    let cfg: SpriteConfig = serde_json::from_str(text).expect("parse");
    assert_eq!(cfg.path, PathBuf::from("web/css"));
    assert_eq!(
        cfg.settings,
        Settings::builder()
            .max_width(512)
            .size_bounds(4, 128)
            .quality(3)
            .sort(true)
            .build()
    );
    assert_eq!(cfg.sprites.len(), 2);
    assert_eq!(cfg.sprites[1].output, Some(PathBuf::from("web/img")));
    cfg.validate().expect("valid");
}

#[test]
fn missing_settings_fall_back_to_defaults() {
    let cfg: SpriteConfig =
        serde_json::from_str(r#"{ "sprites": [{ "name": "ui", "path": "icons" }] }"#).expect("parse");
    assert_eq!(cfg.path, PathBuf::from("public/css"));
    assert_eq!(cfg.settings, Settings::default());
    assert_eq!(cfg.settings.max_width, 1024);
    assert_eq!(cfg.settings.min_size, 1);
    assert_eq!(cfg.settings.max_size, 512);
    assert_eq!(cfg.settings.quality, 9);
    assert!(!cfg.settings.sort);
}

fn one_group(settings: Settings) -> SpriteConfig {
    SpriteConfig {
        settings,
        sprites: vec![GroupConfig::new("ui", "icons")],
        ..Default::default()
    }
}

fn invalid(cfg: &SpriteConfig) -> String {
    match cfg.validate() {
        Err(SpriteError::InvalidConfig(msg)) => msg,
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn rejects_out_of_range_settings() {
    let msg = invalid(&one_group(Settings::builder().max_width(0).build()));
    assert!(msg.contains("max-width"));
    let msg = invalid(&one_group(Settings::builder().size_bounds(10, 5).build()));
    assert!(msg.contains("min-size"));
    let msg = invalid(&one_group(Settings::builder().quality(10).build()));
    assert!(msg.contains("quality"));
    // Equal bounds are fine.
    one_group(Settings::builder().size_bounds(16, 16).build())
        .validate()
        .expect("equal bounds");
}

#[test]
fn rejects_bad_group_declarations() {
    let empty = SpriteConfig::default();
    assert!(invalid(&empty).contains("no sprite groups"));

    for bad in ["", "my icons", "ui.v2", "ünï"] {
        let cfg = SpriteConfig {
            sprites: vec![GroupConfig::new(bad, "icons")],
            ..Default::default()
        };
        assert!(invalid(&cfg).contains("group name"), "name {bad:?}");
    }

    let dup = SpriteConfig {
        sprites: vec![GroupConfig::new("ui", "a"), GroupConfig::new("ui", "b")],
        ..Default::default()
    };
    assert!(invalid(&dup).contains("more than once"));
}

#[test]
fn paths_resolve_against_root() {
    let cfg = SpriteConfig {
        sprites: vec![
            GroupConfig::new("ui", "icons/ui"),
            GroupConfig::new("flags", "icons/flags").with_output("img"),
        ],
        ..Default::default()
    };
    let root = Path::new("/srv/site");
    assert_eq!(cfg.stylesheet_dir(root), root.join("public/css"));
    assert_eq!(cfg.source_dir(root, &cfg.sprites[0]), root.join("icons/ui"));
    assert_eq!(cfg.output_dir(root, &cfg.sprites[0]), root.join("public/css"));
    assert_eq!(cfg.output_dir(root, &cfg.sprites[1]), root.join("img"));
    assert_eq!(cfg.sprites[1].image_file_name(), "sprite-flags.png");
    assert_eq!(cfg.sprites[1].manifest_file_name(), "sprite-flags.json");
}

#[test]
fn constraints_mirror_settings() {
    let settings = Settings::builder().max_width(300).size_bounds(2, 40).build();
    let cons = settings.constraints();
    assert_eq!(cons.max_width, 300);
    assert!(cons.accepts(2, 40));
    assert!(!cons.accepts(1, 10));
    assert!(!cons.accepts(10, 41));
}

#[test]
fn serializes_back_with_kebab_keys() {
    let cfg = one_group(Settings::default());
    let json = serde_json::to_value(&cfg).expect("serialize");
    assert_eq!(json["settings"]["max-width"], 1024);
    assert!(json["sprites"][0].get("output").is_none());
}
