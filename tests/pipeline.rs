use std::fs;

use polybar_play::cache::Cache;
use polybar_play::format::render;
use polybar_play::{Config, Error, PlaybackStatus, TrackMetadata};
use serde_json::{Map, Value, json};
use tempfile::tempdir;

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

fn render_payload(config: &Config, cache: &Cache, fresh: Map<String, Value>, status: &str) -> String {
    let payload = cache.resolve(fresh).unwrap();
    let track = TrackMetadata::from_payload(&payload, PlaybackStatus::from_bus(Some(status)));
    render(config, &track).unwrap()
}

#[test]
fn empty_metadata_uses_the_last_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lastplayed.json");
    fs::write(
        &path,
        r#"{"xesam:artist": ["Old Band"], "xesam:title": "Old Song", "xesam:album": "Old Album"}"#,
    )
    .unwrap();

    let config = Config {
        cache_path: path.clone(),
        format: "{artist} - {song}".to_string(),
        ..Config::default()
    };
    let line = render_payload(&config, &Cache::new(&path), Map::new(), "Playing");
    assert_eq!(line, "Old Band - Old Song");
}

#[test]
fn fresh_metadata_replaces_the_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lastplayed.json");
    let cache = Cache::new(&path);
    let config = Config {
        format: "{play_pause} {song} [{album}]".to_string(),
        play_pause: "P,S,?".to_string(),
        ..Config::default()
    };

    let fresh = object(json!({
        "mpris:trackid": "/org/mpris/MediaPlayer2/Track/7",
        "xesam:artist": ["Band"],
        "xesam:title": "New Song",
        "xesam:album": "Record",
    }));
    assert_eq!(render_payload(&config, &cache, fresh.clone(), "Paused"), "S New Song [Record]");

    let stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored, Value::Object(fresh));

    // player goes quiet, snapshot still renders
    assert_eq!(render_payload(&config, &cache, Map::new(), ""), " New Song [Record]");
}

#[test]
fn empty_metadata_without_snapshot_fails() {
    let dir = tempdir().unwrap();
    let cache = Cache::new(dir.path().join("never-written.json"));
    let err = cache.resolve(Map::new()).unwrap_err();
    assert!(matches!(err, Error::CacheUnavailable { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn quiet_pause_prints_blank_line_even_from_cache() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lastplayed.json");
    let cache = Cache::new(&path);
    cache.store(&object(json!({ "xesam:title": "Song" }))).unwrap();

    let config = Config { quiet: true, ..Config::default() };
    assert_eq!(render_payload(&config, &cache, Map::new(), "Paused"), "");
    assert_eq!(render_payload(&config, &cache, Map::new(), "Playing"), "\u{f04b} : Song");
}
