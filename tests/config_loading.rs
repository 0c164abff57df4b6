//! Loading tuning and level files from disk.

use std::io::Write;

use rstest::{fixture, rstest};
use skirmish::{Arena, ConfigError, LevelDesc, LevelError, Tuning};
use tempfile::NamedTempFile;

#[fixture]
fn file() -> NamedTempFile {
    NamedTempFile::new().unwrap_or_else(|e| panic!("temp file: {e}"))
}

fn write(file: &mut NamedTempFile, text: &str) {
    file.write_all(text.as_bytes())
        .unwrap_or_else(|e| panic!("write temp file: {e}"));
}

#[rstest]
fn partial_tuning_file_overrides_only_named_values(mut file: NamedTempFile) {
    write(
        &mut file,
        r#"{ "player": { "speed": 500.0 }, "enemy": { "max_hp": 8 } }"#,
    );
    let tuning = Tuning::load(file.path()).unwrap_or_else(|e| panic!("load: {e}"));
    assert_eq!(tuning.player.speed, 500.0);
    assert_eq!(tuning.enemy.max_hp, 8);
    assert_eq!(tuning.clock, Tuning::default().clock);
}

#[rstest]
fn malformed_tuning_reports_parse_error(mut file: NamedTempFile) {
    write(&mut file, "{ player: ");
    assert!(matches!(
        Tuning::load(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}

#[rstest]
fn out_of_range_tuning_is_rejected(mut file: NamedTempFile) {
    write(&mut file, r#"{ "clock": { "max_delta": -0.5 } }"#);
    assert!(matches!(
        Tuning::load(file.path()),
        Err(ConfigError::Invalid {
            field: "clock.max_delta",
            ..
        })
    ));
}

#[rstest]
fn missing_tuning_file_reports_read_error() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("temp dir: {e}"));
    let result = Tuning::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[rstest]
fn saved_default_level_loads_back(mut file: NamedTempFile) {
    let json = serde_json::to_string_pretty(&LevelDesc::default())
        .unwrap_or_else(|e| panic!("serialise: {e}"));
    write(&mut file, &json);
    let level = LevelDesc::load(file.path()).unwrap_or_else(|e| panic!("load: {e}"));
    assert_eq!(level, LevelDesc::default());
    let arena = Arena::from_level(&level, &Tuning::default())
        .unwrap_or_else(|e| panic!("arena: {e}"));
    assert_eq!(arena.platforms().len(), 3);
}

#[rstest]
fn level_without_platforms_is_rejected(mut file: NamedTempFile) {
    write(&mut file, r#"{ "platforms": [], "player_spawn": [0, 0] }"#);
    assert!(matches!(
        LevelDesc::load(file.path()),
        Err(LevelError::NoPlatforms)
    ));
}
