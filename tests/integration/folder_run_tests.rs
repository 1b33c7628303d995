/*!
 * End-to-end folder runs through the controller
 */

use anyhow::Result;
use serde_json::json;
use std::path::Path;

use carryover::app_config::Config;
use carryover::app_controller::{Controller, RUN_LOG_FILE};
use carryover::tm_format::{TmRow, read_tm_file, write_tm_file};
use crate::common::{self, cmd, dialogue, event, map_json, page};

/// Lays out a small game data folder
fn write_game(dir: &Path, lines: [&str; 2]) -> Result<()> {
    common::create_test_file(dir, "Actors.json", &json!([null, {"id": 1, "name": "ハロルド"}]).to_string())?;
    common::create_test_file(
        dir,
        "Map001.json",
        &map_json(
            "はじまりの村",
            vec![event(1, "EV001", vec![page(None, 0, dialogue(1, &[lines[0], lines[1]]))])],
        ),
    )?;
    common::create_test_file(
        dir,
        "CommonEvents.json",
        &json!([
            null,
            {"id": 1, "name": "宿屋", "trigger": 0, "switchId": 1, "list": [
                cmd(101, 0, json!(["", 0, 0, 2, "宿の主人"])),
                cmd(401, 0, json!(["一泊10Gです。"])),
                cmd(0, 0, json!([]))
            ]}
        ])
        .to_string(),
    )?;
    common::create_test_file(dir, "Map002.json", "{\"events\": [")?;
    common::create_test_file(dir, "MapInfos.json", "[null]")?;
    Ok(())
}

fn controller() -> Result<Controller> {
    Controller::with_config(Config::default())
}

/// A first run writes both outputs, labels speakers and applies the memory
#[test]
fn test_runFolder_firstRun_shouldWriteOutputs() -> Result<()> {
    common::init_logger();
    let temp_dir = common::create_temp_dir()?;
    let data = temp_dir.path();
    write_game(data, ["ようこそ", "さようなら"])?;
    write_tm_file(&data.join("_combined.csv"), &[TmRow::new("ようこそ", "Welcome", "")])?;

    let summary = controller()?.run_folder(data, None, data)?;

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.stats.dictionary_hits, 1);

    let strings = read_tm_file(&data.join("Map001_strings.csv"))?;
    assert_eq!(
        strings,
        vec![TmRow::new("ようこそ", "Welcome", "ハロルド"), TmRow::new("さようなら", "", "ハロルド")]
    );
    let attributes = read_tm_file(&data.join("Map001_attributes.csv"))?;
    assert_eq!(attributes, vec![TmRow::new("はじまりの村", "", "displayName")]);

    let common_strings = read_tm_file(&data.join("CommonEvents_strings.csv"))?;
    assert_eq!(common_strings[0].context, "宿の主人");

    assert!(!data.join("Map002_strings.csv").exists());
    assert!(data.join(RUN_LOG_FILE).exists());
    Ok(())
}

/// Translations typed into the previous output survive a re-run
#[test]
fn test_runFolder_secondRun_shouldKeepEditedTranslations() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let data = temp_dir.path();
    write_game(data, ["ようこそ", "さようなら"])?;
    let controller = controller()?;
    controller.run_folder(data, None, data)?;

    write_tm_file(
        &data.join("Map001_strings.csv"),
        &[TmRow::new("ようこそ", "Welcome", "ハロルド"), TmRow::new("さようなら", "Goodbye", "ハロルド")],
    )?;
    let summary = controller.run_folder(data, None, data)?;

    let strings = read_tm_file(&data.join("Map001_strings.csv"))?;
    assert_eq!(strings[0].translation, "Welcome");
    assert_eq!(strings[1].translation, "Goodbye");
    assert_eq!(summary.stats.prior_hits, 2);
    Ok(())
}

/// A translated data folder of the previous revision carries by structure
#[test]
fn test_runFolder_priorDir_shouldCarryTranslations() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let data = temp_dir.path().join("data");
    let prior = temp_dir.path().join("prior");
    let output = temp_dir.path().join("tl");
    std::fs::create_dir_all(&data)?;
    std::fs::create_dir_all(&prior)?;
    write_game(&data, ["ようこそ！", "さようなら"])?;
    common::create_test_file(
        &prior,
        "Map001.json",
        &map_json(
            "Starting Village",
            vec![event(1, "EV001", vec![page(None, 0, dialogue(1, &["Welcome!", "Farewell"]))])],
        ),
    )?;

    let summary = controller()?.run_folder(&data, Some(&prior), &output)?;

    let strings = read_tm_file(&output.join("Map001_strings.csv"))?;
    assert_eq!(strings[0].translation, "Welcome!");
    assert_eq!(strings[1].translation, "Farewell");
    let attributes = read_tm_file(&output.join("Map001_attributes.csv"))?;
    assert_eq!(attributes[0].translation, "Starting Village");
    assert_eq!(summary.stats.carried, 2);
    assert!(output.join(RUN_LOG_FILE).exists());
    Ok(())
}

/// A missing input folder is an error, not an empty run
#[test]
fn test_runFolder_missingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("absent");

    let result = controller()?.run_folder(&missing, None, temp_dir.path());

    assert!(result.is_err());
    Ok(())
}
