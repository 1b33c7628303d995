/*!
 * Tests for extraction over whole content files
 */

use serde_json::json;

use carryover::content::{ContentKind, parse_content};
use carryover::errors::ContentError;
use carryover::extraction::{ExtractOptions, TextUnit};
use carryover::reconcile::reconcile;
use crate::common::{self, TestContext, cmd, dialogue, event, map_json, page};

/// The two-line dialogue yields two blank units in order
#[test]
fn test_reconcile_helloWorldColdStart_shouldYieldTwoUnits() {
    let text = map_json("", vec![event(1, "EV001", vec![page(None, 0, dialogue(0, &["Hello", "World"]))])]);
    let current = common::parse_map(&text);
    let test_ctx = TestContext::alphabetic();

    let out = reconcile(&current, None, &test_ctx.ctx());

    assert_eq!(out.texts, vec![TextUnit::new("Hello", "", ""), TextUnit::new("World", "", "")]);
}

/// Map display names are attributes, dialogue carries the speaker label
#[test]
fn test_reconcile_map_shouldSplitTextsAndAttributes() {
    let text = map_json(
        "はじまりの村",
        vec![event(1, "村人", vec![page(None, 0, dialogue(1, &["ようこそ！"]))])],
    );
    let current = common::parse_map(&text);
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, None, &test_ctx.ctx());

    assert_eq!(out.texts, vec![TextUnit::new("ようこそ！", "", "ハロルド")]);
    assert_eq!(out.attributes.get("はじまりの村").unwrap().context, "displayName");
}

/// Database records export their text fields; notes need rare codes
#[test]
fn test_reconcile_items_shouldExportFields() {
    let text = json!([
        null,
        {"id": 1, "name": "ポーション", "description": "HPを50回復する", "note": "<price:50>", "price": 50},
        {"id": 2, "name": "", "description": ""}
    ])
    .to_string();
    let current = parse_content(ContentKind::Database, "Items.json", &text).unwrap();
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, None, &test_ctx.ctx());

    assert!(out.texts.is_empty());
    let keys: Vec<&str> = out.attributes.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["ポーション", "HPを50回復する"]);
}

/// Troop battle events become attributes with every opcode enabled
#[test]
fn test_reconcile_troops_shouldFoldTextsIntoAttributes() {
    let text = json!([
        null,
        {"id": 1, "name": "スライム*2", "members": [], "pages": [{
            "conditions": {"turnValid": true, "turnA": 1},
            "span": 0,
            "list": [
                cmd(101, 0, json!(["", 0, 0, 2])),
                cmd(401, 0, json!(["スライムがあらわれた！"])),
                cmd(108, 0, json!(["Live2D メモ"])),
                cmd(0, 0, json!([]))
            ]
        }]}
    ])
    .to_string();
    let current = parse_content(ContentKind::Troops, "Troops.json", &text).unwrap();
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, None, &test_ctx.ctx());

    assert!(out.texts.is_empty());
    assert!(out.attributes.get("スライムがあらわれた！").is_some());
    assert_eq!(out.attributes.get("Live2D メモ").unwrap().context, "comment");
}

/// Common events produce dialogue text units
#[test]
fn test_reconcile_commonEvents_shouldExtractDialogue() {
    let text = json!([
        null,
        {"id": 1, "name": "宿屋", "trigger": 0, "switchId": 1, "list": [
            cmd(101, 0, json!(["", 0, 0, 2, "宿の主人"])),
            cmd(401, 0, json!(["一泊10Gです。"])),
            cmd(102, 0, json!([["泊まる", "やめる"], 1, 0, 2, 0])),
            cmd(0, 0, json!([]))
        ]}
    ])
    .to_string();
    let current = parse_content(ContentKind::CommonEvents, "CommonEvents.json", &text).unwrap();
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, None, &test_ctx.ctx());

    assert_eq!(out.texts, vec![TextUnit::new("一泊10Gです。", "", "宿の主人")]);
    let choices: Vec<&str> = out.attributes.iter().map(|(k, _)| k).collect();
    assert_eq!(choices, vec!["泊まる", "やめる"]);
}

/// System terms appear only with rare codes enabled
#[test]
fn test_reconcile_system_shouldGateTermsOnRareCodes() {
    let text = json!({
        "gameTitle": "勇者の旅",
        "elements": ["", "炎", "氷"],
        "terms": {"basic": ["レベル"], "commands": ["戦う"], "params": ["最大HP"], "messages": {"escapeStart": "%1は逃げ出した！"}}
    })
    .to_string();
    let current = parse_content(ContentKind::System, "System.json", &text).unwrap();

    let default_ctx = TestContext::japanese();
    let out = reconcile(&current, None, &default_ctx.ctx());
    assert_eq!(out.attributes.len(), 3);

    let rare_ctx = TestContext::with_options(ExtractOptions {
        skip_rare: false,
        ..ExtractOptions::default()
    });
    let out = reconcile(&current, None, &rare_ctx.ctx());
    assert_eq!(out.attributes.len(), 7);
    assert_eq!(out.attributes.get("%1は逃げ出した！").unwrap().context, "escapeStart");
}

/// A malformed command is skipped without losing its neighbours
#[test]
fn test_reconcile_malformedCommand_shouldSkipOnlyThatCommand() {
    let list = vec![
        cmd(401, 0, json!(["一行目"])),
        json!({"code": "broken", "parameters": 5}),
        cmd(401, 0, json!(["二行目"])),
    ];
    let text = map_json("", vec![event(1, "EV001", vec![page(None, 0, list)])]);
    let current = common::parse_map(&text);
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, None, &test_ctx.ctx());

    let sources: Vec<&str> = out.texts.iter().map(|t| t.source.as_str()).collect();
    assert_eq!(sources, vec!["一行目", "二行目"]);
}

/// A malformed event is loaded as an empty slot
#[test]
fn test_parseContent_malformedEvent_shouldKeepOtherEvents() {
    let text = json!({
        "displayName": "",
        "events": [null, {"id": "one", "pages": 3}, {"id": 2, "name": "EV002", "pages": []}]
    })
    .to_string();

    let current = common::parse_map(&text);

    match current {
        carryover::ContentFile::Map(map) => {
            assert_eq!(map.events.len(), 3);
            assert!(map.events[1].is_none());
            assert_eq!(map.events[2].as_ref().unwrap().id, 2);
        }
        other => panic!("expected a map, got {:?}", other),
    }
}

/// Invalid JSON is reported as unparseable
#[test]
fn test_parseContent_invalidJson_shouldReportUnparseable() {
    let result = parse_content(ContentKind::Map, "Map002.json", "{not json");
    assert!(matches!(result, Err(ContentError::Unparseable { .. })));
}

/// File names decide the content kind
#[test]
fn test_contentKind_fromFileName_shouldClassify() {
    assert_eq!(ContentKind::from_file_name("Map012.json"), ContentKind::Map);
    assert_eq!(ContentKind::from_file_name("Weapons.json"), ContentKind::Database);
    assert_eq!(ContentKind::from_file_name("CommonEvents.json"), ContentKind::CommonEvents);
    assert_eq!(ContentKind::from_file_name("MapInfos.json"), ContentKind::Unsupported);
    assert_eq!(ContentKind::from_file_name("Tilesets.json"), ContentKind::Unsupported);
}
