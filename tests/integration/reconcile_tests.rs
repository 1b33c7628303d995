/*!
 * Structural carry-forward of translations across re-extractions
 */

use serde_json::{Value, json};

use carryover::content::{ContentKind, parse_content};
use carryover::extraction::TextUnit;
use carryover::reconcile::reconcile;
use crate::common::{self, TestContext, cmd, dialogue, event, map_json, page};

/// Two-event village map; `texts` supplies the four dialogue lines
fn village(texts: [&str; 4]) -> String {
    map_json(
        "",
        vec![
            event(1, "EV001", vec![page(None, 0, dialogue(1, &[texts[0], texts[1]]))]),
            event(2, "EV002", vec![page(None, 2, dialogue(0, &[texts[2]])), page(Some("A"), 2, dialogue(0, &[texts[3]]))]),
        ],
    )
}

fn translations(units: &[TextUnit]) -> Vec<&str> {
    units.iter().map(|u| u.translation.as_str()).collect()
}

/// An unchanged game carries every translation
#[test]
fn test_reconcile_identicalStructure_shouldCarryEverything() {
    common::init_logger();
    let current = common::parse_map(&village(["おはよう", "いい天気だ", "村へようこそ", "また来てね"]));
    let prior = common::parse_map(&village(["Morning", "Nice weather", "Welcome to the village", "Come again"]));
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, Some(&prior), &test_ctx.ctx());

    assert_eq!(
        out.texts,
        vec![
            TextUnit::new("おはよう", "Morning", "ハロルド"),
            TextUnit::new("いい天気だ", "Nice weather", "ハロルド"),
            TextUnit::new("村へようこそ", "Welcome to the village", ""),
            TextUnit::new("また来てね", "Come again", ""),
        ]
    );
}

/// A dialogue inserted between two others stays blank, its neighbours carry
#[test]
fn test_reconcile_insertedDialogue_shouldKeepNeighbours() {
    let mut current_list = dialogue(0, &["最初の台詞"]);
    current_list.extend(dialogue(1, &["新しい台詞"]));
    current_list.extend(dialogue(0, &["最後の台詞"]));
    let mut prior_list = dialogue(0, &["First line"]);
    prior_list.extend(dialogue(0, &["Last line"]));

    let current = common::parse_map(&map_json("", vec![event(1, "EV001", vec![page(None, 0, current_list)])]));
    let prior = common::parse_map(&map_json("", vec![event(1, "EV001", vec![page(None, 0, prior_list)])]));
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, Some(&prior), &test_ctx.ctx());

    assert_eq!(translations(&out.texts), vec!["First line", "", "Last line"]);
}

/// A new event between existing ones is extracted cold
#[test]
fn test_reconcile_insertedEvent_shouldStayBlank() {
    let current = common::parse_map(&map_json(
        "",
        vec![
            event(1, "EV001", vec![page(None, 0, dialogue(0, &["一番目"]))]),
            event(2, "EV002", vec![page(None, 0, dialogue(0, &["新入り"]))]),
            event(3, "EV003", vec![page(None, 0, dialogue(0, &["三番目"]))]),
        ],
    ));
    let prior = common::parse_map(&map_json(
        "",
        vec![
            event(1, "EV001", vec![page(None, 0, dialogue(0, &["First"]))]),
            Value::Null,
            event(3, "EV003", vec![page(None, 0, dialogue(0, &["Third"]))]),
        ],
    ));
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, Some(&prior), &test_ctx.ctx());

    assert_eq!(translations(&out.texts), vec!["First", "", "Third"]);
}

/// Swapped pages are recovered by their conditions
#[test]
fn test_reconcile_swappedPages_shouldFollowConditions() {
    let current = common::parse_map(&map_json(
        "",
        vec![event(
            1,
            "EV001",
            vec![page(Some("A"), 0, dialogue(0, &["終わったよ"])), page(None, 0, dialogue(0, &["頼みがある"]))],
        )],
    ));
    let prior = common::parse_map(&map_json(
        "",
        vec![event(
            1,
            "EV001",
            vec![page(None, 0, dialogue(0, &["I need a favour"])), page(Some("A"), 0, dialogue(0, &["It's done"]))],
        )],
    ));
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, Some(&prior), &test_ctx.ctx());

    assert_eq!(translations(&out.texts), vec!["It's done", "I need a favour"]);
}

/// Events present only in the prior tree contribute nothing
#[test]
fn test_reconcile_deletedEvent_shouldBeDropped() {
    let current = common::parse_map(&map_json(
        "",
        vec![Value::Null, event(2, "EV002", vec![page(None, 0, dialogue(0, &["残った"]))])],
    ));
    let prior = common::parse_map(&map_json(
        "",
        vec![
            event(1, "EV001", vec![page(None, 0, dialogue(0, &["Removed"]))]),
            event(2, "EV002", vec![page(None, 0, dialogue(0, &["Stayed"]))]),
        ],
    ));
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, Some(&prior), &test_ctx.ctx());

    assert_eq!(out.texts, vec![TextUnit::new("残った", "Stayed", "")]);
}

/// An edited line in an unchanged structure keeps the old translation
#[test]
fn test_reconcile_editedLine_shouldCarryOldTranslation() {
    let current = common::parse_map(&village(["おはよう！", "いい天気だ", "村へようこそ", "また来てね"]));
    let prior = common::parse_map(&village(["Morning", "Nice weather", "Welcome to the village", "Come again"]));
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, Some(&prior), &test_ctx.ctx());

    assert_eq!(out.texts[0], TextUnit::new("おはよう！", "Morning", "ハロルド"));
}

/// The map display name carries as an attribute
#[test]
fn test_reconcile_mapDisplayName_shouldCarry() {
    let current = common::parse_map(&map_json("はじまりの村", vec![]));
    let prior = common::parse_map(&map_json("Starting Village", vec![]));
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, Some(&prior), &test_ctx.ctx());

    assert_eq!(out.attributes.get("はじまりの村").unwrap().translation, "Starting Village");
}

/// Database records pair by id, so a new record does not shift the rest
#[test]
fn test_reconcile_databaseRecords_shouldPairById() {
    let current = json!([
        null,
        {"id": 1, "name": "ポーション", "description": ""},
        {"id": 3, "name": "新薬", "description": ""},
        {"id": 2, "name": "エーテル", "description": ""}
    ])
    .to_string();
    let prior = json!([
        null,
        {"id": 1, "name": "Potion", "description": ""},
        {"id": 2, "name": "Ether", "description": ""}
    ])
    .to_string();
    let current = parse_content(ContentKind::Database, "Items.json", &current).unwrap();
    let prior = parse_content(ContentKind::Database, "Items.json", &prior).unwrap();
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, Some(&prior), &test_ctx.ctx());

    assert_eq!(out.attributes.get("ポーション").unwrap().translation, "Potion");
    assert_eq!(out.attributes.get("エーテル").unwrap().translation, "Ether");
    assert_eq!(out.attributes.get("新薬").unwrap().translation, "");
}

/// System arrays pair by index
#[test]
fn test_reconcile_systemElements_shouldPairByIndex() {
    let current = json!({"gameTitle": "勇者の旅", "elements": ["", "炎", "氷"]}).to_string();
    let prior = json!({"gameTitle": "Hero's Journey", "elements": ["", "Fire", "Ice"]}).to_string();
    let current = parse_content(ContentKind::System, "System.json", &current).unwrap();
    let prior = parse_content(ContentKind::System, "System.json", &prior).unwrap();
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, Some(&prior), &test_ctx.ctx());

    assert_eq!(out.attributes.get("勇者の旅").unwrap().translation, "Hero's Journey");
    assert_eq!(out.attributes.get("炎").unwrap().translation, "Fire");
    assert_eq!(out.attributes.get("氷").unwrap().translation, "Ice");
}

/// Troop dialogue carries into the attribute map
#[test]
fn test_reconcile_troopDialogue_shouldCarryAsAttribute() {
    let troop = |line: &str| {
        json!([
            null,
            {"id": 1, "name": "Slime*2", "members": [], "pages": [{
                "conditions": {"turnValid": true, "turnA": 1},
                "span": 0,
                "list": [cmd(101, 0, json!(["", 0, 0, 2])), cmd(401, 0, json!([line])), cmd(0, 0, json!([]))]
            }]}
        ])
        .to_string()
    };
    let current = parse_content(ContentKind::Troops, "Troops.json", &troop("スライムがあらわれた！")).unwrap();
    let prior = parse_content(ContentKind::Troops, "Troops.json", &troop("Slimes appeared!")).unwrap();
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, Some(&prior), &test_ctx.ctx());

    assert!(out.texts.is_empty());
    assert_eq!(out.attributes.get("スライムがあらわれた！").unwrap().translation, "Slimes appeared!");
}

/// A prior tree of another kind is ignored
#[test]
fn test_reconcile_mismatchedPriorKind_shouldExtractCold() {
    let current = common::parse_map(&village(["おはよう", "いい天気だ", "村へようこそ", "また来てね"]));
    let prior = parse_content(ContentKind::Database, "Items.json", "[null]").unwrap();
    let test_ctx = TestContext::japanese();

    let out = reconcile(&current, Some(&prior), &test_ctx.ctx());

    assert!(out.texts.iter().all(TextUnit::is_blank));
    assert_eq!(out.texts.len(), 4);
}
