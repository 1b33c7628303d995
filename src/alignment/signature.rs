/*!
 * Signature projections used to decide node correspondence.
 *
 * Each level of the content tree projects its nodes to a coarse key that
 * ignores translatable text. Two nodes correspond when their keys are
 * equal; the keys are never compared any other way.
 */

use serde_json::Value;

use crate::content::blocks::{
    Block, CHANGE_NAME, CHANGE_NICKNAME, CHANGE_PROFILE, CONDITIONAL_BRANCH, CONTROL_VARIABLES,
    PLUGIN_COMMAND, PLUGIN_COMMAND_MZ, SHOW_CHOICES, SHOW_TEXT, WHEN_CHOICE,
};
use crate::content::model::{Command, CommonEvent, Entity, Event, Page, Troop};

/// Identity of a database record or troop
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordSignature(pub i64);

/// First enabled activation condition of a page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionKey {
    Switch(i64),
    Variable(i64, i64),
    SelfSwitch(String),
    Item(i64),
    Actor(i64),
    /// Common event trigger and switch
    Trigger(i64, i64),
    Unconditional,
}

/// Identity of a map event or common event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventSignature {
    pub name: String,
    pub id: i64,
    pub conditions: Vec<ConditionKey>,
}

/// Identity of an event page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageSignature {
    pub conditions: String,
    pub character_name: String,
    pub character_index: i64,
}

/// Identity of a command block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockSignature {
    pub code: i64,
    pub indent: i64,
    pub params: String,
}

pub fn entity_signature(entity: &Entity) -> RecordSignature {
    RecordSignature(entity.id())
}

pub fn troop_signature(troop: &Troop) -> RecordSignature {
    RecordSignature(troop.id)
}

pub fn event_signature(event: &Event) -> EventSignature {
    EventSignature {
        name: event.name.clone(),
        id: event.id,
        conditions: event
            .pages
            .iter()
            .map(|page| page.as_ref().map_or(ConditionKey::Unconditional, |p| primary_condition(&p.conditions)))
            .collect(),
    }
}

pub fn common_event_signature(event: &CommonEvent) -> EventSignature {
    EventSignature {
        name: event.name.clone(),
        id: event.id,
        conditions: vec![ConditionKey::Trigger(event.trigger, event.switch_id)],
    }
}

pub fn page_signature(page: &Page) -> PageSignature {
    let (character_name, character_index) = page
        .image
        .as_ref()
        .map(|image| (image.character_name.clone(), image.character_index))
        .unwrap_or_default();

    PageSignature {
        conditions: page.conditions.to_string(),
        character_name,
        character_index,
    }
}

/// Signature of a block; text runs project to opcode and indent only
pub fn block_signature(list: &[Command], block: &Block) -> BlockSignature {
    let head = block.head(list);
    let params = if block.kind.is_text_run() {
        String::new()
    } else {
        structural_params(head)
    };

    BlockSignature {
        code: head.code,
        indent: head.indent,
        params,
    }
}

/// The first enabled condition in switch, variable, self switch, item,
/// actor order
pub fn primary_condition(conditions: &Value) -> ConditionKey {
    let flag = |key: &str| conditions.get(key).and_then(Value::as_bool).unwrap_or(false);
    let int = |key: &str| conditions.get(key).and_then(Value::as_i64).unwrap_or_default();

    if flag("switch1Valid") {
        ConditionKey::Switch(int("switch1Id"))
    } else if flag("switch2Valid") {
        ConditionKey::Switch(int("switch2Id"))
    } else if flag("variableValid") {
        ConditionKey::Variable(int("variableId"), int("variableValue"))
    } else if flag("selfSwitchValid") {
        let channel = conditions.get("selfSwitchCh").and_then(Value::as_str).unwrap_or_default();
        ConditionKey::SelfSwitch(channel.to_string())
    } else if flag("itemValid") {
        ConditionKey::Item(int("itemId"))
    } else if flag("actorValid") {
        ConditionKey::Actor(int("actorId"))
    } else {
        ConditionKey::Unconditional
    }
}

/// Parameters of a single command with the text-bearing ones left out
fn structural_params(command: &Command) -> String {
    let params = &command.parameters;
    let slice = |range: std::ops::Range<usize>| {
        let end = range.end.min(params.len());
        let start = range.start.min(end);
        Value::Array(params[start..end].to_vec()).to_string()
    };

    match command.code {
        SHOW_TEXT => slice(0..4),
        SHOW_CHOICES => slice(1..usize::MAX),
        WHEN_CHOICE => slice(0..1),
        CONTROL_VARIABLES if command.int_param(3) == Some(4) => slice(0..4),
        CONDITIONAL_BRANCH if command.int_param(0) == Some(12) => slice(0..1),
        CHANGE_NAME | CHANGE_NICKNAME | CHANGE_PROFILE => slice(0..1),
        PLUGIN_COMMAND => command
            .str_param(0)
            .and_then(|text| text.split(' ').next())
            .unwrap_or_default()
            .to_string(),
        PLUGIN_COMMAND_MZ => slice(0..2),
        _ => slice(0..params.len()),
    }
}
