/*!
 * Data model for RPG Maker MV/MZ content files.
 *
 * Only the fields the extractor and the aligner look at are modelled.
 * Collections keep their null slots by position, and a node that fails to
 * deserialize is loaded as an empty slot instead of failing the whole file.
 */

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single event command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Opcode
    #[serde(default)]
    pub code: i64,

    /// Nesting depth inside the command list
    #[serde(default)]
    pub indent: i64,

    /// Opcode-specific parameters
    #[serde(default)]
    pub parameters: Vec<Value>,
}

impl Command {
    /// Create a command from its parts
    pub fn new(code: i64, indent: i64, parameters: Vec<Value>) -> Self {
        Self { code, indent, parameters }
    }

    /// String parameter at `index`, if present and a string
    pub fn str_param(&self, index: usize) -> Option<&str> {
        self.parameters.get(index).and_then(Value::as_str)
    }

    /// Integer parameter at `index`, if present and an integer
    pub fn int_param(&self, index: usize) -> Option<i64> {
        self.parameters.get(index).and_then(Value::as_i64)
    }
}

/// Sprite shown for an event page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageImage {
    #[serde(default)]
    pub character_name: String,

    #[serde(default)]
    pub character_index: i64,
}

/// One page of a map event or troop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Activation conditions, kept opaque
    #[serde(default)]
    pub conditions: Value,

    /// Sprite, absent on troop pages
    #[serde(default)]
    pub image: Option<PageImage>,

    /// Command list
    #[serde(default, deserialize_with = "lenient_commands")]
    pub list: Vec<Command>,
}

/// A map event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub note: String,

    #[serde(default, deserialize_with = "lenient_slots")]
    pub pages: Vec<Option<Page>>,
}

/// A common event, treated as an event with exactly one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonEvent {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub trigger: i64,

    #[serde(default)]
    pub switch_id: i64,

    #[serde(default, deserialize_with = "lenient_commands")]
    pub list: Vec<Command>,
}

/// A troop with its battle event pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Troop {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_slots")]
    pub pages: Vec<Option<Page>>,
}

/// A map file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub note: String,

    #[serde(default, deserialize_with = "lenient_slots")]
    pub events: Vec<Option<Event>>,
}

/// A database record (actor, item, skill, ...), kept as a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(pub Map<String, Value>);

impl Entity {
    /// Structural identity
    pub fn id(&self) -> i64 {
        self.0.get("id").and_then(Value::as_i64).unwrap_or_default()
    }

    /// String field, empty when absent or not a string
    pub fn text(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or_default()
    }
}

/// Terms block of System.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Terms {
    #[serde(default)]
    pub basic: Vec<Value>,

    #[serde(default)]
    pub commands: Vec<Value>,

    #[serde(default)]
    pub params: Vec<Value>,

    #[serde(default)]
    pub messages: Map<String, Value>,
}

/// System.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(default)]
    pub game_title: String,

    #[serde(default)]
    pub armor_types: Vec<Value>,

    #[serde(default)]
    pub elements: Vec<Value>,

    #[serde(default)]
    pub equip_types: Vec<Value>,

    #[serde(default)]
    pub skill_types: Vec<Value>,

    #[serde(default)]
    pub weapon_types: Vec<Value>,

    #[serde(default)]
    pub terms: Terms,
}

impl SystemData {
    /// Named term arrays in extraction order
    pub fn type_arrays(&self) -> [(&'static str, &[Value]); 5] {
        [
            ("armorTypes", &self.armor_types),
            ("elements", &self.elements),
            ("equipTypes", &self.equip_types),
            ("skillTypes", &self.skill_types),
            ("weaponTypes", &self.weapon_types),
        ]
    }
}

/// A parsed content file
#[derive(Debug, Clone, PartialEq)]
pub enum ContentFile {
    /// Database collection (Actors, Items, ...)
    Database(Vec<Option<Entity>>),
    System(SystemData),
    Troops(Vec<Option<Troop>>),
    CommonEvents(Vec<Option<CommonEvent>>),
    Map(MapData),
}

/// Deserialize an array keeping null and malformed elements as `None`
pub(crate) fn lenient_slots<'de, D, T>(deserializer: D) -> Result<Vec<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(slot, value)| slot_from_value(slot, value))
        .collect())
}

/// Deserialize a command list, replacing malformed commands with a no-op
fn lenient_commands<'de, D>(deserializer: D) -> Result<Vec<Command>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(slot, value)| slot_from_value(slot, value).unwrap_or_default())
        .collect())
}

pub(crate) fn slot_from_value<T: DeserializeOwned>(slot: usize, value: Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(node) => Some(node),
        Err(e) => {
            debug!("Skipping malformed node at slot {}: {}", slot, e);
            None
        }
    }
}
