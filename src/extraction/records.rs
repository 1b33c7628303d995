/*!
 * Attribute extraction for nodes that are not command lists: database
 * records, System.json, map headers and event notes.
 *
 * Counterparts here are matched by field name, array index or message
 * key, so no alignment is needed below the record itself.
 */

use serde_json::{Map, Value};

use crate::content::model::{Entity, Event, MapData, SystemData};

use super::options::ExtractContext;
use super::predicate::accepts_attribute;
use super::units::Extraction;

/// Translatable fields of a database record, in extraction order
pub const ENTITY_FIELDS: [&str; 9] = [
    "name",
    "nickname",
    "profile",
    "note",
    "description",
    "message1",
    "message2",
    "message3",
    "message4",
];

/// Fields of one database record
pub fn extract_entity(entity: &Entity, counterpart: Option<&Entity>, ctx: &ExtractContext) -> Extraction {
    let mut out = Extraction::new();

    for field in ENTITY_FIELDS {
        let is_note = field == "note";
        if is_note && ctx.options.skip_rare {
            continue;
        }
        let text = entity.text(field);
        if !accepts_attribute(text) {
            continue;
        }
        let context = if is_note {
            format!("note/{}", entity.text("name"))
        } else {
            field.to_string()
        };
        let translation = counterpart.map(|c| c.text(field)).unwrap_or_default();
        out.attributes.insert(text, translation, context);
    }

    out
}

/// Title, type names and (with rare codes enabled) terms of System.json
pub fn extract_system(system: &SystemData, counterpart: Option<&SystemData>, ctx: &ExtractContext) -> Extraction {
    let mut out = Extraction::new();

    if accepts_attribute(&system.game_title) {
        let translation = counterpart.map(|c| c.game_title.as_str()).unwrap_or_default();
        out.attributes.insert(system.game_title.as_str(), translation, "gameTitle");
    }

    let prior_arrays = counterpart.map(SystemData::type_arrays);
    for (slot, (context, values)) in system.type_arrays().into_iter().enumerate() {
        let prior = prior_arrays.as_ref().map(|arrays| arrays[slot].1);
        extract_string_array(&mut out, values, prior, context);
    }

    if ctx.options.skip_rare {
        return out;
    }

    let terms = &system.terms;
    let prior_terms = counterpart.map(|c| &c.terms);
    extract_string_array(&mut out, &terms.basic, prior_terms.map(|t| t.basic.as_slice()), "basic");
    extract_string_array(&mut out, &terms.commands, prior_terms.map(|t| t.commands.as_slice()), "commands");
    extract_string_array(&mut out, &terms.params, prior_terms.map(|t| t.params.as_slice()), "params");
    extract_messages(&mut out, &terms.messages, prior_terms.map(|t| &t.messages));

    out
}

/// Display name and note of a map
pub fn extract_map_header(map: &MapData, counterpart: Option<&MapData>, ctx: &ExtractContext) -> Extraction {
    let mut out = Extraction::new();

    if accepts_attribute(&map.display_name) {
        let translation = counterpart.map(|c| c.display_name.as_str()).unwrap_or_default();
        out.attributes.insert(map.display_name.as_str(), translation, "displayName");
    }
    if !ctx.options.skip_rare && accepts_attribute(&map.note) {
        let translation = counterpart.map(|c| c.note.as_str()).unwrap_or_default();
        out.attributes.insert(map.note.as_str(), translation, "note");
    }

    out
}

/// Note of a map event
pub fn extract_event_note(event: &Event, counterpart: Option<&Event>, ctx: &ExtractContext) -> Extraction {
    let mut out = Extraction::new();
    if !ctx.options.skip_rare && accepts_attribute(&event.note) {
        let translation = counterpart.map(|c| c.note.as_str()).unwrap_or_default();
        out.attributes.insert(event.note.as_str(), translation, format!("note/{}", event.name));
    }
    out
}

fn extract_string_array(out: &mut Extraction, values: &[Value], prior: Option<&[Value]>, context: &str) {
    for (i, value) in values.iter().enumerate() {
        let Some(text) = value.as_str().filter(|t| accepts_attribute(t)) else {
            continue;
        };
        let translation = prior
            .and_then(|p| p.get(i))
            .and_then(Value::as_str)
            .unwrap_or_default();
        out.attributes.insert(text, translation, context);
    }
}

fn extract_messages(out: &mut Extraction, messages: &Map<String, Value>, prior: Option<&Map<String, Value>>) {
    for (key, value) in messages {
        let Some(text) = value.as_str().filter(|t| accepts_attribute(t)) else {
            continue;
        };
        let translation = prior
            .and_then(|p| p.get(key))
            .and_then(Value::as_str)
            .unwrap_or_default();
        out.attributes.insert(text, translation, key.as_str());
    }
}
