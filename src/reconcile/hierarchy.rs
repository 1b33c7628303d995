/*!
 * Hierarchical reconciliation of a current content tree against the prior
 * translated tree.
 *
 * Each level (records, events, pages, command blocks) is projected to
 * signatures and aligned. Paired nodes recurse with their counterpart,
 * unpaired current nodes are extracted cold, and prior-only nodes are
 * dropped.
 */

use log::debug;

use crate::alignment::sequence::{EditTag, align};
use crate::alignment::signature::{
    block_signature, common_event_signature, entity_signature, event_signature, page_signature, troop_signature,
};
use crate::content::blocks::group_blocks;
use crate::content::model::{Command, CommonEvent, ContentFile, Entity, Event, MapData, Page, Troop};
use crate::extraction::commands::{Counterpart, extract_command_list};
use crate::extraction::options::ExtractContext;
use crate::extraction::records::{extract_entity, extract_event_note, extract_map_header, extract_system};
use crate::extraction::units::Extraction;

/// Pair current nodes with prior nodes
///
/// Equal runs of the edit script pair first. Unpaired current nodes then
/// take the first unused prior node with an identical signature, which
/// recovers moved and swapped nodes. Whatever is left inside `Replace`
/// runs pairs positionally.
pub fn pair_nodes<S: PartialEq>(current: &[S], prior: &[S]) -> Vec<Option<usize>> {
    if prior.is_empty() {
        return vec![None; current.len()];
    }

    let script = align(current, prior);
    let mut pairs = script.equal_pairs();
    let mut used = vec![false; prior.len()];
    for &j in pairs.iter().flatten() {
        used[j] = true;
    }

    for (i, slot) in pairs.iter_mut().enumerate() {
        if slot.is_some() {
            continue;
        }
        if let Some(j) = (0..prior.len()).find(|&j| !used[j] && prior[j] == current[i]) {
            used[j] = true;
            *slot = Some(j);
        }
    }

    for op in script.ops().iter().filter(|op| op.tag == EditTag::Replace) {
        for (i, j) in op.source.clone().zip(op.target.clone()) {
            if pairs[i].is_none() && !used[j] {
                used[j] = true;
                pairs[i] = Some(j);
            }
        }
    }

    pairs
}

/// Reconcile one content file
pub fn reconcile(current: &ContentFile, prior: Option<&ContentFile>, ctx: &ExtractContext) -> Extraction {
    match current {
        ContentFile::Database(items) => {
            let prior_items = match prior {
                Some(ContentFile::Database(p)) => p.as_slice(),
                _ => &[],
            };
            reconcile_slots(items, prior_items, entity_signature, |entity, counterpart| {
                extract_entity(entity, counterpart, ctx)
            })
        }
        ContentFile::System(system) => {
            let prior_system = match prior {
                Some(ContentFile::System(p)) => Some(p),
                _ => None,
            };
            extract_system(system, prior_system, ctx)
        }
        ContentFile::Troops(troops) => {
            let prior_troops = match prior {
                Some(ContentFile::Troops(p)) => p.as_slice(),
                _ => &[],
            };
            let options = ctx.options.for_troops();
            let troop_ctx = ExtractContext { options: &options, ..*ctx };
            reconcile_troops(troops, prior_troops, &troop_ctx).into_attributes_only()
        }
        ContentFile::CommonEvents(events) => {
            let prior_events = match prior {
                Some(ContentFile::CommonEvents(p)) => p.as_slice(),
                _ => &[],
            };
            reconcile_common_events(events, prior_events, ctx)
        }
        ContentFile::Map(map) => {
            let prior_map = match prior {
                Some(ContentFile::Map(p)) => Some(p),
                _ => None,
            };
            reconcile_map(map, prior_map, ctx)
        }
    }
}

pub fn reconcile_map(current: &MapData, prior: Option<&MapData>, ctx: &ExtractContext) -> Extraction {
    let mut out = extract_map_header(current, prior, ctx);
    let prior_events = prior.map(|p| p.events.as_slice()).unwrap_or_default();
    out.append(reconcile_events(&current.events, prior_events, ctx));
    out
}

pub fn reconcile_events(current: &[Option<Event>], prior: &[Option<Event>], ctx: &ExtractContext) -> Extraction {
    reconcile_slots(current, prior, event_signature, |event, counterpart| {
        let mut out = extract_event_note(event, counterpart, ctx);
        let prior_pages = counterpart.map(|c| c.pages.as_slice()).unwrap_or_default();
        out.append(reconcile_pages(&event.pages, prior_pages, ctx));
        out
    })
}

pub fn reconcile_common_events(
    current: &[Option<CommonEvent>],
    prior: &[Option<CommonEvent>],
    ctx: &ExtractContext,
) -> Extraction {
    reconcile_slots(current, prior, common_event_signature, |event, counterpart| {
        reconcile_commands(&event.list, counterpart.map(|c| c.list.as_slice()), ctx)
    })
}

pub fn reconcile_troops(current: &[Option<Troop>], prior: &[Option<Troop>], ctx: &ExtractContext) -> Extraction {
    reconcile_slots(current, prior, troop_signature, |troop, counterpart| {
        let prior_pages = counterpart.map(|c| c.pages.as_slice()).unwrap_or_default();
        reconcile_pages(&troop.pages, prior_pages, ctx)
    })
}

pub fn reconcile_pages(current: &[Option<Page>], prior: &[Option<Page>], ctx: &ExtractContext) -> Extraction {
    reconcile_slots(current, prior, page_signature, |page, counterpart| {
        reconcile_commands(&page.list, counterpart.map(|c| c.list.as_slice()), ctx)
    })
}

/// Align command blocks in order and extract with the paired blocks
pub fn reconcile_commands(current: &[Command], prior: Option<&[Command]>, ctx: &ExtractContext) -> Extraction {
    let blocks = group_blocks(current);
    let Some(prior_list) = prior.filter(|p| !p.is_empty()) else {
        return extract_command_list(current, &blocks, None, ctx);
    };

    let prior_blocks = group_blocks(prior_list);
    let current_signatures: Vec<_> = blocks.iter().map(|b| block_signature(current, b)).collect();
    let prior_signatures: Vec<_> = prior_blocks.iter().map(|b| block_signature(prior_list, b)).collect();
    let pairing = align(&current_signatures, &prior_signatures).pairs();

    let counterpart = Counterpart {
        list: prior_list,
        blocks: &prior_blocks,
        pairing: &pairing,
    };
    extract_command_list(current, &blocks, Some(&counterpart), ctx)
}

/// Pair a slot collection by signature and extract every present node
fn reconcile_slots<T, S, P, V>(current: &[Option<T>], prior: &[Option<T>], project: P, mut visit: V) -> Extraction
where
    S: PartialEq,
    P: Fn(&T) -> S,
    V: FnMut(&T, Option<&T>) -> Extraction,
{
    let current_signatures: Vec<Option<S>> = current.iter().map(|n| n.as_ref().map(&project)).collect();
    let prior_signatures: Vec<Option<S>> = prior.iter().map(|n| n.as_ref().map(&project)).collect();
    let pairs = pair_nodes(&current_signatures, &prior_signatures);

    let paired = pairs.iter().filter(|p| p.is_some()).count();
    if !prior.is_empty() {
        debug!(
            "Paired {} of {} nodes against {} prior nodes",
            paired,
            current.len(),
            prior.len()
        );
    }

    let mut out = Extraction::new();
    for (node, pair) in current.iter().zip(pairs) {
        let Some(node) = node else {
            continue;
        };
        let counterpart = pair.and_then(|j| prior.get(j)).and_then(Option::as_ref);
        out.append(visit(node, counterpart));
    }
    out
}
