//! Transforms between wire slots (`"YYYY-MM-DD HH:mm-HH:mm"`) and the date-grouped form used
//! by selection views.
//!
//! Parsing is tolerant: an entry without exactly one space is dropped (and logged at `debug`),
//! never reported. Wire strings sort chronologically as plain strings because dates and times
//! are zero-padded, so ordering is done on the strings themselves.

use resbook_domain::constants::EMPTY_PLACEHOLDER;
use resbook_domain::slot::split_wire;
use resbook_domain::{Slot, SlotGroup};
use std::collections::BTreeSet;
use tracing::debug;

/// Groups wire slots by date, keeping input order within each date.
pub fn group<S: AsRef<str>>(slots: &[S]) -> SlotGroup {
    let mut group = SlotGroup::new();
    for raw in slots.iter().map(AsRef::as_ref) {
        match split_wire(raw) {
            Some((date, time)) => group.push(date, time),
            None => debug!(slot = raw, "Dropping malformed time slot"),
        }
    }
    group
}

/// Rebuilds sorted wire slots from a group.
#[must_use]
pub fn flatten(group: &SlotGroup) -> Vec<String> {
    let mut wire: Vec<String> = group
        .iter()
        .flat_map(|(date, slots)| slots.iter().map(move |slot| wire_slot(date, slot)))
        .collect();
    wire.sort_unstable();
    wire
}

fn wire_slot(date: &str, slot: &Slot) -> String {
    format!("{date} {}", slot.display())
}

/// Distinct dates of the well-formed slots, ascending.
pub fn extract_dates<S: AsRef<str>>(slots: &[S]) -> BTreeSet<&str> {
    slots.iter().filter_map(|raw| split_wire(raw.as_ref())).map(|(date, _)| date).collect()
}

/// One line per date, `"<date>: <t1>、<t2>"`, for order details.
///
/// Returns `"-"` for an empty list.
pub fn format_for_display<S: AsRef<str>>(slots: &[S]) -> String {
    if slots.is_empty() {
        return EMPTY_PLACEHOLDER.to_owned();
    }

    group(slots)
        .iter()
        .map(|(date, times)| {
            let times: Vec<&str> = times.iter().map(Slot::display).collect();
            format!("{date}: {}", times.join("、"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Confirmation text: a block per date (date line, then each slot indented by two spaces),
/// blocks separated by a blank line, followed by a `"共 <d> 天，<n> 个时间段"` summary.
///
/// Returns an empty string for an empty group.
#[must_use]
pub fn format_for_confirm(group: &SlotGroup) -> String {
    if group.is_empty() {
        return String::new();
    }

    let blocks: Vec<String> = group
        .iter()
        .map(|(date, slots)| {
            let mut block = date.to_owned();
            for slot in slots {
                block.push_str("\n  ");
                block.push_str(slot.display());
            }
            block
        })
        .collect();

    format!("{}\n\n共 {} 天，{} 个时间段", blocks.join("\n\n"), group.len(), group.slot_count())
}

/// Short date summary for order lists: `"-"`, the sole date, or `"<first> 等<N>天"`.
pub fn date_range_text<S: AsRef<str>>(slots: &[S]) -> String {
    let dates = extract_dates(slots);
    let mut iter = dates.iter();
    match (iter.next(), dates.len()) {
        (None, _) => EMPTY_PLACEHOLDER.to_owned(),
        (Some(only), 1) => (*only).to_owned(),
        (Some(first), n) => format!("{first} 等{n}天"),
    }
}

/// Date of the first slot as given (not the earliest), or `"-"`.
pub fn first_date<S: AsRef<str>>(slots: &[S]) -> &str {
    slots
        .first()
        .and_then(|raw| split_wire(raw.as_ref()))
        .map_or(EMPTY_PLACEHOLDER, |(date, _)| date)
}
