use crate::args::SlotAction;
use anyhow::{Context, Result};
use resbook::booking::codec;
use resbook::domain::SlotGroup;

pub(crate) fn run(action: SlotAction) -> Result<()> {
    match action {
        SlotAction::Group { slots } => {
            let group = codec::group(&slots);
            println!("{}", serde_json::to_string_pretty(&group)?);
        },
        SlotAction::Flatten { json } => {
            let group: SlotGroup =
                serde_json::from_str(&json).context("Expected a JSON object of date -> slots")?;
            for slot in codec::flatten(&group) {
                println!("{slot}");
            }
        },
        SlotAction::Dates { slots } => {
            for date in codec::extract_dates(&slots) {
                println!("{date}");
            }
        },
        SlotAction::Display { slots } => println!("{}", codec::format_for_display(&slots)),
        SlotAction::Confirm { slots } => {
            println!("{}", codec::format_for_confirm(&codec::group(&slots)));
        },
        SlotAction::Range { slots } => println!("{}", codec::date_range_text(&slots)),
        SlotAction::First { slots } => println!("{}", codec::first_date(&slots)),
    }
    Ok(())
}
