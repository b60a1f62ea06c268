use anyhow::{Context, Result, anyhow};
use chrono::Local;
use resbook::booking::period::ReservationPeriod;
use resbook::booking::{AdvanceDays, ResourceKind};
use resbook::domain::config::ClientConfig;
use resbook::domain::slot::parse_date;
use resbook::kernel::config::load_config;
use std::path::Path;

pub(crate) fn describe(start: &str, end: Option<&str>) -> Result<()> {
    let period = ReservationPeriod::parse(start, end)?;
    println!("{period}");
    println!("{}", period.describe());
    Ok(())
}

/// Window from the configured advance days; the server is not consulted.
pub(crate) fn window(config: Option<&Path>, kind: ResourceKind, today: Option<&str>) -> Result<()> {
    let config: ClientConfig = load_config(config).context("Loading client config")?;
    let today = match today {
        Some(raw) => parse_date(raw).ok_or_else(|| anyhow!("'{raw}' is not a YYYY-MM-DD date"))?,
        None => Local::now().date_naive(),
    };

    let advance = AdvanceDays::from(&config.booking);
    let window = advance.window(kind, today);
    println!("{kind}: {window}");
    Ok(())
}
