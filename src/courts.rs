use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::out;
use crate::scrape::sites;
use crate::telemetry::{self};
use crate::telemetry::ops::courts::Phase as CourtsPhase;
use crate::util;

/// opinions courts ls/url
#[derive(Args)]
pub struct CourtsCmd {
    #[command(subcommand)]
    pub cmd: CourtsSub,
}

#[derive(Subcommand)]
pub enum CourtsSub {
    // list registered courts
    Ls,
    // show the computed decision-list URL for a court
    Url {
        id: String,
        /// Crawl date override, YYYY-MM-DD; defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Serialize)]
pub struct CourtRow { pub id: &'static str, pub name: &'static str, pub url: String }

#[derive(Serialize)]
pub struct CourtList { pub courts: Vec<CourtRow> }

#[derive(Serialize)]
pub struct CourtUrl { pub id: &'static str, pub date: chrono::NaiveDate, pub url: String }

pub fn run(args: CourtsCmd) -> Result<()> {
    let log = telemetry::courts();
    let _g = log.root_span().entered();
    match args.cmd {
        CourtsSub::Ls => ls_courts(),
        CourtsSub::Url { id, date } => show_url(id, date),
    }
}

fn ls_courts() -> Result<()> {
    let log = telemetry::courts();
    let _s = log.span(&CourtsPhase::List).entered();
    let today = util::time::resolve_crawl_date(&None)?;
    let courts: Vec<CourtRow> = sites::all()
        .iter()
        .map(|s| CourtRow { id: s.id(), name: s.name(), url: s.source_url(today) })
        .collect();
    // Always log listing
    log.info("🏛️ Courts:");
    for row in &courts {
        log.info(format!("[{}] {} — {}", row.id, row.name, row.url));
    }
    // Emit structured list when in JSON mode (stdout)
    if out::json_mode() {
        let list = CourtList { courts };
        log.result(&list)?;
    }
    Ok(())
}

fn show_url(id: String, date: Option<String>) -> Result<()> {
    let log = telemetry::courts();
    let _s = log.span_kv(&CourtsPhase::Url, [
        ("id", id.clone()),
        ("date", format!("{:?}", date)),
    ]).entered();

    let Some(site) = sites::by_id(&id) else { bail!("Unknown court id: {}", id) };
    let crawl_date = util::time::resolve_crawl_date(&date)?;
    let url = site.source_url(crawl_date);

    log.info(format!("{} {}", site.id(), url));
    if out::json_mode() {
        let result = CourtUrl { id: site.id(), date: crawl_date, url };
        log.result(&result)?;
    }
    Ok(())
}
