use anyhow::{bail, Result};
use clap::Args;
use std::time::Instant;

use crate::out;
use crate::telemetry::{self};
use crate::telemetry::ops::scrape::Phase as ScrapePhase;
use crate::util;

pub mod dates;
mod fetch;
pub mod parse;
pub mod sites;
pub mod types;

use sites::CourtSite;
use types::{CourtCases, CourtSample, CourtSummary, ScrapeApply, ScrapePlan, ScrapeTotals};

#[derive(Args)]
pub struct ScrapeCmd {
    /// Court id (see `opinions courts ls`); omit to scrape all registered courts
    #[arg(long)] pub court: Option<String>,
    /// Crawl date override, YYYY-MM-DD; defaults to today
    #[arg(long)] pub date: Option<String>,
    #[arg(long, default_value_t = false)] pub apply: bool,
    /// Carry rows with missing fields in the JSON result instead of dropping them
    #[arg(long, default_value_t = false)] pub keep_partial: bool,
    #[arg(long, default_value_t = 10)] pub plan_limit: usize,
}

pub async fn run(args: ScrapeCmd) -> Result<()> {
    let log = telemetry::scrape();
    let _g = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("court", format!("{:?}", args.court)),
        ("date", format!("{:?}", args.date)),
        ("keep_partial", args.keep_partial.to_string()),
    ]).entered();

    let crawl_date = util::time::resolve_crawl_date(&args.date)?;

    // resolve courts to scrape
    let courts: Vec<&'static dyn CourtSite> = match args.court.as_deref() {
        Some(id) => match sites::by_id(id) {
            Some(site) => vec![site],
            None => bail!("Unknown court id: {}", id),
        },
        None => sites::all().to_vec(),
    };

    if !args.apply {
        if out::json_mode() {
            let sample_courts: Vec<CourtSample> = courts.iter().take(args.plan_limit)
                .map(|s| CourtSample { court: s.id().to_string(), url: s.source_url(crawl_date) })
                .collect();
            let plan = ScrapePlan { courts: courts.len(), date: crawl_date, sample_courts };
            log.plan(&plan)?;
        } else {
            log.info(format!("📝 Scrape plan — courts={} date={}", courts.len(), crawl_date));
            for s in courts.iter().take(args.plan_limit) { log.info(format!("  {} {}", s.id(), s.source_url(crawl_date))); }
            if courts.len() > args.plan_limit { log.info(format!("  ... ({} more)", courts.len() - args.plan_limit)); }
            log.info("   Use --apply to execute.");
        }
        return Ok(());
    }

    let t0 = Instant::now();
    let client = fetch::build_client()?;

    let mut total_complete = 0usize;
    let mut total_partial = 0usize;
    let mut total_errors = 0usize;

    let mut per_court: Vec<CourtSummary> = Vec::new();
    let mut results: Vec<CourtCases> = Vec::new();

    for site in courts {
        let _court_span = log.span_kv(&ScrapePhase::Court, [("court", site.id().to_string())]).entered();
        let url = site.source_url(crawl_date);

        // fetch the decision-list page; one bad court must not sink the run
        let html = {
            let _s = log.span_kv(&ScrapePhase::FetchPage, [("url", url.clone())]).entered();
            match fetch::fetch_page(&client, &url).await {
                Ok(html) => html,
                Err(e) => {
                    total_errors += 1;
                    log.warn_kv("⚠️ fetch failed", [
                        ("court", site.id().to_string()),
                        ("url", url.clone()),
                        ("error", e.to_string()),
                    ]);
                    per_court.push(CourtSummary { court: site.id().to_string(), rows: 0, complete: 0, partial: 0, errors: 1 });
                    continue;
                }
            }
        };

        let doc = { let _s = log.span(&ScrapePhase::ParsePage).entered(); parse::parse_tolerant(&html) };
        let page = { let _s = log.span(&ScrapePhase::Extract).entered(); site.extract(&doc) };

        let _s = log.span(&ScrapePhase::Assemble).entered();
        let rows = page.cases.len();
        let mut complete = Vec::new();
        let mut partial = Vec::new();
        for case in page.cases {
            match case.complete() {
                Some(mut rec) => {
                    rec.absolutize(&url);
                    log.info_kv("➕ case", [
                        ("docket", rec.docket_number.clone()),
                        ("date", rec.decision_date.to_string()),
                        ("name", rec.case_name.clone()),
                    ]);
                    complete.push(rec);
                }
                None => {
                    log.warn_kv("↩️ partial row", [("missing", case.missing_fields().join(","))]);
                    partial.push(case);
                }
            }
        }

        total_complete += complete.len();
        total_partial += partial.len();
        log.court_summary(site.id(), rows, complete.len(), partial.len());
        per_court.push(CourtSummary {
            court: site.id().to_string(),
            rows,
            complete: complete.len(),
            partial: partial.len(),
            errors: 0,
        });
        results.push(CourtCases {
            court: site.id().to_string(),
            url,
            cases: complete,
            partial: if args.keep_partial { partial } else { Vec::new() },
        });
    }

    log.totals(total_complete, total_partial, total_errors);

    if out::json_mode() {
        let result = ScrapeApply {
            totals: ScrapeTotals { complete: total_complete, partial: total_partial, errors: total_errors },
            per_court,
            results,
        };
        log.result_timed(&result, t0.elapsed())?;
    }
    Ok(())
}
