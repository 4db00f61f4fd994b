use chrono::NaiveDate;
use scraper::Html;

use crate::scrape::types::PageExtraction;

mod ny;

pub use ny::NyCourtOfAppeals;

/// One scraped court. A site knows where its decision list lives for a
/// given crawl date and how to pull case rows out of the parsed page;
/// the generic driver in `scrape::run` does everything else.
pub trait CourtSite: Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn source_url(&self, crawl_date: NaiveDate) -> String;
    fn extract(&self, doc: &Html) -> PageExtraction;
}

static SITES: [&dyn CourtSite; 1] = [&NyCourtOfAppeals];

pub fn all() -> &'static [&'static dyn CourtSite] {
    &SITES
}

pub fn by_id(id: &str) -> Option<&'static dyn CourtSite> {
    SITES.iter().copied().find(|s| s.id() == id)
}
