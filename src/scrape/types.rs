use chrono::NaiveDate;
use serde::Serialize;
use url::Url;

/// Precedential status of an opinion. Decision-list pages only carry
/// published opinions, so this is constant today.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Status {
    Published,
}

/// One qualifying row as extracted from the page. Fields a row fails to
/// yield stay `None` so positions are never dropped and the per-case
/// sequences cannot desynchronize.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RawCase {
    pub case_name: Option<String>,
    pub download_url: Option<String>,
    pub decision_date: Option<NaiveDate>,
    pub docket_number: Option<String>,
}

impl RawCase {
    pub fn is_complete(&self) -> bool {
        self.case_name.is_some()
            && self.download_url.is_some()
            && self.decision_date.is_some()
            && self.docket_number.is_some()
    }

    /// Promote to a complete record, or `None` if any field is missing.
    pub fn complete(&self) -> Option<CaseRecord> {
        Some(CaseRecord {
            case_name: self.case_name.clone()?,
            download_url: self.download_url.clone()?,
            decision_date: self.decision_date?,
            docket_number: self.docket_number.clone()?,
            status: Status::Published,
        })
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.case_name.is_none() { missing.push("case_name"); }
        if self.download_url.is_none() { missing.push("download_url"); }
        if self.decision_date.is_none() { missing.push("decision_date"); }
        if self.docket_number.is_none() { missing.push("docket_number"); }
        missing
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CaseRecord {
    pub case_name: String,
    pub download_url: String,
    pub decision_date: NaiveDate,
    pub docket_number: String,
    pub status: Status,
}

impl CaseRecord {
    /// Resolve a relative download link against the page it came from.
    /// Absolute links pass through unchanged; if the join cannot apply
    /// the raw href is kept.
    pub fn absolutize(&mut self, page_url: &str) {
        if let Ok(base) = Url::parse(page_url) {
            if let Ok(joined) = base.join(&self.download_url) {
                self.download_url = joined.to_string();
            }
        }
    }
}

/// Everything pulled from one decision-list page, in row order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageExtraction {
    pub cases: Vec<RawCase>,
}

// The downstream contract is four aligned sequences plus a constant
// status sequence; these project them out of the row records. Equal
// length is structural: every projection is one field of the same list.
impl PageExtraction {
    pub fn case_names(&self) -> Vec<Option<&str>> {
        self.cases.iter().map(|c| c.case_name.as_deref()).collect()
    }

    pub fn download_urls(&self) -> Vec<Option<&str>> {
        self.cases.iter().map(|c| c.download_url.as_deref()).collect()
    }

    pub fn decision_dates(&self) -> Vec<Option<NaiveDate>> {
        self.cases.iter().map(|c| c.decision_date).collect()
    }

    pub fn docket_numbers(&self) -> Vec<Option<&str>> {
        self.cases.iter().map(|c| c.docket_number.as_deref()).collect()
    }

    pub fn statuses(&self) -> Vec<Status> {
        vec![Status::Published; self.cases.len()]
    }
}

// Plan envelope types
#[derive(Serialize)]
pub struct CourtSample { pub court: String, pub url: String }

#[derive(Serialize)]
pub struct ScrapePlan { pub courts: usize, pub date: NaiveDate, pub sample_courts: Vec<CourtSample> }

// Apply/result envelope types
#[derive(Serialize)]
pub struct CourtSummary { pub court: String, pub rows: usize, pub complete: usize, pub partial: usize, pub errors: usize }

#[derive(Serialize)]
pub struct ScrapeTotals { pub complete: usize, pub partial: usize, pub errors: usize }

#[derive(Serialize)]
pub struct CourtCases {
    pub court: String,
    pub url: String,
    pub cases: Vec<CaseRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub partial: Vec<RawCase>,
}

#[derive(Serialize)]
pub struct ScrapeApply { pub totals: ScrapeTotals, pub per_court: Vec<CourtSummary>, pub results: Vec<CourtCases> }
