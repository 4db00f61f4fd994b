use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Scrape;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Court, FetchPage, ParsePage, Extract, Assemble }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Court => "court",
        Phase::FetchPage => "fetch_page",
        Phase::ParsePage => "parse_page",
        Phase::Extract => "extract",
        Phase::Assemble => "assemble",
    }}
    fn span(&self) -> Span { match self {
        Phase::Court => info_span!("court"),
        Phase::FetchPage => info_span!("fetch_page"),
        Phase::ParsePage => info_span!("parse_page"),
        Phase::Extract => info_span!("extract"),
        Phase::Assemble => info_span!("assemble"),
    }}
}

impl OpMarker for Scrape {
    const NAME: &'static str = "scrape";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("scrape") }
}
