use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Courts;

#[derive(Copy, Clone, Debug)]
pub enum Phase { List, Url }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::List => "list",
        Phase::Url => "url",
    }}
    fn span(&self) -> Span { match self {
        Phase::List => info_span!("list"),
        Phase::Url => info_span!("url"),
    }}
}

impl OpMarker for Courts {
    const NAME: &'static str = "courts";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("courts") }
}
