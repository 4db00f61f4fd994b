pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

// Factory helpers, one per CLI op
pub fn scrape() -> LogCtx<ops::scrape::Scrape> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn courts() -> LogCtx<ops::courts::Courts> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
