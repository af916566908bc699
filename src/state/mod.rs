//! Per-crawl state
//!
//! # Components
//!
//! - `VisitedSet`: URLs already scheduled, owned by the scheduling loop
//! - `SitemapAccumulator`: results written concurrently by fetch workers
//! - `Sitemap`: the immutable, sorted result handed back to callers

mod sitemap;
mod visited;

pub use sitemap::{Sitemap, SitemapAccumulator};
pub use visited::VisitedSet;
