//! Lazy snapshot pagination.

use crosslist_marketplace::{CatalogSource, ListingsPage};

use crate::constants::MAX_SNAPSHOT_PAGES;
use crate::errors::{Error, Result};

/// Pulls the external snapshot page by page, on demand.
///
/// The full snapshot is never materialized; callers consume one page at
/// a time and the pager terminates once the source stops returning a
/// continuation token. `MAX_SNAPSHOT_PAGES` bounds a source that keeps
/// handing out tokens.
pub struct SnapshotPages<'a> {
    source: &'a dyn CatalogSource,
    next_token: Option<String>,
    started: bool,
    pages_fetched: usize,
}

impl<'a> SnapshotPages<'a> {
    pub fn new(source: &'a dyn CatalogSource) -> Self {
        Self {
            source,
            next_token: None,
            started: false,
            pages_fetched: 0,
        }
    }

    /// Fetches the next page, or `None` once the snapshot is exhausted.
    ///
    /// A fetch failure is a run-level error: the caller cannot tell
    /// which listings the missing remainder would have contained, so the
    /// not-found determination would be unsafe.
    pub async fn next_page(&mut self) -> Result<Option<ListingsPage>> {
        if self.started && self.next_token.is_none() {
            return Ok(None);
        }
        if self.pages_fetched >= MAX_SNAPSHOT_PAGES {
            return Err(Error::Unexpected(format!(
                "snapshot from {} exceeded {} pages",
                self.source.marketplace_id(),
                MAX_SNAPSHOT_PAGES
            )));
        }

        let page = self
            .source
            .fetch_listings_page(self.next_token.as_deref())
            .await?;

        self.started = true;
        self.pages_fetched += 1;
        self.next_token = page.next_page_token.clone();
        Ok(Some(page))
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}
