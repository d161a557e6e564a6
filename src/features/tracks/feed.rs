//! Infinite-scroll bookkeeping for paginated lists.
//!
//! A refresh always fetches page 1 and replaces the items; loading more fetches
//! the next page and appends the results that are not already present. The
//! page counter only advances while the server reports a `next` page, and a
//! failed fetch leaves the feed untouched so the same page can be retried.

use crate::{api::ApiError, features::Page};
use std::future::Future;

pub trait Identified {
    type Id: PartialEq;

    fn id(&self) -> Self::Id;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    Refresh,
    More,
}

#[derive(Debug, Clone)]
pub struct Feed<T> {
    items: Vec<T>,
    next_page: u32,
    all_loaded: bool,
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            all_loaded: false,
        }
    }
}

impl<T: Identified> Feed<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    #[must_use]
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.all_loaded
    }

    /// Page number the next call with `mode` would request, or `None` when
    /// there is nothing more to load.
    #[must_use]
    pub fn page_for(&self, mode: LoadMode) -> Option<u32> {
        match mode {
            LoadMode::Refresh => Some(1),
            LoadMode::More if self.all_loaded => None,
            LoadMode::More => Some(self.next_page),
        }
    }

    /// Fetches one page with `fetch` and merges it. Returns the number of items
    /// added (for a refresh, the size of the new list).
    ///
    /// # Errors
    /// Propagates the error from `fetch`; the feed is left unchanged.
    pub async fn load<F, Fut>(&mut self, mode: LoadMode, fetch: F) -> Result<usize, ApiError>
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<Page<T>, ApiError>>,
    {
        let Some(page) = self.page_for(mode) else {
            return Ok(0);
        };

        let response = fetch(page).await?;
        Ok(self.apply(mode, page, response))
    }

    fn apply(&mut self, mode: LoadMode, page: u32, response: Page<T>) -> usize {
        let has_next = response.has_next();

        let added = match mode {
            LoadMode::Refresh => {
                self.items = response.results;
                self.items.len()
            }
            LoadMode::More => {
                let before = self.items.len();
                for item in response.results {
                    let id = item.id();
                    if !self.items.iter().any(|existing| existing.id() == id) {
                        self.items.push(item);
                    }
                }
                self.items.len() - before
            }
        };

        if has_next {
            self.next_page = page + 1;
            self.all_loaded = false;
        } else {
            self.next_page = page;
            self.all_loaded = true;
        }

        added
    }
}
