//! Session cache of the posts and pages collections.
//!
//! Each collection is fetched lazily on first use. A successful load is kept
//! for the rest of the session; the site is static, so there is nothing to
//! invalidate. A failed load leaves the collection empty and the next call
//! tries again.
//!
//! Navigation never sees a load error: [`ContentIndex::load`] logs it and
//! hands back an empty collection. [`ContentIndex::try_load`] exposes the
//! error for callers that render a failure state.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use super::types::ContentEntry;
use crate::config::IndexConfig;
use crate::host::Host;
use crate::log;
use crate::utils::slug::{self, SlugMatcher};

/// Shared, read-only view of a loaded collection.
pub type Entries = Rc<[ContentEntry]>;

/// The two collections of the content index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Posts,
    Pages,
}

impl Collection {
    /// Short name for this collection (used in logs)
    pub const fn name(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Pages => "pages",
        }
    }

    /// Slug matchers tried, in order, when resolving an entry.
    pub const fn matchers(self) -> &'static [SlugMatcher] {
        match self {
            Self::Posts => slug::POST_MATCHERS,
            Self::Pages => slug::PAGE_MATCHERS,
        }
    }
}

/// Why a collection could not be loaded.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("request to `{url}` failed: {reason}")]
    Network { url: String, reason: String },

    #[error("`{url}` answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("`{url}` is not a valid content index")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Lazily loaded, memoized content index.
#[derive(Debug)]
pub struct ContentIndex {
    posts_url: String,
    pages_url: String,
    posts: RefCell<Option<Entries>>,
    pages: RefCell<Option<Entries>>,
}

impl ContentIndex {
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            posts_url: config.posts.clone(),
            pages_url: config.pages.clone(),
            posts: RefCell::new(None),
            pages: RefCell::new(None),
        }
    }

    fn slot(&self, collection: Collection) -> &RefCell<Option<Entries>> {
        match collection {
            Collection::Posts => &self.posts,
            Collection::Pages => &self.pages,
        }
    }

    fn url(&self, collection: Collection) -> &str {
        match collection {
            Collection::Posts => &self.posts_url,
            Collection::Pages => &self.pages_url,
        }
    }

    /// Cached entries, empty if the collection is not loaded (yet).
    pub fn get(&self, collection: Collection) -> Entries {
        self.slot(collection)
            .borrow()
            .clone()
            .unwrap_or_else(|| Rc::from(Vec::new()))
    }

    #[cfg(test)]
    fn is_loaded(&self, collection: Collection) -> bool {
        self.slot(collection).borrow().is_some()
    }

    pub async fn load_posts<H: Host>(&self, host: &H) -> Entries {
        self.load(host, Collection::Posts).await
    }

    pub async fn load_pages<H: Host>(&self, host: &H) -> Entries {
        self.load(host, Collection::Pages).await
    }

    pub async fn try_load_posts<H: Host>(&self, host: &H) -> Result<Entries, IndexError> {
        self.try_load(host, Collection::Posts).await
    }

    /// Load a collection, degrading to empty on failure.
    pub async fn load<H: Host>(&self, host: &H, collection: Collection) -> Entries {
        match self.try_load(host, collection).await {
            Ok(entries) => entries,
            Err(err) => {
                log!("index"; "could not load {}: {err}", collection.name());
                Rc::from(Vec::new())
            }
        }
    }

    /// Load a collection, reporting why it failed.
    pub async fn try_load<H: Host>(
        &self,
        host: &H,
        collection: Collection,
    ) -> Result<Entries, IndexError> {
        if let Some(entries) = self.slot(collection).borrow().clone() {
            return Ok(entries);
        }

        let url = self.url(collection);
        let response = host.fetch(url).await.map_err(|err| IndexError::Network {
            url: url.to_owned(),
            reason: format!("{err:#}"),
        })?;

        if !response.is_success() {
            return Err(IndexError::Status {
                url: url.to_owned(),
                status: response.status,
            });
        }

        let entries: Vec<ContentEntry> =
            serde_json::from_str(&response.body).map_err(|source| IndexError::Json {
                url: url.to_owned(),
                source,
            })?;

        log!("index"; "loaded {} {}", entries.len(), collection.name());

        // Another load may have finished while this one was suspended; keep the first.
        let mut slot = self.slot(collection).borrow_mut();
        let entries = slot.get_or_insert_with(|| Rc::from(entries)).clone();
        Ok(entries)
    }

    /// Whether `href` is the URL of a loaded page, exactly or with a trailing `/` added.
    pub fn is_page_url(&self, href: &str) -> bool {
        let with_slash = if href.ends_with('/') {
            None
        } else {
            Some(format!("{href}/"))
        };
        self.get(Collection::Pages)
            .iter()
            .any(|page| page.url == href || with_slash.as_deref() == Some(page.url.as_str()))
    }
}
