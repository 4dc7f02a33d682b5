//! "Load more" for the home page post list.
//!
//! The server renders the first posts and records progress on the trigger
//! element (`data-loaded`, `data-total`). Each trigger appends the next batch
//! of summary cards from the cached post index, one card at a time.

use std::cell::Cell;

use crate::config::ListConfig;
use crate::host::{Host, TriggerState};
use crate::index::ContentIndex;
use crate::log;
use crate::render::card::card;

/// Result of one "load more" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// `count` cards appended; `exhausted` once every post is shown.
    Appended { count: usize, exhausted: bool },
    /// A batch is already being appended.
    Busy,
    /// The index or a card could not be loaded. Cards already appended stay.
    Failed,
}

#[derive(Debug, Default)]
pub struct PostListLoader {
    /// Posts shown so far. Read from `data-loaded` on first use.
    loaded: Cell<Option<usize>>,
    busy: Cell<bool>,
}

impl PostListLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(&self) -> Option<usize> {
        self.loaded.get()
    }

    pub async fn load_more<H: Host>(
        &self,
        host: &H,
        index: &ContentIndex,
        config: &ListConfig,
    ) -> LoadOutcome {
        if self.busy.replace(true) {
            return LoadOutcome::Busy;
        }
        let outcome = self.append_batch(host, index, config).await;
        self.busy.set(false);
        outcome
    }

    async fn append_batch<H: Host>(
        &self,
        host: &H,
        index: &ContentIndex,
        config: &ListConfig,
    ) -> LoadOutcome {
        let mut loaded = self
            .loaded
            .get()
            .unwrap_or_else(|| read_count(host, &config.trigger, "loaded").unwrap_or(0));

        set_trigger(host, config, &TriggerState::Loading, loaded);

        let posts = match index.try_load_posts(host).await {
            Ok(posts) => posts,
            Err(err) => {
                log!("loader"; "error loading more posts: {err}");
                return self.fail(host, config, loaded);
            }
        };

        let start = loaded.min(posts.len());
        let end = (start + config.batch_size).min(posts.len());
        let batch = &posts[start..end];

        for (i, post) in batch.iter().enumerate() {
            if i > 0 {
                host.sleep(config.stagger_ms).await;
            }
            if let Err(err) = host.append_card(&config.container, &card(post)) {
                log!("loader"; "could not append {}: {err:#}", post.url);
                return self.fail(host, config, loaded);
            }
            loaded += 1;
        }
        self.loaded.set(Some(loaded));

        let total = read_count(host, &config.trigger, "total").unwrap_or(posts.len());
        let exhausted = loaded >= total || end == posts.len();
        let state = if exhausted {
            TriggerState::Exhausted
        } else {
            TriggerState::Ready
        };
        set_trigger(host, config, &state, loaded);

        LoadOutcome::Appended {
            count: batch.len(),
            exhausted,
        }
    }

    fn fail<H: Host>(&self, host: &H, config: &ListConfig, loaded: usize) -> LoadOutcome {
        self.loaded.set(Some(loaded));
        set_trigger(
            host,
            config,
            &TriggerState::Failed(config.failure_label.clone()),
            loaded,
        );
        LoadOutcome::Failed
    }
}

fn read_count<H: Host>(host: &H, selector: &str, name: &str) -> Option<usize> {
    host.data_attribute(selector, name)?.trim().parse().ok()
}

fn set_trigger<H: Host>(host: &H, config: &ListConfig, state: &TriggerState, loaded: usize) {
    if let Err(err) = host.set_trigger(&config.trigger, state, loaded) {
        log!("loader"; "could not update trigger: {err:#}");
    }
}
