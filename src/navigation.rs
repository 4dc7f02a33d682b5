//! Navigation state machine.
//!
//! The visible route is one of three states. Transitions are computed by a
//! pure reducer so the table can be tested without a document:
//!
//! ```text
//!              Open(Post|Page)                Open(Post|Page)
//!   ┌──────┐ ─────────────────► ┌─────────┐ ─────────────────┐
//!   │ Home │                    │ Overlay │ ◄────────────────┘
//!   └──────┘ ◄───────────────── └─────────┘
//!              Close / Escape
//!
//!   Popped(state)  → state, without pushing history
//!   Popped(None)   → Home, without pushing history
//! ```

use serde::{Deserialize, Serialize};

/// The route currently shown, also the payload of every history entry.
///
/// Serialized as `{"type": "post", "slug": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavigationState {
    #[default]
    Home,
    Post {
        slug: String,
    },
    Page {
        slug: String,
    },
}

impl NavigationState {
    /// Canonical URL of this state.
    pub fn url(&self, post_prefix: &str) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Post { slug } => format!("{post_prefix}{slug}/"),
            Self::Page { slug } => format!("/{slug}/"),
        }
    }

    /// Whether an overlay is visible in this state.
    pub const fn has_overlay(&self) -> bool {
        match self {
            Self::Home => false,
            Self::Post { .. } | Self::Page { .. } => true,
        }
    }

    /// Parse a history state payload.
    ///
    /// Unknown or malformed payloads yield `None`, which replays as Home.
    pub fn from_history_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    pub fn to_history_json(&self) -> String {
        // Serializing a plain tagged enum cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"home"}"#.to_owned())
    }
}

/// Something that asks the route to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Explicit navigation (link click, search result, prev/next).
    Open(NavigationState),
    /// Close button, backdrop, overlay title, back-to-home.
    Close,
    /// Escape key.
    Escape,
    /// Browser back/forward with the state carried by the entry.
    Popped(Option<NavigationState>),
    /// Route synthesized from the URL on first load.
    Initial(NavigationState),
}

/// Result of applying an event to a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: NavigationState,
    /// Push a history entry for `next`.
    pub push_history: bool,
}

impl Transition {
    const fn stay(state: NavigationState) -> Self {
        Self {
            next: state,
            push_history: false,
        }
    }
}

/// Pure transition table.
pub fn reduce(current: &NavigationState, event: NavEvent) -> Transition {
    match event {
        NavEvent::Open(next) => Transition {
            next,
            push_history: true,
        },
        NavEvent::Close => Transition {
            next: NavigationState::Home,
            push_history: true,
        },
        NavEvent::Escape if current.has_overlay() => Transition {
            next: NavigationState::Home,
            push_history: true,
        },
        NavEvent::Escape => Transition::stay(current.clone()),
        NavEvent::Popped(state) => Transition::stay(state.unwrap_or_default()),
        NavEvent::Initial(state) => Transition::stay(state),
    }
}

/// A history entry as handed to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub state: NavigationState,
    pub title: String,
    pub url: String,
}
