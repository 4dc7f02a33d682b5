//! Overlay navigation for the loficode blog theme.
//!
//! Internal links open posts and pages in a full-screen overlay rendered from
//! a pre-generated JSON index, with browser history kept in sync. Real post
//! pages (served directly) stay untouched apart from a "back to home" control.
//!
//! The core is platform independent and generic over [`host::Host`]. On
//! `wasm32` the [`web`] module binds it to the document and starts it from
//! `#[wasm_bindgen(start)]`.
//!
//! # Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | TOML configuration with theme defaults |
//! | [`index`] | Posts/pages collections, fetched once |
//! | [`route`] | Interactive vs passive session |
//! | [`intercept`] | Click → navigation decision |
//! | [`navigation`] | Route states and the transition table |
//! | [`render`] | Overlay, card and TOC markup, related posts |
//! | [`spa`] | The controller tying it together |
//! | [`loader`] | "Load more" post list |
//! | [`search`] | In-page search |

pub mod logger;

pub mod config;
pub mod host;
pub mod index;
pub mod intercept;
pub mod loader;
pub mod navigation;
pub mod render;
pub mod route;
pub mod search;
pub mod spa;
pub mod utils;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::SpaConfig;
pub use host::{Collaborators, Host};
pub use spa::{ShowOutcome, Spa};
