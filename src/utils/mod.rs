//! Utility modules shared by the navigation core.

pub mod date;
pub mod html;
pub mod link;
pub mod slug;
