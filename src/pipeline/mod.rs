//! Presentation pipeline for price lists.
//!
//! - `paginate`: cut a list into fixed-size pages
//! - `render`: turn a page into text and navigation controls
//! - `CallbackAction`: the payload those controls carry

pub mod action;
pub mod pager;
pub mod render;

pub use action::CallbackAction;
pub use pager::{PAGE_SIZE, Page, paginate, total_pages};
pub use render::{Control, Controls, RenderedPage, render};
