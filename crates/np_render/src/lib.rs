//! HTML for the portal's pages.
//!
//! Every function here is pure: it takes already-fetched data and returns
//! markup, without I/O or shared state.

pub mod body;
pub mod date;
pub mod html;
pub mod labels;
pub mod layout;
pub mod pages;
pub mod pagination;
pub mod status;

pub use date::Masthead;
pub use html::Fragment;
pub use layout::{render_document, Menu};
pub use pages::{render, Listing, PageView, DIGEST_SIZE};
pub use pagination::{PageItem, Pagination};
pub use status::{render_error, render_loading};
