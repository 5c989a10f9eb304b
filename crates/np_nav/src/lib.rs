//! Client-side navigation for the portal: turns link clicks, searches and
//! history moves into fetched and rendered pages.

pub mod container;
pub mod controller;
pub mod event;
pub mod history;
pub mod loader;

pub use container::{ContentContainer, MemoryContainer};
pub use controller::{NavigationController, NavigationOutcome};
pub use event::Event;
pub use history::SessionHistory;
pub use loader::{load_menu, load_page, DEFAULT_PAGE_SIZE};

pub mod prelude {
    pub use super::{ContentContainer, Event, NavigationController, NavigationOutcome};
}
