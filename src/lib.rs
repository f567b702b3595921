//! Rotating artifact carousels for the museum catalog front page.
//!
//! [`carousel::Carousel`] is the controller: a timer-driven state machine
//! with manual navigation and hover pause. The rest of the crate loads the
//! catalog that feeds it and renders four instances with raylib.

pub mod carousel;
pub mod catalog;
pub mod constants;
pub mod engine;
pub mod page;
pub mod pager;
pub mod panel;
pub mod slide;
pub mod state;
pub mod texture_loader;
pub mod timer;

pub use carousel::{Carousel, CarouselKind, Direction, NavigationError};
pub use catalog::{Catalog, CatalogError, SearchField};
pub use slide::{Slide, SlideSet};
pub use state::CarouselState;
pub use timer::{FrameScheduler, Scheduler, TimerHandle};
