use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::constants::*;
use crate::slide::{Slide, SlideSet};
use crate::state::CarouselState;
use crate::timer::{FrameScheduler, Scheduler, TimerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("slide index {index} is out of range for {len} slides")]
    OutOfRange { index: usize, len: usize },
    #[error("slide numbers start at 1")]
    ZeroSlideNumber,
}

/// The page carousels of the museum site, all driven by the same controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarouselKind {
    Hero,
    Featured,
    Gallery,
    Dashboard,
}

impl CarouselKind {
    pub const ALL: [CarouselKind; 4] = [
        CarouselKind::Hero,
        CarouselKind::Featured,
        CarouselKind::Gallery,
        CarouselKind::Dashboard,
    ];

    pub fn default_interval(self) -> Duration {
        match self {
            CarouselKind::Hero => HERO_INTERVAL,
            CarouselKind::Featured => FEATURED_INTERVAL,
            CarouselKind::Gallery => GALLERY_INTERVAL,
            CarouselKind::Dashboard => DASHBOARD_INTERVAL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CarouselKind::Hero => "hero",
            CarouselKind::Featured => "featured",
            CarouselKind::Gallery => "gallery",
            CarouselKind::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for CarouselKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rotates one slide at a time through a [`SlideSet`].
///
/// Automatic rotation runs on a one-shot timer from the carousel's own
/// [`Scheduler`]. Every transition that arms a timer cancels the previous
/// one first, so at most one timer is pending per instance and manual
/// navigation always pushes the next automatic tick a full interval away.
#[derive(Debug)]
pub struct Carousel<S: Scheduler = FrameScheduler> {
    name: String,
    slides: SlideSet,
    current_index: usize,
    interval: Duration,
    timer: Option<TimerHandle>,
    state: CarouselState,
    scheduler: S,
}

impl Carousel<FrameScheduler> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_scheduler(name, FrameScheduler::new())
    }
}

impl<S: Scheduler> Carousel<S> {
    pub fn with_scheduler(name: impl Into<String>, scheduler: S) -> Self {
        Self {
            name: name.into(),
            slides: SlideSet::default(),
            current_index: 0,
            interval: MIN_INTERVAL,
            timer: None,
            state: CarouselState::Empty,
            scheduler,
        }
    }

    /// Load a slide set and start rotating it from the first slide.
    ///
    /// Replaces whatever was loaded before. An empty set leaves the carousel
    /// `Empty` with no timer armed.
    pub fn initialize(&mut self, slides: SlideSet, interval: Duration) {
        self.clear_timer();
        self.slides = slides;
        self.slides.clear_active();
        self.current_index = 0;
        self.interval = interval.max(MIN_INTERVAL);

        if self.slides.is_empty() {
            self.state = CarouselState::Empty;
            info!(carousel = %self.name, "no slides to show");
            return;
        }

        self.slides.set_active(0, true);
        self.state = CarouselState::Running;
        self.arm_timer();
        info!(
            carousel = %self.name,
            slides = self.slides.len(),
            interval_ms = self.interval.as_millis() as u64,
            "carousel started"
        );
    }

    pub fn advance(&mut self, direction: Direction) {
        if !self.state.is_active() {
            return;
        }
        let len = self.slides.len() as isize;
        let next = (self.current_index as isize + direction.offset() + len).rem_euclid(len) as usize;
        self.navigate(next);
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), NavigationError> {
        if index >= self.slides.len() {
            warn!(carousel = %self.name, index, len = self.slides.len(), "rejected jump");
            return Err(NavigationError::OutOfRange { index, len: self.slides.len() });
        }
        self.navigate(index);
        Ok(())
    }

    /// Jump using a 1-based slide number as shown next to indicator dots.
    pub fn jump_to_slide_number(&mut self, number: usize) -> Result<(), NavigationError> {
        let index = number.checked_sub(1).ok_or(NavigationError::ZeroSlideNumber)?;
        self.jump_to(index)
    }

    pub fn pause(&mut self) {
        if self.state != CarouselState::Running {
            return;
        }
        self.clear_timer();
        self.state = CarouselState::Paused;
        debug!(carousel = %self.name, index = self.current_index, "paused");
    }

    /// Restart rotation with a full interval; a partially elapsed tick is not kept.
    pub fn resume(&mut self) {
        if self.state != CarouselState::Paused {
            return;
        }
        self.state = CarouselState::Running;
        self.arm_timer();
        debug!(carousel = %self.name, index = self.current_index, "resumed");
    }

    /// Feed elapsed time to the scheduler. Returns true if the carousel ticked.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        let mut ticked = false;
        for handle in self.scheduler.elapse(elapsed) {
            if self.timer == Some(handle) {
                // One-shot: the fired timer is already gone
                self.timer = None;
                self.tick();
                ticked = true;
            } else {
                debug!(carousel = %self.name, ?handle, "ignoring stale timer");
            }
        }
        ticked
    }

    /// Cancel the timer and drop the slides.
    pub fn teardown(&mut self) {
        self.clear_timer();
        self.slides = SlideSet::default();
        self.current_index = 0;
        self.state = CarouselState::Empty;
        debug!(carousel = %self.name, "torn down");
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == CarouselState::Paused
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.is_active().then_some(self.current_index)
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.current_index().and_then(|i| self.slides.get(i))
    }

    pub fn slides(&self) -> &SlideSet {
        &self.slides
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn tick(&mut self) {
        if self.state != CarouselState::Running {
            return;
        }
        let next = (self.current_index + 1) % self.slides.len();
        self.show(next);
        self.timer = Some(self.scheduler.arm(self.interval));
        debug!(carousel = %self.name, index = next, "tick");
    }

    // Manual navigation always re-arms rotation, even from Paused
    fn navigate(&mut self, index: usize) {
        self.show(index);
        self.state = CarouselState::Running;
        self.arm_timer();
        debug!(carousel = %self.name, index, "navigated");
    }

    fn show(&mut self, index: usize) {
        self.slides.set_active(self.current_index, false);
        self.current_index = index;
        self.slides.set_active(index, true);
    }

    fn arm_timer(&mut self) {
        self.clear_timer();
        self.timer = Some(self.scheduler.arm(self.interval));
    }

    fn clear_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle);
        }
    }
}
