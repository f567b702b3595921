#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum CarouselState {
    #[default]
    Empty,   // No slides, no timer
    Running, // One slide active, automatic timer armed
    Paused,  // One slide active, timer cleared while hovered
}

impl CarouselState {
    pub fn is_active(self) -> bool {
        self != CarouselState::Empty
    }
}
