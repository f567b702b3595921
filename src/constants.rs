use std::time::Duration;

pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const FADE_DURATION: f32 = 0.5;           // Fade-in of a newly active slide (seconds)

// Automatic rotation interval of each page carousel
pub const HERO_INTERVAL: Duration = Duration::from_secs(5);
pub const FEATURED_INTERVAL: Duration = Duration::from_secs(6);
pub const GALLERY_INTERVAL: Duration = Duration::from_secs(5);
pub const DASHBOARD_INTERVAL: Duration = Duration::from_secs(2);

// Shortest interval a carousel accepts: one frame
pub const MIN_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

pub const ITEMS_PER_VIEW: usize = 3;          // Gallery thumbnails shown per page
pub const ZOOM_STEP: f32 = 0.2;
pub const MIN_ZOOM: f32 = 1.0;

pub const PLACEHOLDER_IMAGE: &str = "placeholder.jpg";
pub const DEFAULT_GALLERY: &str = "gallery1";
