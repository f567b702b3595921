use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use raylib::prelude::*;
use tracing::info;

use crate::carousel::CarouselKind;
use crate::catalog::{Catalog, SearchField};
use crate::constants::*;
use crate::panel::{Panel, Pointer};
use crate::texture_loader::TextureCache;

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub asset_dir: PathBuf,
    pub gallery: String,
    pub intervals: HashMap<CarouselKind, Duration>,
    pub search: Option<(SearchField, String)>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("."),
            gallery: DEFAULT_GALLERY.to_string(),
            intervals: HashMap::new(),
            search: None,
        }
    }
}

impl PageOptions {
    pub fn interval(&self, kind: CarouselKind) -> Duration {
        self.intervals.get(&kind).copied().unwrap_or_else(|| kind.default_interval())
    }
}

// Hero across the top, the other three side by side below it
fn panel_bounds(kind: CarouselKind) -> Rectangle {
    let w = RENDER_WIDTH as f32;
    let h = RENDER_HEIGHT as f32 * 0.5;
    match kind {
        CarouselKind::Hero => Rectangle::new(0.0, 0.0, w, h),
        CarouselKind::Featured => Rectangle::new(0.0, h, w / 3.0, h),
        CarouselKind::Gallery => Rectangle::new(w / 3.0, h, w * 5.0 / 12.0, h),
        CarouselKind::Dashboard => Rectangle::new(w * 3.0 / 4.0, h, w / 4.0, h),
    }
}

/// Map a window position onto the fixed-size render target.
pub fn screen_to_render(position: Vector2, screen_width: f32, screen_height: f32) -> Vector2 {
    if screen_width <= 0.0 || screen_height <= 0.0 {
        return position;
    }
    Vector2::new(
        position.x * RENDER_WIDTH as f32 / screen_width,
        position.y * RENDER_HEIGHT as f32 / screen_height,
    )
}

/// The museum front page: one panel per carousel kind.
pub struct PageEngine {
    options: PageOptions,
    panels: Vec<Panel>,
    textures: TextureCache,
}

impl PageEngine {
    pub fn new(options: PageOptions) -> Self {
        let panels = CarouselKind::ALL
            .iter()
            .map(|&kind| Panel::new(kind, panel_bounds(kind), options.interval(kind)))
            .collect();
        let textures = TextureCache::new(&options.asset_dir);
        Self { options, panels, textures }
    }

    /// Hand each panel its slides from the catalog.
    pub fn load(&mut self, catalog: &Catalog) {
        for panel in self.panels.iter_mut() {
            let slides = match panel.kind {
                CarouselKind::Hero => catalog.hero_slides(),
                CarouselKind::Featured => match &self.options.search {
                    Some((field, value)) => catalog.search(*field, value),
                    None => catalog.featured_slides(),
                },
                CarouselKind::Gallery => {
                    panel.title = catalog.gallery_meta(&self.options.gallery).map(|meta| meta.title.clone());
                    catalog.gallery_slides(&self.options.gallery)
                }
                CarouselKind::Dashboard => catalog.dashboard_slides(),
            };
            panel.load(slides);
        }
    }

    pub fn panel(&self, kind: CarouselKind) -> Option<&Panel> {
        self.panels.iter().find(|p| p.kind == kind)
    }

    pub fn handle_pointer(&mut self, pointer: Pointer) {
        for panel in self.panels.iter_mut() {
            panel.handle_pointer(pointer);
        }
    }

    pub fn update(&mut self, dt: f32) {
        for panel in self.panels.iter_mut() {
            panel.update(dt);
        }
    }
}

impl crate::engine::Engine for PageEngine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, catalog: &Catalog) -> bool {
        self.load(catalog);
        for panel in self.panels.iter() {
            self.textures.load_slides(rl, thread, panel.carousel.slides());
        }
        info!(textures = self.textures.len(), "textures loaded");

        self.panels.iter().any(|p| p.carousel.state().is_active())
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> bool {
        let position = screen_to_render(
            rl.get_mouse_position(),
            rl.get_screen_width() as f32,
            rl.get_screen_height() as f32,
        );
        let pressed = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);
        self.handle_pointer(Pointer { position, pressed });
        self.update(dt);

        let panels = &self.panels;
        let textures = &self.textures;
        rl.draw_texture_mode(thread, framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(thread);
            d.clear_background(Color::BLACK);

            for panel in panels.iter() {
                panel.draw(&mut d, textures);
            }
        });

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CarouselState;

    #[test]
    fn fallback_catalog_fills_every_panel() {
        let mut page = PageEngine::new(PageOptions { gallery: "gallery2".into(), ..Default::default() });
        page.load(&Catalog::fallback());

        let len = |kind| page.panel(kind).unwrap().carousel.slides().len();
        assert_eq!(len(CarouselKind::Hero), 3);
        assert_eq!(len(CarouselKind::Featured), 12);
        assert_eq!(len(CarouselKind::Gallery), 3);
        assert_eq!(len(CarouselKind::Dashboard), 12);

        let gallery = page.panel(CarouselKind::Gallery).unwrap();
        assert_eq!(gallery.title.as_deref(), Some("Liberation War Gallery"));
    }

    #[test]
    fn search_feeds_featured_panel() {
        let options = PageOptions {
            search: Some((SearchField::Name, "medals".into())),
            ..Default::default()
        };
        let mut page = PageEngine::new(options);
        page.load(&Catalog::fallback());

        let featured = &page.panel(CarouselKind::Featured).unwrap().carousel;
        assert_eq!(featured.slides().len(), 1);
        assert_eq!(featured.active_slide().unwrap().caption, "Liberation War Medals");
    }

    #[test]
    fn search_without_results_leaves_featured_empty() {
        let options = PageOptions {
            search: Some((SearchField::Name, "spaceship".into())),
            ..Default::default()
        };
        let mut page = PageEngine::new(options);
        page.load(&Catalog::fallback());

        assert_eq!(page.panel(CarouselKind::Featured).unwrap().carousel.state(), CarouselState::Empty);
        assert_eq!(page.panel(CarouselKind::Hero).unwrap().carousel.state(), CarouselState::Running);
    }

    #[test]
    fn interval_overrides_apply_per_kind() {
        let mut intervals = HashMap::new();
        intervals.insert(CarouselKind::Dashboard, Duration::from_secs(1));
        let mut page = PageEngine::new(PageOptions { intervals, ..Default::default() });
        page.load(&Catalog::fallback());

        page.update(1.0);
        assert_eq!(page.panel(CarouselKind::Dashboard).unwrap().carousel.current_index(), Some(1));
        assert_eq!(page.panel(CarouselKind::Featured).unwrap().carousel.current_index(), Some(0));
    }

    #[test]
    fn hovering_one_panel_pauses_only_that_panel() {
        let mut page = PageEngine::new(PageOptions::default());
        page.load(&Catalog::fallback());

        page.handle_pointer(Pointer { position: Vector2::new(100.0, 100.0), pressed: false });
        assert!(page.panel(CarouselKind::Hero).unwrap().carousel.is_paused());
        assert!(!page.panel(CarouselKind::Dashboard).unwrap().carousel.is_paused());
    }

    #[test]
    fn window_coordinates_scale_to_render_target() {
        let p = screen_to_render(Vector2::new(480.0, 270.0), 960.0, 540.0);
        assert_eq!((p.x, p.y), (960.0, 540.0));
    }
}
