use std::time::Duration;

use rand::Rng;
use raylib::prelude::*;

use crate::carousel::{Carousel, CarouselKind, Direction};
use crate::constants::*;
use crate::pager::{Pager, Zoom};
use crate::slide::SlideSet;
use crate::texture_loader::TextureCache;

const CAPTION_HEIGHT: f32 = 70.0;
const INDICATOR_ROW: f32 = 30.0;
const THUMB_STRIP: f32 = 130.0;
const ARROW_WIDTH: f32 = 50.0;
const ARROW_HEIGHT: f32 = 90.0;
const PAGE_ARROW_WIDTH: f32 = 40.0;
const DOT_SPACING: f32 = 24.0;
const DOT_RADIUS: f32 = 7.0;
const BUTTON_SIZE: f32 = 40.0;

/// Mouse state for one frame, in render-target coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Pointer {
    pub position: Vector2,
    pub pressed: bool,
}

fn contains(rect: &Rectangle, p: Vector2) -> bool {
    p.x >= rect.x && p.x < rect.x + rect.width && p.y >= rect.y && p.y < rect.y + rect.height
}

/// One carousel on the page: its controller, where it is drawn, and the
/// per-panel presentation state.
pub struct Panel {
    pub kind: CarouselKind,
    pub title: Option<String>,
    pub carousel: Carousel,
    bounds: Rectangle,
    interval: Duration,
    hovered: bool,

    shown_index: Option<usize>,
    fade: ease::Tween,
    alpha: f32,

    // Ken Burns pan of the hero image while it is displayed
    pan_direction: i32,
    tween_ken_burns: ease::Tween,
    ken_burns_scale: f32,

    // Gallery only
    pager: Pager,
    zoom: Zoom,
}

impl Panel {
    pub fn new(kind: CarouselKind, bounds: Rectangle, interval: Duration) -> Self {
        Self {
            kind,
            title: None,
            carousel: Carousel::new(kind.name()),
            bounds,
            interval,
            hovered: false,
            shown_index: None,
            fade: ease::Tween::new(ease::cubic_out, 0.0, 1.0, FADE_DURATION),
            alpha: 0.0,
            pan_direction: 0,
            tween_ken_burns: ease::Tween::new(ease::linear_none, 1.0, 0.9, interval.as_secs_f32()),
            ken_burns_scale: 1.0,
            pager: Pager::new(0, ITEMS_PER_VIEW),
            zoom: Zoom::default(),
        }
    }

    /// Replace the panel's slides, e.g. after a search.
    pub fn load(&mut self, slides: SlideSet) {
        self.pager = Pager::new(slides.len(), ITEMS_PER_VIEW);
        self.zoom = Zoom::default();
        self.carousel.initialize(slides, self.interval);
        if self.hovered {
            self.carousel.pause();
        }
        self.shown_index = None;
        self.sync_shown_slide();
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn handle_pointer(&mut self, pointer: Pointer) {
        let p = pointer.position;
        let inside = contains(&self.bounds, p);
        if inside != self.hovered {
            self.hovered = inside;
            if inside {
                self.carousel.pause();
            } else {
                self.carousel.resume();
            }
        }

        if !inside || !pointer.pressed {
            return;
        }

        if contains(&self.prev_arrow(), p) {
            self.carousel.advance(Direction::Previous);
        } else if contains(&self.next_arrow(), p) {
            self.carousel.advance(Direction::Next);
        } else if let Some(i) = (0..self.carousel.slides().len()).find(|&i| contains(&self.indicator_rect(i), p)) {
            let _ = self.carousel.jump_to(i);
        } else if self.kind == CarouselKind::Gallery {
            self.handle_gallery_click(p);
        }
        self.sync_shown_slide();
    }

    fn handle_gallery_click(&mut self, p: Vector2) {
        if contains(&self.page_arrow(Direction::Previous), p) {
            self.pager.change_page(-1);
        } else if contains(&self.page_arrow(Direction::Next), p) {
            self.pager.change_page(1);
        } else if contains(&self.zoom_button(Direction::Next), p) {
            self.zoom.zoom_in();
        } else if contains(&self.zoom_button(Direction::Previous), p) {
            self.zoom.zoom_out();
        } else if let Some(index) = self.pager.visible_range().zip(0..).find(|&(_, slot)| contains(&self.thumbnail_rect(slot), p)).map(|(index, _)| index) {
            let _ = self.carousel.jump_to(index);
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.carousel.update(Duration::from_secs_f32(dt));
        self.sync_shown_slide();
        self.alpha = self.fade.apply(dt);
        if self.kind == CarouselKind::Hero && !self.carousel.is_paused() {
            self.ken_burns_scale = self.tween_ken_burns.apply(dt);
        }
    }

    // Restart the presentation effects when the active slide changed
    fn sync_shown_slide(&mut self) {
        let current = self.carousel.current_index();
        if current == self.shown_index {
            return;
        }
        self.shown_index = current;
        self.fade = ease::Tween::new(ease::cubic_out, 0.0, 1.0, FADE_DURATION);
        self.alpha = 0.0;
        self.pan_direction = rand::rng().random_range(0..4);
        self.tween_ken_burns = ease::Tween::new(ease::linear_none, 1.0, 0.9, self.interval.as_secs_f32());
        self.ken_burns_scale = 1.0;
        if let Some(index) = current {
            self.pager.show_page_of(index);
        }
    }

    // --- Layout ---

    fn image_area(&self) -> Rectangle {
        let strip = if self.kind == CarouselKind::Gallery { THUMB_STRIP } else { 0.0 };
        Rectangle::new(
            self.bounds.x,
            self.bounds.y,
            self.bounds.width,
            (self.bounds.height - CAPTION_HEIGHT - INDICATOR_ROW - strip).max(0.0),
        )
    }

    fn caption_area(&self) -> Rectangle {
        let image = self.image_area();
        Rectangle::new(image.x, image.y + image.height, image.width, CAPTION_HEIGHT)
    }

    fn prev_arrow(&self) -> Rectangle {
        let image = self.image_area();
        Rectangle::new(image.x + 10.0, image.y + (image.height - ARROW_HEIGHT) * 0.5, ARROW_WIDTH, ARROW_HEIGHT)
    }

    fn next_arrow(&self) -> Rectangle {
        let image = self.image_area();
        Rectangle::new(
            image.x + image.width - ARROW_WIDTH - 10.0,
            image.y + (image.height - ARROW_HEIGHT) * 0.5,
            ARROW_WIDTH,
            ARROW_HEIGHT,
        )
    }

    fn indicator_center(&self, i: usize) -> Vector2 {
        let count = self.carousel.slides().len();
        let row_y = self.image_area().y + self.image_area().height + CAPTION_HEIGHT + INDICATOR_ROW * 0.5;
        let total = count.saturating_sub(1) as f32 * DOT_SPACING;
        let start_x = self.bounds.x + self.bounds.width * 0.5 - total * 0.5;
        Vector2::new(start_x + i as f32 * DOT_SPACING, row_y)
    }

    fn indicator_rect(&self, i: usize) -> Rectangle {
        let c = self.indicator_center(i);
        let half = DOT_SPACING * 0.5 - 2.0;
        Rectangle::new(c.x - half, c.y - half, half * 2.0, half * 2.0)
    }

    fn strip_area(&self) -> Rectangle {
        let caption = self.caption_area();
        Rectangle::new(self.bounds.x, caption.y + CAPTION_HEIGHT + INDICATOR_ROW, self.bounds.width, THUMB_STRIP)
    }

    fn page_arrow(&self, direction: Direction) -> Rectangle {
        let strip = self.strip_area();
        let x = match direction {
            Direction::Previous => strip.x,
            Direction::Next => strip.x + strip.width - PAGE_ARROW_WIDTH,
        };
        Rectangle::new(x, strip.y, PAGE_ARROW_WIDTH, strip.height)
    }

    fn thumbnail_rect(&self, slot: usize) -> Rectangle {
        let strip = self.strip_area();
        let slot_width = (strip.width - 2.0 * PAGE_ARROW_WIDTH) / ITEMS_PER_VIEW as f32;
        Rectangle::new(
            strip.x + PAGE_ARROW_WIDTH + slot as f32 * slot_width + 5.0,
            strip.y + 5.0,
            slot_width - 10.0,
            strip.height - 10.0,
        )
    }

    // Next = zoom in (right button), Previous = zoom out (left button)
    fn zoom_button(&self, direction: Direction) -> Rectangle {
        let image = self.image_area();
        let offset = match direction {
            Direction::Previous => 2.0,
            Direction::Next => 1.0,
        };
        Rectangle::new(image.x + image.width - offset * (BUTTON_SIZE + 10.0), image.y + 10.0, BUTTON_SIZE, BUTTON_SIZE)
    }

    // --- Drawing ---

    pub fn draw(&self, d: &mut RaylibDrawHandle, textures: &TextureCache) {
        d.draw_rectangle_rec(self.bounds, Color::new(20, 20, 24, 255));

        let Some(slide) = self.carousel.active_slide() else {
            let image = self.image_area();
            d.draw_text("No artifacts to show", image.x as i32 + 20, (image.y + image.height * 0.5) as i32, 24, Color::GRAY);
            return;
        };

        let tint = Color::new(255, 255, 255, (self.alpha.clamp(0.0, 1.0) * 255.0) as u8);
        match textures.get(&slide.image) {
            Some(texture) => self.draw_image(d, texture, tint),
            None => {
                let image = self.image_area();
                d.draw_rectangle_rec(image, Color::new(50, 50, 56, 255));
                d.draw_text(&slide.image.to_string_lossy(), image.x as i32 + 20, image.y as i32 + 20, 20, Color::LIGHTGRAY);
            }
        }

        // Caption
        let caption = self.caption_area();
        d.draw_rectangle_rec(caption, Color::new(0, 0, 0, 160));
        let heading = match &self.title {
            Some(title) => format!("{}: {}", title, slide.caption),
            None => slide.caption.clone(),
        };
        d.draw_text(&heading, caption.x as i32 + 20, caption.y as i32 + 10, 26, Color::RAYWHITE);
        if let Some(description) = &slide.description {
            d.draw_text(description, caption.x as i32 + 20, caption.y as i32 + 42, 18, Color::LIGHTGRAY);
        }

        // Navigation arrows
        for (rect, label) in [(self.prev_arrow(), "<"), (self.next_arrow(), ">")] {
            d.draw_rectangle_rec(rect, Color::new(0, 0, 0, 120));
            d.draw_text(label, (rect.x + rect.width * 0.35) as i32, (rect.y + rect.height * 0.3) as i32, 36, Color::WHITE);
        }

        // Indicators
        for i in 0..self.carousel.slides().len() {
            let color = if Some(i) == self.carousel.current_index() { Color::GOLD } else { Color::GRAY };
            d.draw_circle_v(self.indicator_center(i), DOT_RADIUS, color);
        }

        if self.kind == CarouselKind::Gallery {
            self.draw_gallery_controls(d, textures);
        }
    }

    fn draw_image(&self, d: &mut RaylibDrawHandle, texture: &Texture2D, tint: Color) {
        let area = self.image_area();
        let tex_width = texture.width() as f32;
        let tex_height = texture.height() as f32;

        // Fit the texture inside the image area, keeping its aspect ratio
        let scale = (area.width / tex_width).min(area.height / tex_height);
        let dest_width = tex_width * scale;
        let dest_height = tex_height * scale;
        let dest = Rectangle::new(
            area.x + (area.width - dest_width) * 0.5,
            area.y + (area.height - dest_height) * 0.5,
            dest_width,
            dest_height,
        );

        let source_scale = match self.kind {
            CarouselKind::Hero => self.ken_burns_scale,
            CarouselKind::Gallery => 1.0 / self.zoom.factor(),
            _ => 1.0,
        };
        let source_width = tex_width * source_scale;
        let source_height = tex_height * source_scale;
        let origin = if self.kind == CarouselKind::Hero {
            match self.pan_direction {
                0 => Vector2::new(0.0, (tex_height - source_height) * 0.5),                 // left-to-right
                1 => Vector2::new(tex_width - source_width, (tex_height - source_height) * 0.5), // right-to-left
                2 => Vector2::new((tex_width - source_width) * 0.5, 0.0),                   // top-to-bottom
                _ => Vector2::new((tex_width - source_width) * 0.5, tex_height - source_height), // bottom-to-top
            }
        } else {
            Vector2::new((tex_width - source_width) * 0.5, (tex_height - source_height) * 0.5)
        };

        d.draw_texture_pro(
            texture,
            Rectangle::new(origin.x, origin.y, source_width, source_height),
            dest,
            Vector2::new(0.0, 0.0),
            0.0,
            tint,
        );
    }

    fn draw_gallery_controls(&self, d: &mut RaylibDrawHandle, textures: &TextureCache) {
        for (direction, label) in [(Direction::Previous, "-"), (Direction::Next, "+")] {
            let rect = self.zoom_button(direction);
            d.draw_rectangle_rec(rect, Color::new(0, 0, 0, 140));
            d.draw_text(label, (rect.x + 13.0) as i32, (rect.y + 5.0) as i32, 30, Color::WHITE);
        }

        for (direction, label, enabled) in [
            (Direction::Previous, "<", self.pager.can_go_previous()),
            (Direction::Next, ">", self.pager.can_go_next()),
        ] {
            if enabled {
                let rect = self.page_arrow(direction);
                d.draw_text(label, (rect.x + 12.0) as i32, (rect.y + rect.height * 0.4) as i32, 30, Color::WHITE);
            }
        }

        for (index, slot) in self.pager.visible_range().zip(0..) {
            let rect = self.thumbnail_rect(slot);
            let Some(slide) = self.carousel.slides().get(index) else {
                continue;
            };
            match textures.get(&slide.image) {
                Some(texture) => d.draw_texture_pro(
                    texture,
                    Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                    rect,
                    Vector2::new(0.0, 0.0),
                    0.0,
                    Color::WHITE,
                ),
                None => d.draw_rectangle_rec(rect, Color::new(50, 50, 56, 255)),
            }
            if slide.is_active() {
                d.draw_rectangle_lines_ex(rect, 3.0, Color::GOLD);
            }
        }
    }
}
