use raylib::prelude::*;

use crate::catalog::Catalog;

pub trait Engine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, catalog: &Catalog) -> bool;
    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> bool;
}
