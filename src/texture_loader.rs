use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::slide::SlideSet;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

fn extension_of(path: &Path) -> String {
    path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase()
}

// --- Image files of a directory, sorted by file name ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path).with_context(|| format!("failed to read directory {}", dir_path.display()))?;

    for entry in entries {
        let path = entry.context("failed to read directory entry")?.path();
        if path.is_file() && IMAGE_EXTENSIONS.contains(&extension_of(&path).as_str()) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        bail!("no image files found in {}", dir_path.display());
    }
    Ok(paths)
}

// EXIF orientation of a JPEG, 1 (upright) when absent or unreadable
fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) => values.first().copied().unwrap_or(1),
            _ => 1,
        },
        Err(e) => {
            warn!(path = %image_path.display(), error = %e, "could not read EXIF data");
            1
        }
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(rl: &mut RaylibHandle, thread: &RaylibThread, image_path: &Path) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path).with_context(|| format!("failed to read {}", image_path.display()))?;

    let extension = extension_of(image_path);
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(image_path, &file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{}", extension), &file_bytes)
        .map_err(|e| anyhow::anyhow!("failed to decode {}: {}", image_path.display(), e))?;

    // 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW; flipped orientations are ignored
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    debug!(path = %image_path.display(), orientation, "image decoded");

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow::anyhow!("failed to create texture for {}: {}", image_path.display(), e))
}

/// Textures keyed by the image reference of a slide, loaded once per image.
#[derive(Default)]
pub struct TextureCache {
    asset_dir: PathBuf,
    textures: HashMap<PathBuf, Texture2D>,
    failed: HashSet<PathBuf>,
}

impl TextureCache {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            ..Default::default()
        }
    }

    /// Load every image of `slides` not seen before. Failures are logged once
    /// and the slide is drawn as a placeholder.
    pub fn load_slides(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, slides: &SlideSet) {
        for slide in slides {
            if self.textures.contains_key(&slide.image) || self.failed.contains(&slide.image) {
                continue;
            }
            match load_texture_with_exif_rotation(rl, thread, &slide.image_path(&self.asset_dir)) {
                Ok(texture) => {
                    self.textures.insert(slide.image.clone(), texture);
                }
                Err(e) => {
                    warn!(image = %slide.image.display(), error = %e, "failed to load image");
                    self.failed.insert(slide.image.clone());
                }
            }
        }
    }

    pub fn get(&self, image: &Path) -> Option<&Texture2D> {
        self.textures.get(image)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn only_images_are_listed_in_name_order() {
        let dir = tempdir().unwrap();
        for name in ["c.gif", "a.JPEG", "b.txt", "b.bmp"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let names: Vec<_> = load_sorted_image_paths(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.JPEG", "b.bmp", "c.gif"]);
    }

    #[test]
    fn directory_without_images_is_an_error() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("readme.md")).unwrap();
        assert!(load_sorted_image_paths(dir.path()).is_err());
    }

    #[test]
    fn garbage_jpeg_reads_as_upright() {
        assert_eq!(read_orientation(Path::new("x.jpg"), b"not an image"), 1);
    }
}
