use std::ops::Index;
use std::path::{Path, PathBuf};

/// One renderable unit of a carousel: an image plus its caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub image: PathBuf,
    pub caption: String,
    pub description: Option<String>,
    pub artifact_id: Option<String>,

    // Owned by the carousel: exactly one slide of a running set is active
    pub(crate) active: bool,
}

impl Slide {
    pub fn new(image: impl Into<PathBuf>, caption: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            caption: caption.into(),
            description: None,
            artifact_id: None,
            active: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_artifact_id(mut self, id: impl Into<String>) -> Self {
        self.artifact_id = Some(id.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Resolve the image against an asset directory unless it is already absolute.
    pub fn image_path(&self, asset_dir: &Path) -> PathBuf {
        if self.image.is_absolute() {
            self.image.clone()
        } else {
            asset_dir.join(&self.image)
        }
    }
}

/// Ordered slides of one carousel. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideSet {
    slides: Vec<Slide>,
}

impl SlideSet {
    pub fn new(slides: Vec<Slide>) -> Self {
        let mut set = Self { slides };
        set.clear_active();
        set
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }

    pub fn active_count(&self) -> usize {
        self.slides.iter().filter(|s| s.active).count()
    }

    pub(crate) fn clear_active(&mut self) {
        for slide in self.slides.iter_mut() {
            slide.active = false;
        }
    }

    pub(crate) fn set_active(&mut self, index: usize, active: bool) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.active = active;
        }
    }
}

impl Index<usize> for SlideSet {
    type Output = Slide;

    fn index(&self, index: usize) -> &Slide {
        &self.slides[index]
    }
}

impl FromIterator<Slide> for SlideSet {
    fn from_iter<I: IntoIterator<Item = Slide>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SlideSet {
    type Item = &'a Slide;
    type IntoIter = std::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_starts_with_nothing_active() {
        let mut a = Slide::new("a.jpg", "A");
        a.active = true;
        let set = SlideSet::new(vec![a, Slide::new("b.jpg", "B")]);
        assert_eq!(set.active_count(), 0);
        assert_eq!(set[1].caption, "B");
    }

    #[test]
    fn relative_images_resolve_against_asset_dir() {
        let slide = Slide::new("img1.jpg", "Museum");
        assert_eq!(slide.image_path(Path::new("assets/images")), PathBuf::from("assets/images/img1.jpg"));
    }
}
