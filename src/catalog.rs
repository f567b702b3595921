//! Artifact and slideshow records, and the fallback content shown when
//! nothing can be loaded.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::constants::*;
use crate::slide::{Slide, SlideSet};
use crate::texture_loader::load_sorted_image_paths;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no images found in {0}")]
    NoImages(PathBuf),
    #[error("unknown search field '{0}' (expected name, category, date or description)")]
    UnknownSearchField(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideshowImage {
    pub image_path: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    #[serde(alias = "title")]
    pub object_head: String,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub collection_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub gallery: Option<String>,
}

impl Artifact {
    pub fn image(&self) -> &str {
        self.images.first().map(String::as_str).unwrap_or(PLACEHOLDER_IMAGE)
    }

    fn to_slide(&self) -> Slide {
        let mut slide = Slide::new(self.image(), &self.object_head).with_artifact_id(&self.id);
        if let Some(description) = &self.description {
            slide = slide.with_description(description);
        }
        slide
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryMeta {
    pub title: String,
    pub description: String,
}

/// Artifact column a visitor search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Category,
    Date,
    Description,
}

impl FromStr for SearchField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SearchField::Name),
            "category" => Ok(SearchField::Category),
            "date" => Ok(SearchField::Date),
            "description" => Ok(SearchField::Description),
            other => Err(CatalogError::UnknownSearchField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub slideshow_images: Vec<SlideshowImage>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub galleries: BTreeMap<String, GalleryMeta>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text).map_err(|source| CatalogError::Json { path: path.to_path_buf(), source })
    }

    /// Build a catalog from the images of a directory, captioned by file stem.
    pub fn from_directory(dir: &Path) -> Result<Self, CatalogError> {
        let paths = load_sorted_image_paths(dir).map_err(|_| CatalogError::NoImages(dir.to_path_buf()))?;

        let mut catalog = Catalog::default();
        for (i, path) in paths.iter().enumerate() {
            let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let caption = path.file_stem().and_then(|s| s.to_str()).unwrap_or(file_name).to_string();
            catalog.slideshow_images.push(SlideshowImage {
                image_path: file_name.to_string(),
                caption: caption.clone(),
            });
            catalog.artifacts.push(Artifact {
                id: (i + 1).to_string(),
                object_head: caption,
                object_type: None,
                collection_date: None,
                description: None,
                images: vec![file_name.to_string()],
                gallery: Some(DEFAULT_GALLERY.to_string()),
            });
        }
        Ok(catalog)
    }

    /// Load from a JSON document or an image directory, substituting the
    /// fallback content when that fails or yields no slideshow images.
    pub fn load_or_fallback(source: Option<&Path>) -> Self {
        let Some(source) = source else {
            info!("no catalog source given, using fallback content");
            return Self::fallback();
        };

        let loaded = if source.is_dir() {
            Self::from_directory(source)
        } else {
            Self::load(source)
        };

        match loaded {
            Ok(catalog) if !catalog.slideshow_images.is_empty() => {
                info!(
                    source = %source.display(),
                    images = catalog.slideshow_images.len(),
                    artifacts = catalog.artifacts.len(),
                    "catalog loaded"
                );
                catalog
            }
            Ok(_) => {
                warn!(source = %source.display(), "catalog has no slideshow images, using fallback content");
                Self::fallback()
            }
            Err(e) => {
                warn!(error = %e, "using fallback content");
                Self::fallback()
            }
        }
    }

    pub fn hero_slides(&self) -> SlideSet {
        self.slideshow_images.iter().map(|image| Slide::new(&image.image_path, &image.caption)).collect()
    }

    pub fn featured_slides(&self) -> SlideSet {
        self.artifacts.iter().map(Artifact::to_slide).collect()
    }

    /// Image-only rotation for the visitor dashboard.
    pub fn dashboard_slides(&self) -> SlideSet {
        self.artifacts
            .iter()
            .filter(|a| !a.images.is_empty())
            .map(|a| Slide::new(a.image(), &a.object_head))
            .collect()
    }

    /// Artifacts of one gallery; an unknown or empty gallery shows the default one.
    pub fn gallery_slides(&self, key: &str) -> SlideSet {
        let slides: SlideSet = self.gallery_artifacts(key).map(Artifact::to_slide).collect();
        if slides.is_empty() && key != DEFAULT_GALLERY {
            warn!(gallery = key, "gallery has no artifacts, showing {}", DEFAULT_GALLERY);
            return self.gallery_artifacts(DEFAULT_GALLERY).map(Artifact::to_slide).collect();
        }
        slides
    }

    pub fn gallery_meta(&self, key: &str) -> Option<&GalleryMeta> {
        self.galleries.get(key).or_else(|| self.galleries.get(DEFAULT_GALLERY))
    }

    /// Case-insensitive substring search over one artifact column. An empty
    /// value matches everything.
    pub fn search(&self, field: SearchField, value: &str) -> SlideSet {
        let needle = value.trim().to_lowercase();
        let results: SlideSet = self
            .artifacts
            .iter()
            .filter(|a| {
                if needle.is_empty() {
                    return true;
                }
                let haystack = match field {
                    SearchField::Name => Some(a.object_head.as_str()),
                    SearchField::Category => a.object_type.as_deref(),
                    SearchField::Date => a.collection_date.as_deref(),
                    SearchField::Description => a.description.as_deref(),
                };
                haystack.is_some_and(|h| h.to_lowercase().contains(&needle))
            })
            .map(Artifact::to_slide)
            .collect();
        info!(?field, value, results = results.len(), "artifact search");
        results
    }

    fn gallery_artifacts<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Artifact> + 'a {
        self.artifacts.iter().filter(move |a| a.gallery.as_deref() == Some(key))
    }

    pub fn fallback() -> Self {
        let hero = [
            ("img1.jpg", "Liberation War Museum"),
            ("img2.jpg", "Historical Artifacts"),
            ("img3.jpg", "Freedom Fighters Memorial"),
        ];

        let artifacts = [
            ("1", "gallery1", "Freedom Fighter's Personal Diary", "A handwritten diary documenting the liberation struggle", "img1.jpg"),
            ("2", "gallery1", "Mukti Bahini Uniform", "Original uniform worn by freedom fighters", "img2.jpg"),
            ("3", "gallery1", "Liberation War Documents", "Official documents from the war period", "img3.jpg"),
            ("4", "gallery1", "War Photographs", "Historical photographs from 1971", "img4.jpg"),
            ("5", "gallery1", "Radio Equipment", "Communication equipment used during the war", "img5.jpg"),
            ("6", "gallery1", "Liberation War Medals", "Medals awarded to freedom fighters", "img1.jpg"),
            ("7", "gallery2", "Historical Weapons", "Weapons used during the liberation war", "img2.jpg"),
            ("8", "gallery2", "War Maps", "Strategic maps from the liberation period", "img3.jpg"),
            ("9", "gallery2", "Freedom Fighter Letters", "Personal letters from the war period", "img4.jpg"),
            ("10", "gallery3", "Liberation War Artifacts", "Various artifacts from the liberation struggle", "img5.jpg"),
            ("11", "gallery3", "Historical Newspapers", "Newspapers from the liberation period", "img1.jpg"),
            ("12", "gallery3", "War Memorabilia", "Personal items from freedom fighters", "img2.jpg"),
        ];

        let galleries = [
            ("gallery1", "Archaeology Collections", "Sculpture, architecture and everyday objects from the ancient and medieval dynasties, arranged by period and region."),
            ("gallery2", "Liberation War Gallery", "Artifacts and documents from the Liberation War of Bangladesh in 1971: personal items, weapons, documents and photographs that tell the story of the struggle for independence."),
            ("gallery3", "Historical Documents Gallery", "Historical documents, letters and newspapers from the liberation period, showing the political and social context of the time."),
        ];

        Self {
            slideshow_images: hero
                .iter()
                .map(|(image, caption)| SlideshowImage {
                    image_path: image.to_string(),
                    caption: caption.to_string(),
                })
                .collect(),
            artifacts: artifacts
                .iter()
                .map(|(id, gallery, title, description, image)| Artifact {
                    id: id.to_string(),
                    object_head: title.to_string(),
                    object_type: None,
                    collection_date: None,
                    description: Some(description.to_string()),
                    images: vec![image.to_string()],
                    gallery: Some(gallery.to_string()),
                })
                .collect(),
            galleries: galleries
                .iter()
                .map(|(key, title, description)| {
                    (key.to_string(), GalleryMeta { title: title.to_string(), description: description.to_string() })
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn fallback_has_three_hero_slides() {
        let slides = Catalog::fallback().hero_slides();
        let captions: Vec<_> = slides.iter().map(|s| s.caption.as_str()).collect();
        assert_eq!(captions, ["Liberation War Museum", "Historical Artifacts", "Freedom Fighters Memorial"]);
    }

    #[test]
    fn unknown_gallery_falls_back_to_default() {
        let catalog = Catalog::fallback();
        assert_eq!(catalog.gallery_slides("gallery2").len(), 3);
        assert_eq!(catalog.gallery_slides("nowhere").len(), 6);
        assert_eq!(catalog.gallery_meta("nowhere").unwrap().title, "Archaeology Collections");
    }

    #[test]
    fn search_matches_field_case_insensitively() {
        let mut catalog = Catalog::fallback();
        catalog.artifacts[3].object_type = Some("Photograph".into());

        assert_eq!(catalog.search(SearchField::Name, "war").len(), 6);
        assert_eq!(catalog.search(SearchField::Category, "PHOTO").len(), 1);
        assert_eq!(catalog.search(SearchField::Date, "1971").len(), 0);
        assert_eq!(catalog.search(SearchField::Description, "").len(), 12);
    }

    #[test]
    fn search_field_parses() {
        assert_eq!("Category".parse::<SearchField>().unwrap(), SearchField::Category);
        assert!(matches!("colour".parse::<SearchField>(), Err(CatalogError::UnknownSearchField(_))));
    }

    #[test]
    fn artifact_without_images_uses_placeholder() {
        let json = r#"{ "artifacts": [ { "id": "9", "title": "Old Coins" } ] }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        let slides = catalog.featured_slides();
        assert_eq!(slides[0].image, PathBuf::from(PLACEHOLDER_IMAGE));
        assert_eq!(slides[0].caption, "Old Coins");
        assert!(catalog.dashboard_slides().is_empty());
    }

    #[test]
    fn broken_json_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Catalog::load(&path), Err(CatalogError::Json { .. })));
        assert_eq!(Catalog::load_or_fallback(Some(path.as_path())), Catalog::fallback());
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert_eq!(Catalog::load_or_fallback(Some(path.as_path())), Catalog::fallback());
        assert_eq!(Catalog::load_or_fallback(None), Catalog::fallback());
    }

    #[test]
    fn directory_images_become_slides_in_name_order() {
        let dir = tempdir().unwrap();
        for name in ["b_uniform.JPG", "a_diary.png", "notes.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let catalog = Catalog::load_or_fallback(Some(dir.path()));
        let captions: Vec<_> = catalog.hero_slides().iter().map(|s| s.caption.clone()).collect();
        assert_eq!(captions, ["a_diary", "b_uniform"]);
        assert_eq!(catalog.gallery_slides(DEFAULT_GALLERY).len(), 2);
    }
}
