use std::fs;
use std::time::Duration;

use artifact_carousel::{Carousel, CarouselKind, CarouselState, Catalog, Direction, Scheduler, SearchField, SlideSet};
use tempfile::tempdir;

const CATALOG: &str = r#"{
    "slideshow_images": [
        { "image_path": "hall.jpg", "caption": "Main Hall" },
        { "image_path": "pottery.jpg", "caption": "Ancient Pottery" },
        { "image_path": "coins.jpg", "caption": "Old Coins" }
    ],
    "artifacts": [
        { "id": "1", "object_head": "War Photo Album", "object_type": "Photograph", "collection_date": "1971-12-16", "images": ["album.jpg"], "gallery": "gallery3" },
        { "id": "2", "object_head": "Historic Document", "object_type": "Document", "images": [], "gallery": "gallery1" }
    ],
    "galleries": {
        "gallery1": { "title": "Documents", "description": "Papers" }
    }
}"#;

#[test]
fn catalog_drives_hero_rotation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, CATALOG).unwrap();

    let catalog = Catalog::load_or_fallback(Some(path.as_path()));
    let mut hero = Carousel::new(CarouselKind::Hero.name());
    hero.initialize(catalog.hero_slides(), Duration::from_millis(5000));

    assert_eq!(hero.active_slide().unwrap().caption, "Main Hall");

    // Two automatic ticks, then a manual step back postpones the next tick
    hero.update(Duration::from_millis(5000));
    hero.update(Duration::from_millis(5000));
    assert_eq!(hero.active_slide().unwrap().caption, "Old Coins");

    hero.update(Duration::from_millis(4000));
    hero.advance(Direction::Previous);
    hero.update(Duration::from_millis(4000));
    assert_eq!(hero.active_slide().unwrap().caption, "Ancient Pottery");

    hero.pause();
    hero.update(Duration::from_secs(60));
    hero.resume();
    assert_eq!(hero.current_index(), Some(1));
    assert_eq!(hero.scheduler().pending(), 1);
}

#[test]
fn search_results_replace_the_featured_set() {
    let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();
    let mut featured = Carousel::new(CarouselKind::Featured.name());
    featured.initialize(catalog.featured_slides(), CarouselKind::Featured.default_interval());
    featured.jump_to(1).unwrap();

    featured.initialize(catalog.search(SearchField::Date, "1971"), CarouselKind::Featured.default_interval());
    assert_eq!(featured.slides().len(), 1);
    assert_eq!(featured.current_index(), Some(0));
    assert_eq!(featured.active_slide().unwrap().artifact_id.as_deref(), Some("1"));

    featured.initialize(catalog.search(SearchField::Category, "sculpture"), CarouselKind::Featured.default_interval());
    assert_eq!(featured.state(), CarouselState::Empty);
    assert_eq!(featured.scheduler().pending(), 0);
    featured.advance(Direction::Next);
    assert_eq!(featured.current_index(), None);
}

#[test]
fn empty_slide_set_never_starts() {
    let mut carousel = Carousel::new("generic");
    carousel.initialize(SlideSet::default(), Duration::from_millis(5000));
    assert!(!carousel.update(Duration::from_secs(30)));
    assert_eq!(carousel.state(), CarouselState::Empty);
}
