use proxy_fetch::*;
use proxy_sheets::{ImageResolver, parse_deck_list};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Serves canned bytes and records every name it was asked for
#[derive(Clone, Default)]
struct FakeSource {
    images: HashMap<String, Vec<u8>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeSource {
    fn with(names: &[&str]) -> Self {
        Self {
            images: names
                .iter()
                .map(|n| (n.to_string(), format!("image of {}", n).into_bytes()))
                .collect(),
            ..Default::default()
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl ImageSource for FakeSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(name.to_string());
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(name.to_string()))
    }
}

fn no_delay() -> FetchOptions {
    FetchOptions {
        request_delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn test_fetches_each_missing_card_once() {
    let dir = tempfile::tempdir().unwrap();
    let images_dir = dir.path().join("images");
    let deck = parse_deck_list("10 Swamp\n1 Urza's Tower\n2 Swamp\n");
    let source = FakeSource::with(&["Swamp", "Urza's Tower"]);

    let report = fetch_missing_images(&deck, &images_dir, source.clone(), &no_delay())
        .await
        .unwrap();

    assert_eq!(source.requests(), ["Swamp", "Urza's Tower"]);
    assert_eq!(report.fetched, ["Swamp", "Urza's Tower"]);
    assert_eq!(report.already_cached, 0);
    assert!(report.failed.is_empty());

    let resolver = ImageResolver::new(&images_dir);
    let tower = resolver.resolve("Urza's Tower").unwrap();
    assert!(tower.ends_with("Urzas Tower.jpg"));
    assert_eq!(std::fs::read(tower).unwrap(), b"image of Urza's Tower");
}

#[tokio::test]
async fn test_cached_cards_are_not_requested() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Island.jpg"), b"cached").unwrap();
    let deck = parse_deck_list("4 Island\n4 Forest\n");
    let source = FakeSource::with(&["Island", "Forest"]);

    let report = fetch_missing_images(&deck, dir.path(), source.clone(), &no_delay())
        .await
        .unwrap();

    assert_eq!(source.requests(), ["Forest"]);
    assert_eq!(report.already_cached, 1);
    assert_eq!(
        std::fs::read(dir.path().join("Island.jpg")).unwrap(),
        b"cached"
    );
}

#[tokio::test]
async fn test_failures_are_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let deck = parse_deck_list("1 Mountain of Doom\n1 Plains\n");
    let source = FakeSource::with(&["Plains"]);

    let report = fetch_missing_images(&deck, dir.path(), source, &no_delay())
        .await
        .unwrap();

    assert_eq!(report.fetched, ["Plains"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "Mountain of Doom");
    assert!(!dir.path().join("Mountain of Doom.jpg").exists());
}

#[test]
fn test_blocking_fetch_with_empty_deck() {
    let dir = tempfile::tempdir().unwrap();
    let source = FakeSource::default();

    let report = fetch_missing_images_blocking(&[], dir.path(), &source, &no_delay());
    assert_eq!(report, FetchReport::default());
    assert!(source.requests().is_empty());
}

#[tokio::test]
async fn test_names_outside_cache_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let images_dir = dir.path().join("images");
    let deck = parse_deck_list("1 Fire // Ice\n1 ../../escape\n1 Plains\n");
    let source = FakeSource::with(&["Fire // Ice", "../../escape", "Plains"]);

    let report = fetch_missing_images(&deck, &images_dir, source.clone(), &no_delay())
        .await
        .unwrap();

    assert_eq!(source.requests(), ["Plains"]);
    assert_eq!(report.fetched, ["Plains"]);
    let refused: Vec<&str> = report.failed.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(refused, ["Fire // Ice", "../../escape"]);
    assert!(!images_dir.join("Fire ").exists());
    assert!(!dir.path().join("escape.jpg").exists());
}

#[tokio::test]
async fn test_cache_holds_only_finished_images() {
    let dir = tempfile::tempdir().unwrap();
    let deck = parse_deck_list("2 Island\n1 Forest\n1 Wastes\n");
    let source = FakeSource::with(&["Island", "Forest"]);

    fetch_missing_images(&deck, dir.path(), source, &no_delay())
        .await
        .unwrap();

    let mut files: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files, ["Forest.jpg", "Island.jpg"]);
}
