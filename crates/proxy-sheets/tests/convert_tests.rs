use image::{ImageFormat, Rgb as Pixel, RgbImage};
use lopdf::Document;
use proxy_sheets::*;
use std::path::Path;
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    options: ProxyOptions,
}

fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let options = ProxyOptions {
        decks_dir: dir.path().join("decks"),
        images_dir: dir.path().join("images"),
        output_dir: dir.path().join("output"),
        ..Default::default()
    };
    std::fs::create_dir_all(&options.decks_dir).unwrap();
    std::fs::create_dir_all(&options.images_dir).unwrap();
    Workspace { _dir: dir, options }
}

fn write_deck(options: &ProxyOptions, file_name: &str, text: &str) -> std::path::PathBuf {
    let path = options.decks_dir.join(file_name);
    std::fs::write(&path, text).unwrap();
    path
}

fn write_card_image(images_dir: &Path, name: &str) {
    RgbImage::from_pixel(8, 11, Pixel([30, 60, 90]))
        .save_with_format(image_path(images_dir, name), ImageFormat::Jpeg)
        .unwrap();
}

fn page_count(path: &Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}

#[tokio::test]
async fn test_convert_swamp_and_mountain() {
    let ws = workspace();
    write_card_image(&ws.options.images_dir, "Swamp");
    write_card_image(&ws.options.images_dir, "Mountain of Doom");
    let deck = write_deck(&ws.options, "mono black.txt", "10 Swamp\n1 Mountain of Doom\n");

    let report = convert(&deck, &ws.options).await.unwrap();

    assert_eq!(report.cards, 11);
    assert_eq!(report.distinct_cards, 2);
    assert_eq!(report.print.pages, 2);
    assert_eq!(report.print.images_drawn, 11);
    assert_eq!(report.overview.pages, 1);
    assert_eq!(report.overview.images_drawn, 2);
    assert!(report.missing_images().is_empty());

    assert!(report.outputs.print.ends_with("mono black_print.pdf"));
    assert!(report.outputs.overview.ends_with("mono black_overview.pdf"));
    assert_eq!(page_count(&report.outputs.print), 2);
    assert_eq!(page_count(&report.outputs.overview), 1);
}

#[tokio::test]
async fn test_overview_contains_count_badges() {
    let ws = workspace();
    write_card_image(&ws.options.images_dir, "Swamp");
    let deck = write_deck(&ws.options, "d.txt", "10 Swamp\n1 Mountain of Doom\n");

    let report = convert(&deck, &ws.options).await.unwrap();

    let doc = Document::load(&report.outputs.overview).unwrap();
    let page_id = doc.get_pages()[&1];
    let content = String::from_utf8(doc.get_page_content(page_id).unwrap()).unwrap();
    assert!(content.contains("(10x) Tj"));
    assert!(content.contains("(1x) Tj"));
}

#[tokio::test]
async fn test_missing_image_does_not_abort() {
    let ws = workspace();
    write_card_image(&ws.options.images_dir, "Island");
    let deck = write_deck(&ws.options, "d.txt", "4 Island\n4 Urza's Tower\n");

    let report = convert(&deck, &ws.options).await.unwrap();

    assert_eq!(report.print.pages, 1);
    assert_eq!(report.print.images_drawn, 4);
    assert_eq!(report.missing_images(), ["Urza's Tower"]);
    assert_eq!(page_count(&report.outputs.print), 1);
}

#[tokio::test]
async fn test_apostrophe_names_use_stripped_file() {
    let ws = workspace();
    write_card_image(&ws.options.images_dir, "Urza's Tower");
    assert!(ws.options.images_dir.join("Urzas Tower.jpg").exists());

    let deck = write_deck(&ws.options, "d.txt", "3 Urza's Tower\n");
    let report = convert(&deck, &ws.options).await.unwrap();
    assert_eq!(report.print.images_drawn, 3);
}

#[tokio::test]
async fn test_empty_deck_still_writes_documents() {
    let ws = workspace();
    let deck = write_deck(&ws.options, "empty.txt", "// nothing to see\n\n");

    let report = convert(&deck, &ws.options).await.unwrap();

    assert_eq!(report.cards, 0);
    assert_eq!(report.print.pages, 0);
    assert!(report.outputs.print.exists());
    assert_eq!(page_count(&report.outputs.print), 0);
    assert_eq!(page_count(&report.outputs.overview), 1);
}

#[tokio::test]
async fn test_exact_multiple_of_nine_has_no_trailing_page() {
    let ws = workspace();
    write_card_image(&ws.options.images_dir, "Forest");
    let deck = write_deck(&ws.options, "d.txt", "18 Forest\n");

    let report = convert(&deck, &ws.options).await.unwrap();
    assert_eq!(report.print.pages, 2);
    assert_eq!(page_count(&report.outputs.print), 2);
}

#[tokio::test]
async fn test_missing_deck_is_input_not_found() {
    let ws = workspace();
    let missing = ws.options.decks_dir.join("nope.txt");

    let err = convert(&missing, &ws.options).await.unwrap_err();
    match err {
        ProxyError::InputNotFound(path) => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!ws.options.output_dir.exists());
}

#[tokio::test]
async fn test_unwritable_output_is_save_failed() {
    let ws = workspace();
    let deck = parse_deck_list("1 Swamp\n");
    // A directory standing where the file should go
    let target = ws.options.output_dir.join("taken.pdf");
    std::fs::create_dir_all(&target).unwrap();

    let err = write_print_sheet(&deck, &ws.options, &target)
        .await
        .unwrap_err();
    match err {
        ProxyError::SaveFailed { path, .. } => assert_eq!(path, target),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_load_deck_with_bom() {
    let ws = workspace();
    let path = write_deck(&ws.options, "bom.txt", "\u{feff}2 Æther Vial\r\n1 Opt\r\n");

    let deck = load_deck(&path).await.unwrap();
    assert_eq!(deck.len(), 3);
    assert_eq!(deck.distinct()[0].name, "Æther Vial");
}

#[tokio::test]
async fn test_options_round_trip_through_json() {
    let ws = workspace();
    let path = ws.options.decks_dir.join("options.json");
    let options = ProxyOptions {
        card_width_mm: 62.5,
        page_fill: "#ffffff".parse().unwrap(),
        paper_size: PaperSize::A4,
        ..ws.options.clone()
    };

    options.save(&path).await.unwrap();
    let loaded = ProxyOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_unreadable_deck_names_its_path() {
    let ws = workspace();
    let path = ws.options.decks_dir.join("latin1_deck.txt");
    std::fs::write(&path, b"4 \xc6ther Vial\n").unwrap();

    let err = load_deck(&path).await.unwrap_err();
    match &err {
        ProxyError::Read { path: failed, .. } => assert_eq!(failed, &path),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("latin1_deck.txt"));
}

#[tokio::test]
async fn test_output_dir_failure_names_its_path() {
    let ws = workspace();
    let deck = write_deck(&ws.options, "d.txt", "1 Swamp\n");
    let blocker = ws.options.decks_dir.join("not_a_dir");
    std::fs::write(&blocker, b"file").unwrap();
    let options = ProxyOptions {
        output_dir: blocker.join("output"),
        ..ws.options.clone()
    };

    let err = convert(&deck, &options).await.unwrap_err();
    match &err {
        ProxyError::CreateDir { path, .. } => assert_eq!(path, &options.output_dir),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("not_a_dir"));
}
