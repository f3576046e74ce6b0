use dancequiz::{CatalogError, CatalogLoadError, ClipCatalog, DanceType, Session, demo_catalog};
use rand::SeedableRng;

#[test]
fn demo_catalog_round_trips_through_json() {
    let catalog = demo_catalog();
    let json = serde_json::to_string(&catalog).expect("catalog should serialize");

    let decoded = ClipCatalog::from_json_str(&json).expect("serialized catalog should load");
    assert_eq!(decoded, catalog);
}

#[test]
fn session_from_loaded_catalog_uses_its_clips() {
    let json = r#"{
        "pools": {
            "Waltz": ["w.mp3"],
            "Minuet": ["m.mp3"],
            "Trio": ["t.mp3"],
            "Laendler": ["l.mp3"],
            "Deutscher": ["d.mp3"],
            "Ecossaise": ["e.mp3"]
        }
    }"#;
    let catalog = ClipCatalog::from_json_str(json).expect("catalog should parse");
    let mut rng = rand::rngs::StdRng::seed_from_u64(21);

    let session = Session::new(&mut rng, &catalog).expect("session should start");

    assert_eq!(session.selected_clip(DanceType::Laendler), "l.mp3");
    assert_eq!(
        catalog.dance_of(session.current_clip()),
        Some(session.current_dance())
    );
}

#[test]
fn incomplete_catalog_errors_surface() {
    let json = r#"{ "pools": { "Waltz": ["w.mp3"] } }"#;

    let error = ClipCatalog::from_json_str(json).expect_err("most pools are missing");

    assert_eq!(
        error,
        CatalogLoadError::Invalid {
            path: "<inline>".to_string(),
            source: CatalogError::MissingPool {
                dance: DanceType::Minuet
            },
        }
    );
}
