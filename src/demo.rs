use std::collections::BTreeMap;

use crate::{ClipCatalog, DanceType};

#[cfg(test)]
use crate::{DEFAULT_CLIP_DIR, Session};
#[cfg(test)]
use rand::SeedableRng;

fn demo_pools() -> Vec<(DanceType, Vec<&'static str>)> {
    vec![
        (
            DanceType::Waltz,
            vec![
                "schubert_d365_02_waltz.mp3",
                "schubert_d779_13_waltz.mp3",
                "schubert_d145_06_waltz.mp3",
                "lanner_op7_waltz.mp3",
            ],
        ),
        (
            DanceType::Minuet,
            vec![
                "mozart_k315g_01_minuet.mp3",
                "haydn_hob9_11_minuet.mp3",
                "beethoven_woo10_02_minuet.mp3",
            ],
        ),
        (
            DanceType::Trio,
            vec![
                "mozart_k315g_01_trio.mp3",
                "haydn_hob9_11_trio.mp3",
                "beethoven_woo10_02_trio.mp3",
            ],
        ),
        (
            DanceType::Laendler,
            vec![
                "schubert_d366_01_laendler.mp3",
                "schubert_d734_04_laendler.mp3",
                "schubert_d790_07_laendler.mp3",
            ],
        ),
        (
            DanceType::Deutscher,
            vec![
                "mozart_k509_02_deutscher.mp3",
                "schubert_d783_05_deutscher.mp3",
                "beethoven_woo13_03_deutscher.mp3",
            ],
        ),
        (
            DanceType::Ecossaise,
            vec![
                "schubert_d529_03_ecossaise.mp3",
                "beethoven_woo83_01_ecossaise.mp3",
                "schubert_d781_08_ecossaise.mp3",
            ],
        ),
    ]
}

/// Built-in catalog used when no catalog file is supplied.
pub fn demo_catalog() -> ClipCatalog {
    let pools: BTreeMap<DanceType, Vec<String>> = demo_pools()
        .into_iter()
        .map(|(dance, clips)| (dance, clips.into_iter().map(String::from).collect()))
        .collect();

    ClipCatalog::from_checked_pools(pools)
}

/// Parses a fetched catalog document. Without a document, or when it does not
/// parse, the demo catalog is used and the load error is returned for display.
pub fn catalog_or_demo(document: Option<&str>) -> (ClipCatalog, Option<String>) {
    let Some(json) = document else {
        return (demo_catalog(), None);
    };

    match ClipCatalog::from_json_str(json) {
        Ok(catalog) => (catalog, None),
        Err(error) => {
            tracing::warn!(%error, "catalog document is invalid, using demo catalog");
            (
                demo_catalog(),
                Some(format!("{}; playing the demo clips instead", error)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn demo_pools_pass_catalog_validation() {
        let validated = ClipCatalog::new(demo_pools()).expect("demo pools should validate");
        assert_eq!(validated, demo_catalog());
    }

    #[test]
    fn missing_catalog_document_uses_demo_quietly() {
        let (catalog, error) = catalog_or_demo(None);

        assert_eq!(catalog, demo_catalog());
        assert_eq!(error, None);
    }

    #[test]
    fn broken_catalog_document_reports_error() {
        let (catalog, error) = catalog_or_demo(Some("{bad"));

        assert_eq!(catalog, demo_catalog());
        let message = error.expect("parse failure should be reported");
        assert!(message.starts_with("failed to parse catalog at <inline>"));
        assert!(message.ends_with("playing the demo clips instead"));
    }

    #[test]
    fn valid_catalog_document_is_used() {
        let json = serde_json::to_string(&demo_catalog()).expect("catalog should serialize");
        let (catalog, error) = catalog_or_demo(Some(&json));

        assert_eq!(catalog, demo_catalog());
        assert_eq!(error, None);
    }

    #[test]
    fn demo_catalog_covers_every_dance() {
        let catalog = demo_catalog();

        for dance in DanceType::ALL {
            assert!(!catalog.pool(dance).is_empty());
        }
    }

    #[test]
    fn demo_clip_names_mention_their_dance() {
        let catalog = demo_catalog();

        for dance in DanceType::ALL {
            for clip in catalog.pool(dance) {
                assert!(clip.ends_with(&format!("_{}.mp3", dance.slug())));
            }
        }
    }

    #[test]
    fn demo_catalog_supports_full_session() {
        let mut rng = StdRng::seed_from_u64(10);
        let session = Session::new(&mut rng, &demo_catalog()).expect("demo session should start");

        assert_eq!(session.total_rounds(), DanceType::ALL.len());
        assert!(
            session
                .current_clip_path(DEFAULT_CLIP_DIR)
                .starts_with("audio/")
        );
    }
}
