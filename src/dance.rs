use std::fmt;
use std::str::FromStr;

/// Dance category a clip belongs to. Used both as answer option and as the
/// label the answer is checked against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum DanceType {
    Waltz,
    Minuet,
    Trio,
    #[serde(rename = "Ländler", alias = "Laendler", alias = "Landler")]
    Laendler,
    Deutscher,
    Ecossaise,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown dance type: {name}")]
pub struct UnknownDance {
    pub name: String,
}

impl DanceType {
    /// All dance types in catalog order.
    pub const ALL: [DanceType; 6] = [
        DanceType::Waltz,
        DanceType::Minuet,
        DanceType::Trio,
        DanceType::Laendler,
        DanceType::Deutscher,
        DanceType::Ecossaise,
    ];

    /// Label shown to the player.
    pub fn label(self) -> &'static str {
        match self {
            DanceType::Waltz => "Waltz",
            DanceType::Minuet => "Minuet",
            DanceType::Trio => "Trio",
            DanceType::Laendler => "Ländler",
            DanceType::Deutscher => "Deutscher",
            DanceType::Ecossaise => "Ecossaise",
        }
    }

    /// Lowercase ASCII identifier, used for form values and directory names.
    pub fn slug(self) -> &'static str {
        match self {
            DanceType::Waltz => "waltz",
            DanceType::Minuet => "minuet",
            DanceType::Trio => "trio",
            DanceType::Laendler => "laendler",
            DanceType::Deutscher => "deutscher",
            DanceType::Ecossaise => "ecossaise",
        }
    }
}

impl fmt::Display for DanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DanceType {
    type Err = UnknownDance;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();

        let dance = match normalized.as_str() {
            "waltz" => DanceType::Waltz,
            "minuet" => DanceType::Minuet,
            "trio" => DanceType::Trio,
            "ländler" | "laendler" | "landler" => DanceType::Laendler,
            "deutscher" => DanceType::Deutscher,
            "ecossaise" | "écossaise" => DanceType::Ecossaise,
            _ => {
                return Err(UnknownDance {
                    name: value.to_string(),
                });
            }
        };

        Ok(dance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_keep_umlaut() {
        assert_eq!(DanceType::Laendler.label(), "Ländler");
        assert_eq!(DanceType::Laendler.to_string(), "Ländler");
    }

    #[test]
    fn parses_labels_and_slugs() {
        for dance in DanceType::ALL {
            assert_eq!(dance.label().parse::<DanceType>(), Ok(dance));
            assert_eq!(dance.slug().parse::<DanceType>(), Ok(dance));
        }
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(" MINUET ".parse::<DanceType>(), Ok(DanceType::Minuet));
        assert_eq!("Landler".parse::<DanceType>(), Ok(DanceType::Laendler));
    }

    #[test]
    fn rejects_unknown_names() {
        let error = "polka".parse::<DanceType>().expect_err("polka is not offered");
        assert_eq!(
            error,
            UnknownDance {
                name: "polka".to_string()
            }
        );
    }

    #[test]
    fn serde_uses_display_label() {
        let json = serde_json::to_string(&DanceType::Laendler).expect("dance should serialize");
        assert_eq!(json, "\"Ländler\"");

        let parsed: DanceType =
            serde_json::from_str("\"Laendler\"").expect("ascii alias should deserialize");
        assert_eq!(parsed, DanceType::Laendler);
    }

    #[test]
    fn all_lists_every_type_once() {
        let mut sorted = DanceType::ALL.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 6);
    }
}
