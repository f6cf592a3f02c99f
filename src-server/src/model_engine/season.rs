// FICHIER : src-server/src/model_engine/season.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Temps liturgique. Énumération fermée ; les libellés traduits relèvent
/// de la couche d'affichage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiturgicalSeason {
    Advent,
    Christmas,
    Lent,
    Easter,
    Ordinary,
}

impl LiturgicalSeason {
    pub const ALL: [LiturgicalSeason; 5] = [
        LiturgicalSeason::Advent,
        LiturgicalSeason::Christmas,
        LiturgicalSeason::Lent,
        LiturgicalSeason::Easter,
        LiturgicalSeason::Ordinary,
    ];

    /// Valeurs stockées, dans l'ordre de `ALL`.
    pub const VALUES: [&'static str; 5] = ["advent", "christmas", "lent", "easter", "ordinary"];

    pub fn as_str(&self) -> &'static str {
        match self {
            LiturgicalSeason::Advent => "advent",
            LiturgicalSeason::Christmas => "christmas",
            LiturgicalSeason::Lent => "lent",
            LiturgicalSeason::Easter => "easter",
            LiturgicalSeason::Ordinary => "ordinary",
        }
    }

    /// Libellé anglais par défaut.
    pub fn default_label(&self) -> &'static str {
        match self {
            LiturgicalSeason::Advent => "Advent",
            LiturgicalSeason::Christmas => "Christmas",
            LiturgicalSeason::Lent => "Lent",
            LiturgicalSeason::Easter => "Easter",
            LiturgicalSeason::Ordinary => "Ordinary Time",
        }
    }
}

impl FromStr for LiturgicalSeason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|season| season.as_str() == s)
            .ok_or_else(|| format!("Value '{}' is not a valid choice.", s))
    }
}

impl fmt::Display for LiturgicalSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_match_variants() {
        for (season, value) in LiturgicalSeason::ALL.iter().zip(LiturgicalSeason::VALUES) {
            assert_eq!(season.as_str(), value);
            assert_eq!(value.parse::<LiturgicalSeason>().unwrap(), *season);
            assert_eq!(
                serde_json::to_value(season).unwrap(),
                serde_json::Value::String(value.to_string())
            );
        }
    }

    #[test]
    fn test_unknown_season() {
        let err = "I am invalid".parse::<LiturgicalSeason>().unwrap_err();
        assert!(err.contains("is not a valid choice"));
        assert!("Advent".parse::<LiturgicalSeason>().is_err());
        assert_eq!(LiturgicalSeason::Ordinary.default_label(), "Ordinary Time");
    }
}
