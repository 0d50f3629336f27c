//! CEFR language levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CEFR proficiency level attached to reading texts and listening exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl LanguageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageLevel::A1 => "a1",
            LanguageLevel::A2 => "a2",
            LanguageLevel::B1 => "b1",
            LanguageLevel::B2 => "b2",
            LanguageLevel::C1 => "c1",
            LanguageLevel::C2 => "c2",
        }
    }

    pub fn all() -> [LanguageLevel; 6] {
        [
            LanguageLevel::A1,
            LanguageLevel::A2,
            LanguageLevel::B1,
            LanguageLevel::B2,
            LanguageLevel::C1,
            LanguageLevel::C2,
        ]
    }
}

impl FromStr for LanguageLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a1" => Ok(LanguageLevel::A1),
            "a2" => Ok(LanguageLevel::A2),
            "b1" => Ok(LanguageLevel::B1),
            "b2" => Ok(LanguageLevel::B2),
            "c1" => Ok(LanguageLevel::C1),
            "c2" => Ok(LanguageLevel::C2),
            _ => Err(format!("Invalid language level: {}", s)),
        }
    }
}

impl fmt::Display for LanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(LanguageLevel::from_str("b2").unwrap(), LanguageLevel::B2);
        assert_eq!(LanguageLevel::from_str("B2").unwrap(), LanguageLevel::B2);
        assert!(LanguageLevel::from_str("d1").is_err());
    }

    #[test]
    fn test_ordering_follows_cefr_scale() {
        assert!(LanguageLevel::A1 < LanguageLevel::A2);
        assert!(LanguageLevel::B2 < LanguageLevel::C1);
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&LanguageLevel::C1).unwrap();
        assert_eq!(json, "\"c1\"");
        let level: LanguageLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(level, LanguageLevel::C1);
    }

    #[test]
    fn test_all_is_ordered() {
        let all = LanguageLevel::all();
        assert_eq!(all.len(), 6);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }
}
