//! The fixed catalog of egg doneness presets.
//!
//! Order is display order and carries no other meaning.

use serde::Serialize;

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Duration in whole minutes.
    pub duration_min: u32,
}

impl Preset {
    /// Get preset duration in seconds.
    pub fn duration_secs(&self) -> u32 {
        self.duration_min.saturating_mul(60)
    }
}

const PRESETS: [Preset; 5] = [
    Preset {
        id: "soft-2",
        name: "Soft boiled",
        description: "White just setting, yolk fully runny",
        duration_min: 2,
    },
    Preset {
        id: "creamy-4",
        name: "Jammy",
        description: "White mostly set, yolk glossy and jammy",
        duration_min: 4,
    },
    Preset {
        id: "medium-6",
        name: "Medium",
        description: "White set, orange yolk starting to firm up",
        duration_min: 6,
    },
    Preset {
        id: "hard-8",
        name: "Hard boiled",
        description: "White fully set, yolk cooked through",
        duration_min: 8,
    },
    Preset {
        id: "very-hard-10",
        name: "Extra hard",
        description: "Cooked solid, crumbly yolk",
        duration_min: 10,
    },
];

/// Every preset, in display order.
pub fn list() -> &'static [Preset] {
    &PRESETS
}

/// The preset a fresh controller starts on.
pub fn default_preset() -> &'static Preset {
    &PRESETS[1]
}

pub fn find(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// Like [`find`], for ids that come from user input.
pub fn resolve(id: &str) -> Result<&'static Preset> {
    find(id).ok_or_else(|| CoreError::UnknownPreset(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_five_presets_in_order() {
        let minutes: Vec<u32> = list().iter().map(|p| p.duration_min).collect();
        assert_eq!(minutes, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = list().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), list().len());
    }

    #[test]
    fn default_is_second_entry() {
        assert_eq!(default_preset().id, "creamy-4");
        assert_eq!(default_preset().duration_secs(), 240);
    }

    #[test]
    fn find_and_resolve() {
        assert_eq!(find("hard-8").map(|p| p.duration_min), Some(8));
        assert!(find("scrambled").is_none());
        assert!(matches!(
            resolve("scrambled"),
            Err(CoreError::UnknownPreset(id)) if id == "scrambled"
        ));
    }

    #[test]
    fn presets_serialize_with_field_names() {
        let json = serde_json::to_value(default_preset()).unwrap();
        assert_eq!(json["id"], "creamy-4");
        assert_eq!(json["duration_min"], 4);
    }
}
