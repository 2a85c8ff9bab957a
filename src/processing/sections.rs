//! Resume section detection by trigger-phrase families

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Summary,
    Skills,
    Projects,
    Experience,
    Education,
    Certifications,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Summary,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Certifications,
    ];

    /// Sections counted towards section completeness. Certifications are a bonus.
    pub const CORE: [SectionKind; 5] = [
        SectionKind::Summary,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Experience,
        SectionKind::Education,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Certifications => "certifications",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn triggers(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Summary => &["summary", "profile", "professional summary", "about me", "objective"],
            SectionKind::Skills => &["skills", "technical skills", "technologies", "core competencies"],
            SectionKind::Projects => &["projects", "personal projects", "portfolio"],
            SectionKind::Experience => &["experience", "work history", "employment", "internship"],
            SectionKind::Education => &[
                "education", "university", "college", "bachelor", "master", "b.tech", "m.tech", "degree",
            ],
            SectionKind::Certifications => &["certifications", "certification", "certificate", "licenses"],
        }
    }

    fn index(&self) -> usize {
        match self {
            SectionKind::Summary => 0,
            SectionKind::Skills => 1,
            SectionKind::Projects => 2,
            SectionKind::Experience => 3,
            SectionKind::Education => 4,
            SectionKind::Certifications => 5,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Summary => write!(f, "Summary"),
            SectionKind::Skills => write!(f, "Skills"),
            SectionKind::Projects => write!(f, "Projects"),
            SectionKind::Experience => write!(f, "Experience"),
            SectionKind::Education => write!(f, "Education"),
            SectionKind::Certifications => write!(f, "Certifications"),
        }
    }
}

/// Presence flag for each of the six fixed sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "HashMap<String, bool>")]
pub struct SectionPresenceMap {
    present: [bool; 6],
}

impl SectionPresenceMap {
    pub fn get(&self, kind: SectionKind) -> bool {
        self.present[kind.index()]
    }

    pub fn set(&mut self, kind: SectionKind, present: bool) {
        self.present[kind.index()] = present;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, bool)> + '_ {
        SectionKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn len(&self) -> usize {
        self.present.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn present_count(&self) -> usize {
        self.present.iter().filter(|p| **p).count()
    }

    pub fn core_present_count(&self) -> usize {
        SectionKind::CORE.iter().filter(|kind| self.get(**kind)).count()
    }

    pub fn missing_core(&self) -> Vec<SectionKind> {
        SectionKind::CORE.into_iter().filter(|kind| !self.get(*kind)).collect()
    }
}

impl Serialize for SectionPresenceMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (kind, present) in self.iter() {
            map.serialize_entry(kind.key(), &present)?;
        }
        map.end()
    }
}

impl TryFrom<HashMap<String, bool>> for SectionPresenceMap {
    type Error = String;

    fn try_from(entries: HashMap<String, bool>) -> std::result::Result<Self, Self::Error> {
        let mut map = SectionPresenceMap::default();
        for (key, present) in &entries {
            let kind = SectionKind::from_key(key).ok_or_else(|| format!("unknown section: {}", key))?;
            map.set(kind, *present);
        }
        if entries.len() != SectionKind::ALL.len() {
            return Err(format!("expected {} sections, got {}", SectionKind::ALL.len(), entries.len()));
        }
        Ok(map)
    }
}

/// Marks each section present when any of its trigger phrases occurs
/// anywhere in the text, case-insensitively.
pub fn detect_sections(text: &str) -> SectionPresenceMap {
    let lowered = text.to_lowercase();
    let mut map = SectionPresenceMap::default();

    for kind in SectionKind::ALL {
        let present = kind.triggers().iter().any(|trigger| lowered.contains(trigger));
        map.set(kind, present);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_detection() {
        let text = "Jane Doe\nProfessional Summary\nData engineer.\nSkills: Python, SQL\nExperience: Acme Corp 2019-2023";
        let map = detect_sections(text);

        assert!(map.get(SectionKind::Summary));
        assert!(map.get(SectionKind::Skills));
        assert!(map.get(SectionKind::Experience));
        assert!(!map.get(SectionKind::Projects));
        assert!(!map.get(SectionKind::Education));
        assert!(!map.get(SectionKind::Certifications));
        assert_eq!(map.core_present_count(), 3);
    }

    #[test]
    fn test_all_six_keys_for_any_input() {
        for text in ["", "   ", "education education", "🦀 ☃"] {
            let map = detect_sections(text);
            assert_eq!(map.len(), 6);
            let json = serde_json::to_value(map).unwrap();
            let object = json.as_object().unwrap();
            assert_eq!(object.len(), 6);
            for kind in SectionKind::ALL {
                assert!(object.contains_key(kind.key()));
            }
        }
    }

    #[test]
    fn test_case_insensitive_triggers() {
        let map = detect_sections("EDUCATION\nB.Tech in CSE\nCERTIFICATIONS: AWS");
        assert!(map.get(SectionKind::Education));
        assert!(map.get(SectionKind::Certifications));
        assert_eq!(map.present_count(), 2);
    }

    #[test]
    fn test_missing_core_excludes_certifications() {
        let map = detect_sections("Skills and projects");
        let missing = map.missing_core();
        assert_eq!(
            missing,
            vec![SectionKind::Summary, SectionKind::Experience, SectionKind::Education]
        );
    }

    #[test]
    fn test_presence_map_round_trips_through_json() {
        let map = detect_sections("Summary\nEducation");
        let json = serde_json::to_string(&map).unwrap();
        assert!(json.starts_with("{\"summary\":true,\"skills\":false"));
        let back: SectionPresenceMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);

        let partial: std::result::Result<SectionPresenceMap, _> = serde_json::from_str("{\"summary\":true}");
        assert!(partial.is_err());
    }
}
