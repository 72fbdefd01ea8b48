use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::speaker::SpeakerKey;

const PREFIX: &str = "SPEAKER_";

/// Anonymous, densely numbered speaker label rendered as `SPEAKER_NN`.
///
/// The number is zero-padded to at least two digits. Renames match the
/// bracketed form (`[SPEAKER_01]`), so the padding keeps the textual label of
/// each number unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placeholder(u32);

impl Placeholder {
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{:02}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a speaker placeholder: {0:?}")]
pub struct ParsePlaceholderError(String);

impl FromStr for Placeholder {
    type Err = ParsePlaceholderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePlaceholderError(s.to_string());

        let digits = s.strip_prefix(PREFIX).ok_or_else(err)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let placeholder = digits
            .parse::<u32>()
            .ok()
            .and_then(Placeholder::new)
            .ok_or_else(err)?;

        // Only the canonical spelling is accepted: `SPEAKER_1` and
        // `SPEAKER_001` never appear in a track.
        if placeholder.to_string() != s {
            return Err(err());
        }

        Ok(placeholder)
    }
}

impl Serialize for Placeholder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Placeholder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub speaker: SpeakerKey,
    pub placeholder: Placeholder,
}

/// Speaker keys in the order they were first attributed, each with the
/// placeholder it received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderMapping {
    entries: Vec<MappingEntry>,
}

impl PlaceholderMapping {
    pub fn get(&self, speaker: &SpeakerKey) -> Option<Placeholder> {
        self.entries
            .iter()
            .find(|entry| &entry.speaker == speaker)
            .map(|entry| entry.placeholder)
    }

    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.placeholder == placeholder)
    }

    /// Assigned placeholders, ascending by number.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut placeholders: Vec<_> = self.entries.iter().map(|e| e.placeholder).collect();
        placeholders.sort();
        placeholders
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Hands out placeholders in first-seen order.
///
/// Must be fed one speaker per segment, in segment order. Entries are never
/// evicted or reassigned.
#[derive(Debug, Default)]
pub struct PlaceholderAllocator {
    mapping: PlaceholderMapping,
}

impl PlaceholderAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, speaker: &SpeakerKey) -> Placeholder {
        if let Some(placeholder) = self.mapping.get(speaker) {
            return placeholder;
        }

        let placeholder = Placeholder(self.mapping.len() as u32 + 1);
        self.mapping.entries.push(MappingEntry {
            speaker: speaker.clone(),
            placeholder,
        });
        placeholder
    }

    pub fn mapping(&self) -> &PlaceholderMapping {
        &self.mapping
    }

    pub fn into_mapping(self) -> PlaceholderMapping {
        self.mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(key: &str) -> SpeakerKey {
        SpeakerKey::Known(key.to_string())
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(Placeholder(1).to_string(), "SPEAKER_01");
        assert_eq!(Placeholder(10).to_string(), "SPEAKER_10");
        assert_eq!(Placeholder(100).to_string(), "SPEAKER_100");
    }

    #[test]
    fn parse_accepts_only_canonical_form() {
        assert_eq!("SPEAKER_01".parse(), Ok(Placeholder(1)));
        assert_eq!("SPEAKER_12".parse(), Ok(Placeholder(12)));
        assert!("SPEAKER_1".parse::<Placeholder>().is_err());
        assert!("SPEAKER_001".parse::<Placeholder>().is_err());
        assert!("SPEAKER_00".parse::<Placeholder>().is_err());
        assert!("SPEAKER_+1".parse::<Placeholder>().is_err());
        assert!("Alice".parse::<Placeholder>().is_err());
    }

    #[test]
    fn reuses_existing_assignment() {
        let mut allocator = PlaceholderAllocator::new();
        assert_eq!(allocator.resolve(&known("A")), Placeholder(1));
        assert_eq!(allocator.resolve(&known("B")), Placeholder(2));
        assert_eq!(allocator.resolve(&known("A")), Placeholder(1));
        assert_eq!(allocator.resolve(&SpeakerKey::Unknown), Placeholder(3));
        assert_eq!(allocator.mapping().len(), 3);
    }

    #[test]
    fn mapping_keeps_first_seen_order() {
        let mut allocator = PlaceholderAllocator::new();
        allocator.resolve(&known("B"));
        allocator.resolve(&SpeakerKey::Unknown);

        assert_eq!(
            render(&allocator.into_mapping()),
            "B=SPEAKER_01,Unknown=SPEAKER_02"
        );
    }

    fn render(mapping: &PlaceholderMapping) -> String {
        mapping
            .iter()
            .map(|e| format!("{}={}", e.speaker, e.placeholder))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[quickcheck_macros::quickcheck]
    fn prop_numbers_are_dense_and_first_seen(keys: Vec<u8>) -> bool {
        let mut allocator = PlaceholderAllocator::new();
        let assigned: Vec<_> = keys
            .iter()
            .map(|k| allocator.resolve(&known(&k.to_string())))
            .collect();

        let mapping = allocator.into_mapping();
        let numbers: Vec<u32> = mapping.placeholders().iter().map(|p| p.number()).collect();
        let dense = numbers == (1..=mapping.len() as u32).collect::<Vec<_>>();
        let first_is_one = assigned.first().is_none_or(|p| p.number() == 1);

        let mut distinct = keys.clone();
        distinct.sort();
        distinct.dedup();

        dense && first_is_one && mapping.len() == distinct.len()
    }
}
