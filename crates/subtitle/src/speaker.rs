use std::fmt;

use serde::{Deserialize, Serialize};

/// One span attributed to a single speaker by the diarization engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiarizationTurn {
    pub start: f64,
    pub end: f64,
    pub speaker: String,
}

/// Who a segment was attributed to, before anonymization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerKey {
    Known(String),
    /// No diarization was available, or no turn covered the segment.
    Unknown,
}

impl fmt::Display for SpeakerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(key) => f.write_str(key),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Attributes the interval `[start, end]` to a speaker by its midpoint.
///
/// The first turn (in the order the diarization engine produced them) whose
/// closed interval contains the midpoint wins. Overlapping turns are not
/// disambiguated: when two speakers overlap at the midpoint the earlier turn
/// in enumeration order is picked, whichever it is.
pub fn resolve_speaker(start: f64, end: f64, turns: Option<&[DiarizationTurn]>) -> SpeakerKey {
    let Some(turns) = turns else {
        return SpeakerKey::Unknown;
    };

    let mid = (start + end) / 2.0;

    turns
        .iter()
        .find(|turn| turn.start <= mid && mid <= turn.end)
        .map(|turn| SpeakerKey::Known(turn.speaker.clone()))
        .unwrap_or(SpeakerKey::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(start: f64, end: f64, speaker: &str) -> DiarizationTurn {
        DiarizationTurn {
            start,
            end,
            speaker: speaker.to_string(),
        }
    }

    #[test]
    fn no_diarization_is_unknown() {
        assert_eq!(resolve_speaker(0.0, 2.0, None), SpeakerKey::Unknown);
        assert_eq!(resolve_speaker(0.0, 2.0, Some(&[])), SpeakerKey::Unknown);
    }

    #[test]
    fn midpoint_selects_turn() {
        let turns = [turn(0.0, 1.5, "A"), turn(1.5, 4.0, "B")];
        // mid = 2.0
        assert_eq!(
            resolve_speaker(1.0, 3.0, Some(&turns)),
            SpeakerKey::Known("B".into())
        );
    }

    #[test]
    fn boundaries_are_inclusive() {
        let turns = [turn(0.0, 1.0, "A")];
        assert_eq!(
            resolve_speaker(0.0, 2.0, Some(&turns)),
            SpeakerKey::Known("A".into())
        );

        let turns = [turn(1.0, 3.0, "B")];
        assert_eq!(
            resolve_speaker(0.5, 1.5, Some(&turns)),
            SpeakerKey::Known("B".into())
        );
    }

    #[test]
    fn gap_between_turns_is_unknown() {
        let turns = [turn(0.0, 1.0, "A"), turn(5.0, 6.0, "B")];
        assert_eq!(resolve_speaker(2.0, 4.0, Some(&turns)), SpeakerKey::Unknown);
    }

    #[test]
    fn overlapping_turns_pick_first_enumerated() {
        let turns = [turn(0.0, 10.0, "B"), turn(2.0, 4.0, "A")];
        assert_eq!(
            resolve_speaker(2.5, 3.5, Some(&turns)),
            SpeakerKey::Known("B".into())
        );
    }
}
