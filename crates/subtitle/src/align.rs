use crate::placeholder::{PlaceholderAllocator, PlaceholderMapping};
use crate::speaker::{DiarizationTurn, resolve_speaker};
use crate::track::{Segment, SubtitleCue, TrackBuilder};

#[derive(Debug, Clone)]
pub struct Alignment {
    pub track: String,
    pub mapping: PlaceholderMapping,
    pub cues: Vec<SubtitleCue>,
}

/// Attributes each segment to a speaker and renders the labeled track.
///
/// Segments are consumed in the given order, one cue each. `turns` is `None`
/// when diarization was unavailable, in which case every cue shares one
/// placeholder.
pub fn align(segments: &[Segment], turns: Option<&[DiarizationTurn]>) -> Alignment {
    let mut allocator = PlaceholderAllocator::new();
    let mut builder = TrackBuilder::new();
    let mut cues = Vec::with_capacity(segments.len());

    for segment in segments {
        let speaker = resolve_speaker(segment.start, segment.end, turns);
        let cue = SubtitleCue {
            start: segment.start,
            end: segment.end,
            placeholder: allocator.resolve(&speaker),
            text: segment.text.clone(),
        };
        builder.push(&cue);
        cues.push(cue);
    }

    Alignment {
        track: builder.finish(),
        mapping: allocator.into_mapping(),
        cues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Placeholder, SpeakerKey, parse_track};

    fn segment(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            start,
            end,
            text: text.to_string(),
        }
    }

    fn turn(start: f64, end: f64, speaker: &str) -> DiarizationTurn {
        DiarizationTurn {
            start,
            end,
            speaker: speaker.to_string(),
        }
    }

    #[test]
    fn single_segment_without_diarization() {
        let alignment = align(&[segment(0.0, 2.0, "hello")], None);
        assert_eq!(
            alignment.track,
            "WEBVTT\n\n00:00:00.000 --> 00:00:02.000\n[SPEAKER_01] hello\n\n"
        );
        assert_eq!(alignment.mapping.get(&SpeakerKey::Unknown), Placeholder::new(1));
    }

    #[test]
    fn no_diarization_collapses_to_one_placeholder() {
        let segments = [
            segment(0.0, 1.0, "a"),
            segment(1.0, 2.0, "b"),
            segment(2.0, 3.0, "c"),
        ];
        let alignment = align(&segments, None);
        assert_eq!(alignment.mapping.len(), 1);
        assert!(
            alignment
                .cues
                .iter()
                .all(|c| c.placeholder.to_string() == "SPEAKER_01")
        );
    }

    #[test]
    fn returning_speaker_reuses_placeholder() {
        let segments = [
            segment(0.0, 2.0, "first"),
            segment(2.0, 4.0, "second"),
            segment(4.0, 6.0, "third"),
        ];
        let turns = [turn(0.0, 2.0, "A"), turn(2.0, 4.0, "B"), turn(4.0, 6.0, "A")];

        let alignment = align(&segments, Some(&turns));

        let a = SpeakerKey::Known("A".into());
        let b = SpeakerKey::Known("B".into());
        assert_eq!(alignment.mapping.get(&a), Placeholder::new(1));
        assert_eq!(alignment.mapping.get(&b), Placeholder::new(2));
        assert_eq!(alignment.mapping.len(), 2);

        let labels: Vec<String> = parse_track(&alignment.track)
            .unwrap()
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(labels, ["SPEAKER_01", "SPEAKER_02", "SPEAKER_01"]);
    }

    #[test]
    fn unknown_gets_numbered_in_first_seen_order() {
        let segments = [segment(0.0, 2.0, "x"), segment(10.0, 12.0, "y")];
        let turns = [turn(10.0, 12.0, "S1")];

        let alignment = align(&segments, Some(&turns));
        assert_eq!(alignment.mapping.get(&SpeakerKey::Unknown), Placeholder::new(1));
        assert_eq!(
            alignment.mapping.get(&SpeakerKey::Known("S1".into())),
            Placeholder::new(2)
        );
    }

    #[test]
    fn empty_transcript_renders_header_only() {
        let alignment = align(&[], Some(&[turn(0.0, 1.0, "A")]));
        assert_eq!(alignment.track, "WEBVTT\n\n");
        assert!(alignment.mapping.is_empty());
    }

    #[quickcheck_macros::quickcheck]
    fn prop_cues_mirror_segments(speakers: Vec<u8>) -> bool {
        let segments: Vec<Segment> = (0..speakers.len())
            .map(|i| segment(i as f64, i as f64 + 1.0, "w"))
            .collect();
        let turns: Vec<DiarizationTurn> = speakers
            .iter()
            .enumerate()
            .map(|(i, s)| turn(i as f64, i as f64 + 1.0, &(s % 4).to_string()))
            .collect();

        let alignment = align(&segments, Some(&turns));

        let numbers: Vec<u32> = alignment
            .mapping
            .placeholders()
            .iter()
            .map(|p| p.number())
            .collect();
        let dense = numbers == (1..=alignment.mapping.len() as u32).collect::<Vec<_>>();
        let first_is_one = alignment
            .cues
            .first()
            .is_none_or(|c| c.placeholder.number() == 1);

        dense
            && first_is_one
            && alignment.cues.len() == segments.len()
            && alignment
                .cues
                .iter()
                .zip(&segments)
                .all(|(c, s)| c.start == s.start && c.end == s.end)
    }
}
