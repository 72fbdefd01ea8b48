mod align;
mod placeholder;
mod rename;
mod speaker;
mod timestamp;
mod track;

pub use align::{Alignment, align};
pub use placeholder::{
    MappingEntry, ParsePlaceholderError, Placeholder, PlaceholderAllocator, PlaceholderMapping,
};
pub use rename::{RenameRequest, apply_renames, display_name};
pub use speaker::{DiarizationTurn, SpeakerKey, resolve_speaker};
pub use timestamp::format_timestamp;
pub use track::{ParseTrackError, ParsedCue, Segment, SubtitleCue, TrackBuilder, parse_track};
