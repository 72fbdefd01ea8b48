use std::collections::BTreeMap;

use crate::placeholder::Placeholder;

/// Requested display names keyed by placeholder. Iteration is ascending by
/// placeholder number.
pub type RenameRequest = BTreeMap<Placeholder, String>;

/// The label a requested name renders as, or `None` when the placeholder
/// should stay as it is.
///
/// Square brackets are dropped and whitespace runs collapse to single spaces,
/// so a name can neither close its label early nor break the cue layout.
/// Blank names and names spelling a placeholder (`SPEAKER_02`) yield `None`:
/// the latter would be picked up again by the next rename of the same track.
pub fn display_name(raw: &str) -> Option<String> {
    let name = raw
        .split(|c: char| c.is_whitespace() || c == '[' || c == ']')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() || name.parse::<Placeholder>().is_ok() {
        return None;
    }
    Some(name)
}

/// Replaces every bracketed `[SPEAKER_NN]` token named in `renames` with
/// `[name]`, where the name goes through [`display_name`] first.
///
/// All substitutions happen in one left-to-right pass. Tokens are matched
/// with their brackets, so `[SPEAKER_01]` never matches inside
/// `[SPEAKER_010]`. Applying the same request twice gives the same track as
/// applying it once.
pub fn apply_renames(track: &str, renames: &RenameRequest) -> String {
    let substitutions: Vec<(String, String)> = renames
        .iter()
        .filter_map(|(placeholder, name)| {
            display_name(name).map(|name| (format!("[{placeholder}]"), format!("[{name}]")))
        })
        .collect();

    if substitutions.is_empty() {
        return track.to_string();
    }

    let mut out = String::with_capacity(track.len());
    let mut rest = track;

    while let Some(pos) = rest.find('[') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match substitutions
            .iter()
            .find(|(token, _)| tail.starts_with(token.as_str()))
        {
            Some((token, replacement)) => {
                out.push_str(replacement);
                rest = &tail[token.len()..];
            }
            None => {
                out.push('[');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
