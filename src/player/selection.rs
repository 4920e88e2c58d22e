//! Next / previous / select over an ordered track collection.
//!
//! All functions are pure: they pick a track and leave time and play-state
//! bookkeeping to the caller. An empty collection is rejected up front.

use super::types::Track;
use crate::error::{PlayerError, Result};

/// Seconds into a track after which "previous" restarts it in place.
pub const RESTART_THRESHOLD_SECS: u32 = 3;

fn ensure_non_empty(tracks: &[Track]) -> Result<()> {
    if tracks.is_empty() {
        Err(PlayerError::EmptyLibrary)
    } else {
        Ok(())
    }
}

/// Index of `current`, or 0 when it is not in the collection.
fn index_or_first(tracks: &[Track], current: &str) -> usize {
    tracks.iter().position(|t| t.id == current).unwrap_or(0)
}

/// Look up `id`, falling back to the first track.
pub fn resolve<'a>(tracks: &'a [Track], id: &str) -> Result<&'a Track> {
    ensure_non_empty(tracks)?;
    Ok(tracks.iter().find(|t| t.id == id).unwrap_or(&tracks[0]))
}

/// The track after `current`, wrapping at the end.
pub fn next<'a>(tracks: &'a [Track], current: &str) -> Result<&'a Track> {
    ensure_non_empty(tracks)?;
    let index = index_or_first(tracks, current);
    Ok(&tracks[(index + 1) % tracks.len()])
}

/// The track before `current`, or `current` itself once playback is past
/// [`RESTART_THRESHOLD_SECS`].
pub fn previous<'a>(tracks: &'a [Track], current: &str, time: u32) -> Result<&'a Track> {
    ensure_non_empty(tracks)?;
    let index = index_or_first(tracks, current);
    if time > RESTART_THRESHOLD_SECS {
        return Ok(&tracks[index]);
    }
    Ok(&tracks[(index + tracks.len() - 1) % tracks.len()])
}

/// Direct user choice. Unknown ids select the first track.
pub fn select<'a>(tracks: &'a [Track], id: &str) -> Result<&'a Track> {
    resolve(tracks, id)
}
