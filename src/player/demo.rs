//! Seed collection loaded at startup.

use super::types::Track;
use crate::app::lyrics::LyricLine;

fn line(time: f64, text: &str) -> LyricLine {
    LyricLine::new(time, text)
}

/// The fixed demo track list. Ids are "1" through "5".
pub fn demo_tracks() -> Vec<Track> {
    vec![
        Track::new(
            "1",
            "Neon Dreams",
            "Synthwave Collective",
            "Electric Nights",
            245,
            "https://images.unsplash.com/photo-1470225620780-dba8ba36b745?w=400&h=400&fit=crop",
        )
        .with_lyrics(vec![
            line(0.0, "City lights are calling out my name"),
            line(8.0, "Chrome reflections in the midnight rain"),
            line(16.0, "Every signal burning through the haze"),
            line(24.0, "We were living in electric days"),
            line(34.0, ""),
            line(40.0, "Neon dreams, neon dreams"),
            line(48.0, "Nothing's ever quite the way it seems"),
        ]),
        Track::new(
            "2",
            "Midnight Drive",
            "Retro Wave",
            "Night Cruiser",
            198,
            "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=400&h=400&fit=crop",
        )
        .with_lyrics(vec![
            line(4.0, "Engine humming on an empty road"),
            line(11.5, "Headlights cutting through the dark below"),
            line(19.0, "Radio is playing something slow"),
            line(27.0, "Midnight drive, and nowhere left to go"),
        ]),
        Track::new(
            "3",
            "Digital Horizon",
            "Cyber Sound",
            "Future Vision",
            267,
            "https://images.unsplash.com/photo-1514320291840-2e0a9bf2a9ae?w=400&h=400&fit=crop",
        ),
        Track::new(
            "4",
            "Starlight Echo",
            "Cosmic Beats",
            "Galaxy Dreams",
            223,
            "https://images.unsplash.com/photo-1459749411175-04bf5292ceea?w=400&h=400&fit=crop",
        ),
        Track::new(
            "5",
            "Urban Pulse",
            "City Lights",
            "Metropolitan",
            189,
            "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=400&h=400&fit=crop",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique_and_durations_positive() {
        let tracks = demo_tracks();
        assert_eq!(tracks.len(), 5);
        let mut ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert!(tracks.iter().all(|t| t.duration > 0));
    }

    #[test]
    fn seed_lyrics_are_sorted() {
        for track in demo_tracks() {
            assert!(track.lyrics.windows(2).all(|w| w[0].time <= w[1].time));
        }
    }
}
