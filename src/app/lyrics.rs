use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Seconds from the start of the track.
    pub time: f64,
    pub text: String,
}

impl LyricLine {
    pub fn new(time: f64, text: &str) -> Self {
        Self {
            time,
            text: text.to_string(),
        }
    }
}

/// Index of the line whose `[time, next.time)` interval contains `time`.
///
/// The last line stays active forever once reached. Returns `None` for an
/// empty sequence or before the first timestamp. `lines` must be sorted.
pub fn active_line(lines: &[LyricLine], time: f64) -> Option<usize> {
    lines.iter().enumerate().position(|(i, line)| {
        time >= line.time && lines.get(i + 1).is_none_or(|next| time < next.time)
    })
}

/// Remembers the last active index so the view recenters once per change
/// rather than on every clock tick.
#[derive(Debug, Default)]
pub struct ActiveLineTracker {
    last: Option<Option<usize>>,
}

impl ActiveLineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some(index)` when the active index differs from the last one
    /// observed, `None` otherwise.
    pub fn observe(&mut self, index: Option<usize>) -> Option<Option<usize>> {
        if self.last == Some(index) {
            return None;
        }
        self.last = Some(index);
        Some(index)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Parse an editor timestamp: plain seconds (`12.5`) or `mm:ss[.frac]`.
pub fn parse_timestamp(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('-') {
        return None;
    }

    let seconds = match raw.split_once(':') {
        Some((min, sec)) => {
            let min: u64 = min.parse().ok()?;
            let sec: f64 = sec.parse().ok()?;
            if !(0.0..60.0).contains(&sec) {
                return None;
            }
            min as f64 * 60.0 + sec
        }
        None => raw.parse().ok()?,
    };

    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}

/// Render as `m:ss.cc`.
pub fn format_timestamp(time: f64) -> String {
    let centis = (time.max(0.0) * 100.0).round() as u64;
    format!("{}:{:02}.{:02}", centis / 6000, (centis / 100) % 60, centis % 100)
}

/// Check every timestamp and sort ascending. The sort is stable so lines
/// sharing a timestamp keep their relative order.
pub fn prepare_lyrics(mut lines: Vec<LyricLine>) -> Result<Vec<LyricLine>> {
    if let Some((index, line)) = lines
        .iter()
        .enumerate()
        .find(|(_, l)| !l.time.is_finite() || l.time < 0.0)
    {
        return Err(PlayerError::InvalidTimestamp {
            index,
            value: line.time.to_string(),
        });
    }
    lines.sort_by(|a, b| a.time.total_cmp(&b.time));
    Ok(lines)
}

/// Gap used for a freshly appended line.
const NEW_LINE_GAP_SECS: f64 = 5.0;

/// Working copy of a track's lyrics while the editor is open.
///
/// Lines are addressed by position. Nothing is sorted until [`finish`].
///
/// [`finish`]: LyricsDraft::finish
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricsDraft {
    lines: Vec<LyricLine>,
}

impl LyricsDraft {
    pub fn new(lines: Vec<LyricLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append an empty line five seconds after the last one.
    pub fn add_line(&mut self) -> usize {
        let time = self
            .lines
            .last()
            .map(|l| l.time + NEW_LINE_GAP_SECS)
            .unwrap_or(0.0);
        self.lines.push(LyricLine::new(time, ""));
        self.lines.len() - 1
    }

    pub fn delete_line(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    pub fn set_time(&mut self, index: usize, raw: &str) -> Result<()> {
        let time = parse_timestamp(raw).ok_or_else(|| PlayerError::InvalidTimestamp {
            index,
            value: raw.to_string(),
        })?;
        if let Some(line) = self.lines.get_mut(index) {
            line.time = time;
        }
        Ok(())
    }

    pub fn set_text(&mut self, index: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.text = text.to_string();
        }
    }

    pub fn finish(self) -> Result<Vec<LyricLine>> {
        prepare_lyrics(self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(times: &[f64]) -> Vec<LyricLine> {
        times
            .iter()
            .enumerate()
            .map(|(i, t)| LyricLine::new(*t, &format!("line {i}")))
            .collect()
    }

    #[test]
    fn active_line_matches_half_open_intervals() {
        let l = lines(&[2.0, 5.0, 9.0]);
        assert_eq!(active_line(&l, 0.0), None);
        assert_eq!(active_line(&l, 1.99), None);
        assert_eq!(active_line(&l, 2.0), Some(0));
        assert_eq!(active_line(&l, 4.99), Some(0));
        assert_eq!(active_line(&l, 5.0), Some(1));
        assert_eq!(active_line(&l, 9.0), Some(2));
        assert_eq!(active_line(&l, 500.0), Some(2));
    }

    #[test]
    fn active_line_on_empty_is_none() {
        assert_eq!(active_line(&[], 3.0), None);
    }

    #[test]
    fn active_line_satisfies_interval_property() {
        let l = lines(&[0.0, 0.5, 3.0, 3.0, 7.25, 12.0]);
        let mut t = 0.0;
        while t < 15.0 {
            let i = active_line(&l, t).unwrap();
            assert!(l[i].time <= t);
            assert!(i == l.len() - 1 || t < l[i + 1].time);
            t += 0.25;
        }
    }

    #[test]
    fn tracker_fires_once_per_change() {
        let l = lines(&[0.0, 3.0]);
        let mut tracker = ActiveLineTracker::new();
        let fired: Vec<_> = (0..6)
            .filter_map(|t| tracker.observe(active_line(&l, t as f64)))
            .collect();
        assert_eq!(fired, vec![Some(0), Some(1)]);

        tracker.reset();
        assert_eq!(tracker.observe(Some(1)), Some(Some(1)));
    }

    #[test]
    fn tracker_reports_transition_to_none() {
        let mut tracker = ActiveLineTracker::new();
        assert_eq!(tracker.observe(None), Some(None));
        assert_eq!(tracker.observe(None), None);
        assert_eq!(tracker.observe(Some(0)), Some(Some(0)));
        assert_eq!(tracker.observe(None), Some(None));
    }

    #[test]
    fn parse_timestamp_accepts_seconds_and_minutes() {
        assert_eq!(parse_timestamp("12.5"), Some(12.5));
        assert_eq!(parse_timestamp(" 0 "), Some(0.0));
        assert_eq!(parse_timestamp("1:05.20"), Some(65.2));
        assert_eq!(parse_timestamp("03:00"), Some(180.0));
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        for raw in ["", "abc", "-1", "1:75", "NaN", "inf", "1:2:3"] {
            assert_eq!(parse_timestamp(raw), None, "{raw:?}");
        }
    }

    #[test]
    fn format_timestamp_pads() {
        assert_eq!(format_timestamp(65.2), "1:05.20");
        assert_eq!(format_timestamp(0.0), "0:00.00");
    }

    #[test]
    fn prepare_sorts_unsorted_lines() {
        let saved = prepare_lyrics(vec![LyricLine::new(5.0, "b"), LyricLine::new(0.0, "a")]).unwrap();
        assert_eq!(saved, vec![LyricLine::new(0.0, "a"), LyricLine::new(5.0, "b")]);
    }

    #[test]
    fn prepare_rejects_negative_and_nan() {
        let err = prepare_lyrics(vec![LyricLine::new(1.0, ""), LyricLine::new(-2.0, "")]).unwrap_err();
        assert!(matches!(err, PlayerError::InvalidTimestamp { index: 1, .. }));
        assert!(prepare_lyrics(vec![LyricLine::new(f64::NAN, "")]).is_err());
    }

    #[test]
    fn draft_add_line_steps_five_seconds() {
        let mut draft = LyricsDraft::default();
        assert_eq!(draft.add_line(), 0);
        assert_eq!(draft.lines()[0].time, 0.0);
        draft.add_line();
        assert_eq!(draft.lines()[1].time, 5.0);
        assert_eq!(draft.lines()[1].text, "");
    }

    #[test]
    fn draft_edits_and_finishes_sorted() {
        let mut draft = LyricsDraft::new(lines(&[0.0, 5.0]));
        draft.set_time(0, "9").unwrap();
        draft.set_text(0, "moved");
        let err = draft.set_time(1, "soon").unwrap_err();
        assert_eq!(
            err,
            PlayerError::InvalidTimestamp {
                index: 1,
                value: "soon".into()
            }
        );
        draft.delete_line(42);
        assert_eq!(draft.len(), 2);

        let saved = draft.finish().unwrap();
        assert_eq!(saved[0].text, "line 1");
        assert_eq!(saved[1].text, "moved");
    }
}
