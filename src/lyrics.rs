//! Lyric data model and index lookups
//!
//! - `Lyric` / `LyricKind`: a timed line of the recitation
//! - `dataset`: validated, immutable lyrics + outline + footnotes
//! - lookup helpers mapping playback time to lyric and lyric to outline
//!
//! Lookups never fail: "no active lyric" is `None` and the outline
//! defaults to section `0`.

pub mod dataset;

use serde::{Deserialize, Serialize};

pub use dataset::{Dataset, DatasetError, Footnote};

/// Verse form of a lyric line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LyricKind {
    Chaupai,
    Samput,
    Doha,
    Sortha,
    Chhand,
}

impl LyricKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            LyricKind::Chaupai => "chaupai",
            LyricKind::Samput => "samput",
            LyricKind::Doha => "doha",
            LyricKind::Sortha => "sortha",
            LyricKind::Chhand => "chhand",
        }
    }

    /// Couplet forms are rendered on a single wide line
    pub fn is_couplet(&self) -> bool {
        matches!(self, LyricKind::Doha | LyricKind::Sortha)
    }
}

/// A timed lyric line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lyric {
    /// Start time in seconds
    pub time: f64,
    #[serde(rename = "type")]
    pub kind: LyricKind,
    pub text: String,
    /// Index into the outline this line belongs to
    #[serde(rename = "outlineIndex")]
    pub outline_index: usize,
    #[serde(rename = "footnoteIds", default)]
    pub footnote_ids: Vec<u32>,
}

impl Lyric {
    pub fn new(time: f64, kind: LyricKind, text: impl Into<String>, outline_index: usize) -> Self {
        Self {
            time,
            kind,
            text: text.into(),
            outline_index,
            footnote_ids: Vec::new(),
        }
    }

    pub fn with_footnotes(mut self, footnote_ids: Vec<u32>) -> Self {
        self.footnote_ids = footnote_ids;
        self
    }
}

/// Find the lyric active at `time` seconds.
///
/// Returns the greatest index whose start time is `<= time`. Lines sharing
/// a start time resolve to the last of them. Negative and NaN times are
/// treated as "before the first lyric" and yield `None`.
pub fn find_lyric_index(lyrics: &[Lyric], time: f64) -> Option<usize> {
    if time.is_nan() || time < 0.0 {
        return None;
    }

    match lyrics.partition_point(|lyric| lyric.time <= time) {
        0 => None,
        count => Some(count - 1),
    }
}

/// Outline section of the lyric at `index`, or `0` when there is none
pub fn find_outline_index(lyrics: &[Lyric], index: Option<usize>) -> usize {
    index
        .and_then(|i| lyrics.get(i))
        .map(|lyric| lyric.outline_index)
        .unwrap_or(0)
}

/// First lyric belonging to an outline section
pub fn first_lyric_of_outline(lyrics: &[Lyric], outline_index: usize) -> Option<usize> {
    lyrics
        .iter()
        .position(|lyric| lyric.outline_index == outline_index)
}

/// Footnote ids of the lyric at `index` that appear there for the first time.
///
/// Footnotes are attached to many consecutive lines; the renderer only marks
/// the first line carrying each one.
pub fn first_footnote_occurrences(lyrics: &[Lyric], index: usize) -> Vec<u32> {
    let Some(lyric) = lyrics.get(index) else {
        return Vec::new();
    };

    lyric
        .footnote_ids
        .iter()
        .copied()
        .filter(|id| {
            lyrics
                .iter()
                .position(|l| l.footnote_ids.contains(id))
                .is_some_and(|first| first == index)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(times: &[f64]) -> Vec<Lyric> {
        times
            .iter()
            .enumerate()
            .map(|(i, &t)| Lyric::new(t, LyricKind::Chaupai, format!("line {}", i), i / 2))
            .collect()
    }

    #[test]
    fn test_find_lyric_index_between_lines() {
        let lyrics = timed(&[0.0, 10.0, 20.0]);
        assert_eq!(find_lyric_index(&lyrics, 15.0), Some(1));
        assert_eq!(find_lyric_index(&lyrics, 25.0), Some(2));
        assert_eq!(find_lyric_index(&lyrics, 9.999), Some(0));
    }

    #[test]
    fn test_find_lyric_index_exact_start_time() {
        let lyrics = timed(&[0.0, 10.0, 20.0]);
        assert_eq!(find_lyric_index(&lyrics, 0.0), Some(0));
        assert_eq!(find_lyric_index(&lyrics, 10.0), Some(1));
        assert_eq!(find_lyric_index(&lyrics, 20.0), Some(2));
    }

    #[test]
    fn test_find_lyric_index_before_first_line() {
        let lyrics = timed(&[5.0, 10.0]);
        assert_eq!(find_lyric_index(&lyrics, 4.9), None);
        assert_eq!(find_lyric_index(&lyrics, -5.0), None);
        assert_eq!(find_lyric_index(&lyrics, f64::NAN), None);
        assert_eq!(find_lyric_index(&[], 3.0), None);
    }

    #[test]
    fn test_find_lyric_index_repeated_refrain_times() {
        // Repeated samput lines share a start time in the recordings
        let lyrics = timed(&[0.0, 10.0, 10.0, 10.0, 20.0]);
        assert_eq!(find_lyric_index(&lyrics, 10.0), Some(3));
        assert_eq!(find_lyric_index(&lyrics, 19.0), Some(3));
        assert_eq!(find_lyric_index(&lyrics, 9.0), Some(0));
    }

    #[test]
    fn test_find_lyric_index_matches_linear_scan() {
        let lyrics = timed(&[0.0, 1.5, 1.5, 3.0, 7.25, 7.25, 11.0, 40.0]);
        let mut t = -2.0;
        while t < 45.0 {
            let expected = lyrics.iter().rposition(|l| l.time <= t);
            let expected = if t < 0.0 { None } else { expected };
            assert_eq!(find_lyric_index(&lyrics, t), expected, "time {}", t);
            t += 0.25;
        }
    }

    #[test]
    fn test_find_outline_index_defaults_to_zero() {
        let lyrics = timed(&[0.0, 10.0, 20.0]);
        assert_eq!(find_outline_index(&lyrics, Some(2)), 1);
        assert_eq!(find_outline_index(&lyrics, None), 0);
        assert_eq!(find_outline_index(&lyrics, Some(99)), 0);
    }

    #[test]
    fn test_first_lyric_of_outline() {
        let lyrics = timed(&[0.0, 10.0, 20.0, 30.0, 40.0]);
        assert_eq!(first_lyric_of_outline(&lyrics, 0), Some(0));
        assert_eq!(first_lyric_of_outline(&lyrics, 1), Some(2));
        assert_eq!(first_lyric_of_outline(&lyrics, 2), Some(4));
        assert_eq!(first_lyric_of_outline(&lyrics, 7), None);
    }

    #[test]
    fn test_first_footnote_occurrences() {
        let lyrics = vec![
            Lyric::new(0.0, LyricKind::Chaupai, "a", 0).with_footnotes(vec![5, 9]),
            Lyric::new(1.0, LyricKind::Chaupai, "b", 0).with_footnotes(vec![5]),
            Lyric::new(2.0, LyricKind::Doha, "c", 0).with_footnotes(vec![5, 14]),
        ];
        assert_eq!(first_footnote_occurrences(&lyrics, 0), vec![5, 9]);
        assert!(first_footnote_occurrences(&lyrics, 1).is_empty());
        assert_eq!(first_footnote_occurrences(&lyrics, 2), vec![14]);
        assert!(first_footnote_occurrences(&lyrics, 3).is_empty());
    }

    #[test]
    fn test_lyric_kind_couplet() {
        assert!(LyricKind::Doha.is_couplet());
        assert!(LyricKind::Sortha.is_couplet());
        assert!(!LyricKind::Samput.is_couplet());
    }
}
