//! Static lyric dataset
//!
//! Lyrics, outline and footnotes are supplied once at construction and never
//! mutated afterwards. The dataset is validated up front so the state machine
//! can rely on the ordering invariant.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Lyric;

/// Explanatory note attached to lyric lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footnote {
    pub id: u32,
    pub text: String,
}

/// Serialized form of a dataset file
#[derive(Debug, Deserialize)]
struct DatasetFile {
    lyrics: Vec<Lyric>,
    #[serde(default)]
    outline: Vec<String>,
    #[serde(default)]
    footnotes: Vec<Footnote>,
}

/// Validated lyrics, outline and footnotes, cheap to clone
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    lyrics: Arc<[Lyric]>,
    outline: Arc<[String]>,
    footnotes: Arc<[Footnote]>,
}

impl Dataset {
    /// Build a dataset, checking that lyric times are valid and sorted
    pub fn new(
        lyrics: Vec<Lyric>,
        outline: Vec<String>,
        footnotes: Vec<Footnote>,
    ) -> Result<Self, DatasetError> {
        let mut previous = 0.0_f64;
        for (index, lyric) in lyrics.iter().enumerate() {
            if !lyric.time.is_finite() || lyric.time < 0.0 {
                return Err(DatasetError::InvalidTime {
                    index,
                    time: lyric.time,
                });
            }
            if lyric.time < previous {
                return Err(DatasetError::Unsorted {
                    index,
                    time: lyric.time,
                    previous,
                });
            }
            if !outline.is_empty() && lyric.outline_index >= outline.len() {
                return Err(DatasetError::OutlineOutOfRange {
                    index,
                    outline_index: lyric.outline_index,
                    outline_len: outline.len(),
                });
            }
            previous = lyric.time;
        }

        Ok(Self {
            lyrics: lyrics.into(),
            outline: outline.into(),
            footnotes: footnotes.into(),
        })
    }

    /// Parse a dataset from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: DatasetFile = serde_json::from_str(json).context("Invalid dataset JSON")?;
        Ok(Self::new(file.lyrics, file.outline, file.footnotes)?)
    }

    /// Load a dataset from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading lyric dataset from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
        Self::from_json_str(&content)
    }

    pub fn lyrics(&self) -> &Arc<[Lyric]> {
        &self.lyrics
    }

    pub fn outline(&self) -> &Arc<[String]> {
        &self.outline
    }

    pub fn footnotes(&self) -> &Arc<[Footnote]> {
        &self.footnotes
    }

    pub fn lyric(&self, index: usize) -> Option<&Lyric> {
        self.lyrics.get(index)
    }

    pub fn outline_title(&self, index: usize) -> Option<&str> {
        self.outline.get(index).map(String::as_str)
    }

    pub fn footnote(&self, id: u32) -> Option<&Footnote> {
        self.footnotes.iter().find(|f| f.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lyrics.is_empty()
    }
}

/// Dataset validation error
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    InvalidTime {
        index: usize,
        time: f64,
    },
    Unsorted {
        index: usize,
        time: f64,
        previous: f64,
    },
    OutlineOutOfRange {
        index: usize,
        outline_index: usize,
        outline_len: usize,
    },
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::InvalidTime { index, time } => {
                write!(f, "Lyric {} has invalid time {}", index, time)
            }
            DatasetError::Unsorted {
                index,
                time,
                previous,
            } => write!(
                f,
                "Lyric {} starts at {} before previous line at {}",
                index, time, previous
            ),
            DatasetError::OutlineOutOfRange {
                index,
                outline_index,
                outline_len,
            } => write!(
                f,
                "Lyric {} references outline {} but outline has {} entries",
                index, outline_index, outline_len
            ),
        }
    }
}

impl std::error::Error for DatasetError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::LyricKind;

    #[test]
    fn test_new_accepts_sorted_with_ties() {
        let lyrics = vec![
            Lyric::new(0.0, LyricKind::Chaupai, "a", 0),
            Lyric::new(4.0, LyricKind::Samput, "b", 0),
            Lyric::new(4.0, LyricKind::Samput, "c", 1),
        ];
        let dataset = Dataset::new(lyrics, vec!["one".into(), "two".into()], Vec::new()).unwrap();
        assert_eq!(dataset.lyrics().len(), 3);
        assert_eq!(dataset.outline_title(1), Some("two"));
    }

    #[test]
    fn test_new_rejects_unsorted() {
        let lyrics = vec![
            Lyric::new(5.0, LyricKind::Chaupai, "a", 0),
            Lyric::new(4.0, LyricKind::Chaupai, "b", 0),
        ];
        let err = Dataset::new(lyrics, Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(
            err,
            DatasetError::Unsorted {
                index: 1,
                time: 4.0,
                previous: 5.0
            }
        );
    }

    #[test]
    fn test_new_rejects_negative_time() {
        let lyrics = vec![Lyric::new(-1.0, LyricKind::Doha, "a", 0)];
        assert!(matches!(
            Dataset::new(lyrics, Vec::new(), Vec::new()),
            Err(DatasetError::InvalidTime { index: 0, .. })
        ));
    }

    #[test]
    fn test_new_rejects_outline_out_of_range() {
        let lyrics = vec![Lyric::new(0.0, LyricKind::Doha, "a", 3)];
        assert!(matches!(
            Dataset::new(lyrics, vec!["only".into()], Vec::new()),
            Err(DatasetError::OutlineOutOfRange {
                outline_index: 3,
                outline_len: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "outline": ["सुंदरकांड", "मंगलाचरण"],
            "footnotes": [{ "id": 5, "text": "संवाद" }],
            "lyrics": [
                { "time": 0, "type": "chaupai", "text": "पहली", "outlineIndex": 0, "footnoteIds": [5] },
                { "time": 11, "type": "samput", "text": "दूसरी", "outlineIndex": 1 }
            ]
        }"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.lyrics()[1].kind, LyricKind::Samput);
        assert_eq!(dataset.lyrics()[0].footnote_ids, vec![5]);
        assert!(dataset.lyrics()[1].footnote_ids.is_empty());
        assert_eq!(dataset.footnote(5).map(|f| f.text.as_str()), Some("संवाद"));
    }

    #[test]
    fn test_from_json_str_reports_validation_error() {
        let json = r#"{ "lyrics": [
            { "time": 3, "type": "doha", "text": "a", "outlineIndex": 0 },
            { "time": 1, "type": "doha", "text": "b", "outlineIndex": 0 }
        ] }"#;
        let err = Dataset::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("before previous line"));
    }

    #[test]
    fn test_bundled_sample_is_valid() {
        let dataset =
            Dataset::from_json_str(include_str!("../../demos/sundarkand_sample.json")).unwrap();
        assert!(!dataset.is_empty());
        for lyric in dataset.lyrics().iter() {
            for id in &lyric.footnote_ids {
                assert!(dataset.footnote(*id).is_some(), "missing footnote {}", id);
            }
        }
    }
}
