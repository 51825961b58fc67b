//! Historical record model.
//!
//! Records are immutable once loaded. Everything that reasons about position on
//! the time axis goes through [`DateSpec::ordering_year`], which folds the era
//! flag into a signed year (negative for BCE).

use eyre::{Result, WrapErr};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Group key used when a record carries no dynasty or era label.
pub const UNCLASSIFIED_GROUP: &str = "Unclassified";

/// Importance tier used when the source value is missing or out of range.
pub const DEFAULT_IMPORTANCE: u8 = 3;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Era {
    #[serde(rename = "BCE")]
    Bce,
    #[default]
    #[serde(rename = "CE", other)]
    Ce,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Exact,
    Decade,
    Century,
    #[default]
    #[serde(other)]
    Year,
}

/// A point in historical time as produced by the extraction pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateSpec {
    /// Magnitude of the year. The sign is ignored for BCE dates.
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub circa: bool,
    pub era: Era,
    pub precision: Precision,
}

impl DateSpec {
    pub fn ce(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    pub fn bce(year: i32) -> Self {
        Self {
            year,
            era: Era::Bce,
            ..Default::default()
        }
    }

    /// Builds a date from a signed ordering year.
    pub fn from_ordering_year(year: i32) -> Self {
        if year < 0 {
            Self::bce(-year)
        } else {
            Self::ce(year)
        }
    }

    pub fn with_circa(mut self, circa: bool) -> Self {
        self.circa = circa;
        self
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_month_day(mut self, month: u32, day: Option<u32>) -> Self {
        self.month = Some(month);
        self.day = day;
        self
    }

    /// Signed position on the time axis: `-|year|` for BCE, `year` otherwise.
    ///
    /// `i32::MIN` saturates to `-i32::MAX`.
    pub fn ordering_year(&self) -> i32 {
        match self.era {
            Era::Bce => -self.year.saturating_abs(),
            Era::Ce => self.year,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Event,
    Period,
}

/// Citation back into the source text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRef {
    pub chapter: u32,
    pub line_start: u32,
    pub line_end: u32,
    pub excerpt: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    /// Raw entry type from the pipeline (battle, treaty, reign_start, ...).
    #[serde(rename = "type", default = "default_category")]
    pub category: String,
    pub date_start: DateSpec,
    #[serde(default)]
    pub date_end: Option<DateSpec>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_importance")]
    pub importance: Importance,
    #[serde(default)]
    pub source: SourceRef,
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub group_dynasty: String,
    #[serde(default)]
    pub group_era: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_caption: Option<String>,
    #[serde(default)]
    pub image_attribution: Option<String>,
}

fn default_category() -> String {
    "event".to_string()
}

/// Importance tier in `1..=5`, 5 being the most important.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Importance(u8);

impl Importance {
    /// Out-of-range tiers collapse to the default tier.
    pub fn new(tier: i64) -> Self {
        if (1..=5).contains(&tier) {
            Self(tier as u8)
        } else {
            Self(DEFAULT_IMPORTANCE)
        }
    }

    pub fn tier(self) -> u8 {
        self.0
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self(DEFAULT_IMPORTANCE)
    }
}

fn deserialize_importance<'de, D>(deserializer: D) -> std::result::Result<Importance, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let tier = match raw {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    Ok(Importance::new(tier))
}

impl Record {
    /// Minimal constructor for a point event; the other fields take their defaults.
    pub fn event(id: impl Into<String>, title: impl Into<String>, start: DateSpec) -> Self {
        Self {
            id: RecordId::new(id),
            category: default_category(),
            date_start: start,
            date_end: None,
            title: title.into(),
            description: String::new(),
            importance: Importance::default(),
            source: SourceRef::default(),
            people: vec![],
            locations: vec![],
            group_dynasty: String::new(),
            group_era: String::new(),
            tags: vec![],
            image_url: None,
            image_caption: None,
            image_attribution: None,
        }
    }

    pub fn period(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateSpec,
        end: DateSpec,
    ) -> Self {
        let mut record = Self::event(id, title, start);
        record.category = "period".to_string();
        record.date_end = Some(end);
        record
    }

    pub fn with_groups(mut self, dynasty: impl Into<String>, era: impl Into<String>) -> Self {
        self.group_dynasty = dynasty.into();
        self.group_era = era.into();
        self
    }

    pub fn with_importance(mut self, tier: i64) -> Self {
        self.importance = Importance::new(tier);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Periods are records typed `period` or carrying an end date after their start.
    pub fn kind(&self) -> RecordKind {
        let has_span = self
            .date_end
            .as_ref()
            .is_some_and(|end| end.ordering_year() > self.date_start.ordering_year());
        if self.category == "period" || has_span {
            RecordKind::Period
        } else {
            RecordKind::Event
        }
    }

    pub fn ordering_year(&self) -> i32 {
        self.date_start.ordering_year()
    }

    /// End of the occupied time range, never before the start.
    pub fn end_ordering_year(&self) -> i32 {
        let start = self.ordering_year();
        match (self.kind(), &self.date_end) {
            (RecordKind::Period, Some(end)) => end.ordering_year().max(start),
            _ => start,
        }
    }

    pub fn group_key(&self, mode: super::GroupingMode) -> &str {
        let key = match mode {
            super::GroupingMode::Dynasty => self.group_dynasty.as_str(),
            super::GroupingMode::Era => self.group_era.as_str(),
        };
        if key.trim().is_empty() {
            UNCLASSIFIED_GROUP
        } else {
            key
        }
    }
}

/// Parses a `timeline_entries.json` document (a JSON array of entries).
pub fn records_from_json(json: &str) -> Result<Vec<Record>> {
    serde_json::from_str(json).wrap_err("failed to decode timeline entries")
}

pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let records = records_from_json(&json)
        .wrap_err_with(|| format!("failed to parse {}", path.display()))?;
    tracing::info!(count = records.len(), path = %path.display(), "loaded timeline records");
    Ok(records)
}
