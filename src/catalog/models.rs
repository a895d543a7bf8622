//! Data models for the hanja catalog

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exam grade tier, ordered from the lowest (8급) to the highest (특급)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "8급")]
    Eighth,
    #[serde(rename = "7급Ⅱ")]
    SeventhII,
    #[serde(rename = "7급")]
    Seventh,
    #[serde(rename = "6급Ⅱ")]
    SixthII,
    #[serde(rename = "6급")]
    Sixth,
    #[serde(rename = "5급Ⅱ")]
    FifthII,
    #[serde(rename = "5급")]
    Fifth,
    #[serde(rename = "4급Ⅱ")]
    FourthII,
    #[serde(rename = "4급")]
    Fourth,
    #[serde(rename = "3급Ⅱ")]
    ThirdII,
    #[serde(rename = "3급")]
    Third,
    #[serde(rename = "2급")]
    Second,
    #[serde(rename = "1급")]
    First,
    #[serde(rename = "특급Ⅱ")]
    SpecialII,
    #[serde(rename = "특급")]
    Special,
}

impl Grade {
    pub const ALL: [Grade; 15] = [
        Grade::Eighth,
        Grade::SeventhII,
        Grade::Seventh,
        Grade::SixthII,
        Grade::Sixth,
        Grade::FifthII,
        Grade::Fifth,
        Grade::FourthII,
        Grade::Fourth,
        Grade::ThirdII,
        Grade::Third,
        Grade::Second,
        Grade::First,
        Grade::SpecialII,
        Grade::Special,
    ];

    /// Label as printed on the exam and stored in the `level` column
    pub fn label(self) -> &'static str {
        match self {
            Grade::Eighth => "8급",
            Grade::SeventhII => "7급Ⅱ",
            Grade::Seventh => "7급",
            Grade::SixthII => "6급Ⅱ",
            Grade::Sixth => "6급",
            Grade::FifthII => "5급Ⅱ",
            Grade::Fifth => "5급",
            Grade::FourthII => "4급Ⅱ",
            Grade::Fourth => "4급",
            Grade::ThirdII => "3급Ⅱ",
            Grade::Third => "3급",
            Grade::Second => "2급",
            Grade::First => "1급",
            Grade::SpecialII => "특급Ⅱ",
            Grade::Special => "특급",
        }
    }

    /// Dense sort rank, 1 for 8급 through 15 for 특급
    pub fn rank(self) -> i64 {
        self as i64 + 1
    }

    pub fn from_label(label: &str) -> Option<Grade> {
        let label = label.trim();
        Grade::ALL.into_iter().find(|g| g.label() == label)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Grade selection used by search, sampling and worksheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradeFilter {
    #[default]
    All,
    Only(Grade),
}

/// Label shown for the unfiltered option
pub const ALL_GRADES_LABEL: &str = "전체";

impl GradeFilter {
    /// Every selectable option in menu order: 전체 followed by the 15 tiers
    pub fn options() -> Vec<GradeFilter> {
        std::iter::once(GradeFilter::All)
            .chain(Grade::ALL.into_iter().map(GradeFilter::Only))
            .collect()
    }

    pub fn grade(self) -> Option<Grade> {
        match self {
            GradeFilter::All => None,
            GradeFilter::Only(grade) => Some(grade),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GradeFilter::All => ALL_GRADES_LABEL,
            GradeFilter::Only(grade) => grade.label(),
        }
    }

    /// Next option in menu order, wrapping from 특급 back to 전체
    pub fn next(self) -> GradeFilter {
        let options = GradeFilter::options();
        let pos = options.iter().position(|o| *o == self).unwrap_or(0);
        options[(pos + 1) % options.len()]
    }

    /// Previous option in menu order, wrapping from 전체 to 특급
    pub fn prev(self) -> GradeFilter {
        let options = GradeFilter::options();
        let pos = options.iter().position(|o| *o == self).unwrap_or(0);
        options[(pos + options.len() - 1) % options.len()]
    }
}

impl From<Option<Grade>> for GradeFilter {
    fn from(grade: Option<Grade>) -> Self {
        grade.map_or(GradeFilter::All, GradeFilter::Only)
    }
}

impl fmt::Display for GradeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGrade(pub String);

impl fmt::Display for UnknownGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown grade '{}'", self.0)
    }
}

impl std::error::Error for UnknownGrade {}

impl FromStr for GradeFilter {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ALL_GRADES_LABEL || s.eq_ignore_ascii_case("all") {
            return Ok(GradeFilter::All);
        }
        Grade::from_label(s)
            .map(GradeFilter::Only)
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

/// A single hanja entry from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: i64,
    pub hanja: String,
    pub main_sound: String,
    pub meaning: String,
    pub grade: Grade,
    pub level_order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strokes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_strokes: Option<i64>,
}

/// One page of search results together with the total match count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub records: Vec<CharacterRecord>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

impl SearchPage {
    /// Number of pages needed for `total_count`, never less than one
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size.max(1)).max(1)
}

/// Outcome recorded in the progress table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressOutcome {
    Correct,
    Incorrect,
}

/// Row of the progress table. Reserved: nothing in the app writes these yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub client_id: String,
    pub hanja_id: i64,
    pub result: ProgressOutcome,
    pub created_at: DateTime<Utc>,
}

/// Record count for one grade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCount {
    pub grade: Grade,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_ranks_are_dense() {
        let ranks: Vec<i64> = Grade::ALL.iter().map(|g| g.rank()).collect();
        assert_eq!(ranks, (1..=15).collect::<Vec<_>>());
        assert_eq!(Grade::Eighth.rank(), 1);
        assert_eq!(Grade::Special.rank(), 15);
    }

    #[test]
    fn test_grade_label_round_trip() {
        for grade in Grade::ALL {
            assert_eq!(Grade::from_label(grade.label()), Some(grade));
        }
        assert_eq!(Grade::from_label(" 4급Ⅱ "), Some(Grade::FourthII));
        assert_eq!(Grade::from_label("9급"), None);
    }

    #[test]
    fn test_grade_filter_options() {
        let options = GradeFilter::options();
        assert_eq!(options.len(), 16);
        assert_eq!(options[0], GradeFilter::All);
        assert_eq!(options[1], GradeFilter::Only(Grade::Eighth));
    }

    #[test]
    fn test_grade_filter_parse() {
        assert_eq!("".parse::<GradeFilter>(), Ok(GradeFilter::All));
        assert_eq!("전체".parse::<GradeFilter>(), Ok(GradeFilter::All));
        assert_eq!("8급".parse::<GradeFilter>(), Ok(GradeFilter::Only(Grade::Eighth)));
        assert!("five".parse::<GradeFilter>().is_err());
    }

    #[test]
    fn test_grade_filter_cycles() {
        assert_eq!(GradeFilter::All.next(), GradeFilter::Only(Grade::Eighth));
        assert_eq!(GradeFilter::Only(Grade::Special).next(), GradeFilter::All);
        assert_eq!(GradeFilter::All.prev(), GradeFilter::Only(Grade::Special));
    }

    #[test]
    fn test_grade_serializes_as_label() {
        let json = serde_json::to_string(&Grade::SeventhII).unwrap();
        assert_eq!(json, "\"7급Ⅱ\"");
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(5, 0), 5);
        assert_eq!(total_pages(usize::MAX, usize::MAX), 1);
        assert_eq!(total_pages(usize::MAX, 2), usize::MAX / 2 + 1);
    }
}
