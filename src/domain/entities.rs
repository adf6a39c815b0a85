//! Domain records mirrored from backend storage and local content.

use serde::Serialize;
use time::Date;

use crate::domain::types::ExperienceCategory;

/// A stored fact about a technology or competency. The category label is a
/// free-form string; new categories require no code change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRecord {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub is_highlight: bool,
}

/// One category group of skills in first-seen order. The synthetic
/// `highlights` group is always present and always first; highlighted
/// skills appear there in addition to their own category group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedSkills {
    pub category: String,
    pub skills: Vec<SkillRecord>,
}

/// A work or education timeline entry as stored, with raw date values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceRecord {
    pub id: i64,
    pub category: ExperienceCategory,
    pub organization: String,
    pub title: String,
    pub role: String,
    pub content: String,
    pub start_date: String,
    pub end_date: String,
}

/// A timeline entry with its dates replaced by display strings
/// (`dd MonthName yyyy`); every other field passes through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedExperience {
    pub id: i64,
    pub category: ExperienceCategory,
    pub organization: String,
    pub title: String,
    pub role: String,
    pub content: String,
    pub start_date: String,
    pub end_date: String,
}

/// Blog post metadata validated from content front matter. The date is
/// typed here so listing code never sees an unparsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogMetadata {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub date: Date,
}
