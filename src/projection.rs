//! Turns raw content records into display items.
//!
//! On article lists a record becomes displayable only when its path, title,
//! date and tags are all present; the home index only needs path and title.
//! Anything else is skipped without raising an error, so one broken article
//! never takes a whole list page down with it.

use std::{fmt, ops::Deref};

use crate::record::ContentRecord;

/// A string that is known to contain at least one byte.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NonEmptyString(String);

impl NonEmptyString {
    pub fn new(s: impl Into<String>) -> Option<Self> {
        let s = s.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DisplayItem {
    pub path: NonEmptyString,
    pub title: NonEmptyString,
    pub excerpt: String,
    pub date: String,
    pub tags: Vec<NonEmptyString>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SkipReason {
    MissingPath,
    MissingTitle,
    MissingDate,
    MissingTags,
    EmptyPath,
    EmptyTitle,
}

/// Which fields a record must carry to be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Requirement {
    /// path, title, date and tags (tag-scoped article lists)
    Full,
    /// path and title; a missing date or tag list is shown as empty
    PathAndTitle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Projected {
    Item(DisplayItem),
    Skip(SkipReason),
}

/// Decides whether `record` is displayable under `requirement`. This is the
/// only place that looks at the optional fields.
pub(crate) fn validate(record: &ContentRecord, requirement: Requirement) -> Projected {
    let Some(path) = &record.path else {
        return Projected::Skip(SkipReason::MissingPath);
    };
    let Some(title) = &record.title else {
        return Projected::Skip(SkipReason::MissingTitle);
    };
    let (date, tags) = match (requirement, &record.date, &record.tags) {
        (Requirement::Full, None, _) => return Projected::Skip(SkipReason::MissingDate),
        (Requirement::Full, _, None) => return Projected::Skip(SkipReason::MissingTags),
        (_, date, tags) => (
            date.as_deref().unwrap_or_default(),
            tags.as_deref().unwrap_or_default(),
        ),
    };

    let Some(path) = NonEmptyString::new(path.as_str()) else {
        return Projected::Skip(SkipReason::EmptyPath);
    };
    let Some(title) = NonEmptyString::new(title.as_str()) else {
        return Projected::Skip(SkipReason::EmptyTitle);
    };

    Projected::Item(DisplayItem {
        path,
        title,
        excerpt: record.excerpt.clone().unwrap_or_default(),
        date: date.to_string(),
        tags: tags
            .iter()
            .filter_map(|t| t.as_deref().and_then(NonEmptyString::new))
            .collect(),
    })
}

/// Keeps the records that are displayable on an article list, in their
/// original order.
pub(crate) fn project(records: &[ContentRecord]) -> Vec<DisplayItem> {
    project_with(records, Requirement::Full)
}

pub(crate) fn project_with(
    records: &[ContentRecord],
    requirement: Requirement,
) -> Vec<DisplayItem> {
    records
        .iter()
        .filter_map(|record| match validate(record, requirement) {
            Projected::Item(item) => Some(item),
            Projected::Skip(_) => None,
        })
        .collect()
}
