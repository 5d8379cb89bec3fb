use std::{
    borrow::Borrow,
    cmp::Ordering,
    collections::{BTreeSet, HashSet},
};

use chrono::NaiveDate;
use pulldown_cmark::{Event, Parser, TagEnd};

use crate::{projection::DisplayItem, record::ContentRecord};

const ELLIPSIS: char = '…';

fn record_date(record: &ContentRecord) -> Option<NaiveDate> {
    record
        .date
        .as_deref()
        .and_then(|d| d.get(..10))
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

/// Newest first. Records without a usable date go last.
pub(super) fn sort_record<T: Borrow<ContentRecord>>(a: &T, b: &T) -> Ordering {
    match (record_date(a.borrow()), record_date(b.borrow())) {
        (Some(ref a_date), Some(ref b_date)) => b_date.cmp(a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Plain text of a markdown body, whitespace collapsed and pruned to
/// `budget` characters (the ellipsis included).
pub(super) fn plain_excerpt(body: &str, budget: usize) -> String {
    let mut text = String::new();
    for event in Parser::new(body) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock,
            ) => text.push(' '),
            _ => {}
        }
    }
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    prune(&collapsed, budget)
}

pub(super) fn prune(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let mut pruned: String = text.chars().take(budget.saturating_sub(1)).collect();
    pruned.push(ELLIPSIS);
    pruned
}

pub(super) fn collect_tags(items: &[DisplayItem]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.tags.iter().map(|t| t.to_string()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether `tag` can name a single directory under `tags/`.
pub(super) fn is_path_segment(tag: &str) -> bool {
    !tag.contains(['/', '\\']) && tag != "." && tag != ".."
}

pub(super) fn duplicate_paths(items: &[DisplayItem]) -> Vec<&str> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|item| item.path.as_str())
        .filter(|path| !seen.insert(*path))
        .collect()
}
