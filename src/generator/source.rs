use std::{
    collections::VecDeque,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::NaiveDate;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::record::{ContentRecord, RawRecord};

use super::utils::plain_excerpt;

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum QueryResult {
    Records(Vec<RawRecord>),
    Nodes { nodes: Vec<RawRecord> },
}

/// Loads every content record below `path`: a JSON query result file, or
/// a directory of markdown articles.
pub(super) fn load(path: &Path, excerpt_length: usize) -> anyhow::Result<Vec<ContentRecord>> {
    if path.is_dir() {
        load_markdown_dir(path, &ArticleParser::new(excerpt_length)?)
    } else {
        load_json(path)
    }
}

fn load_json(path: &Path) -> anyhow::Result<Vec<ContentRecord>> {
    let fd = File::open(path).with_context(|| format!("while opening {:?}", path))?;
    let result: QueryResult = serde_json::from_reader(BufReader::new(fd))
        .with_context(|| format!("while parsing {:?}", path))?;
    let raw = match result {
        QueryResult::Records(records) => records,
        QueryResult::Nodes { nodes } => nodes,
    };
    Ok(raw.into_iter().map(ContentRecord::from).collect())
}

fn load_markdown_dir(root: &Path, parser: &ArticleParser) -> anyhow::Result<Vec<ContentRecord>> {
    let mut records = vec![];

    let mut q = VecDeque::new();
    q.push_back(PathBuf::new());
    while let Some(path) = q.pop_front() {
        let mut entries = std::fs::read_dir(root.join(&path))
            .with_context(|| format!("while reading {:?}", root.join(&path)))?
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let meta = entry.metadata()?;
            let relative = path.join(entry.file_name());
            if meta.is_dir() {
                q.push_back(relative);
            } else if meta.is_file() && relative.extension().is_some_and(|e| e == "md") {
                debug!("Reading {:?}...", relative);
                let content = std::fs::read_to_string(root.join(&relative))
                    .with_context(|| format!("while reading {:?}", relative))?;
                records.push(parser.parse(&relative, &content));
            }
        }
    }

    Ok(records)
}

pub(super) struct ArticleParser {
    header: Regex,
    excerpt_length: usize,
}

impl ArticleParser {
    pub fn new(excerpt_length: usize) -> anyhow::Result<Self> {
        // pandoc-style metadata block
        let header = RegexBuilder::new(r"\A---\r?\n(?:(.*?)\r?\n)?---(?:\r?\n|\z)(.*)\z")
            .dot_matches_new_line(true)
            .build()?;
        Ok(Self {
            header,
            excerpt_length,
        })
    }

    /// Header fields that are missing or malformed stay `None`; whether the
    /// article is displayable is decided later.
    pub fn parse(&self, relative: &Path, content: &str) -> ContentRecord {
        let mut record = ContentRecord::default();

        let body = match self.header.captures(content) {
            Some(caps) => {
                let header = caps.get(1).map_or("", |m| m.as_str());
                for line in header.lines() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let Some((name, value)) = line.split_once(':') else {
                        warn!("Invalid header in {:?}: {}", relative, line);
                        continue;
                    };
                    let value = value.trim();
                    match name.trim() {
                        "title" => record.title = Some(value.to_string()),
                        "path" => record.path = Some(value.to_string()),
                        "date" => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                            Ok(date) => record.date = Some(date.format("%Y-%m-%d").to_string()),
                            Err(e) => warn!("Invalid date in {:?}: {} ({})", relative, value, e),
                        },
                        "tag" | "tags" => {
                            record.tags = Some(
                                value
                                    .split(',')
                                    .map(|t| Some(t.trim().to_string()))
                                    .collect(),
                            )
                        }
                        _ => {}
                    }
                }
                caps.get(2).map_or("", |m| m.as_str())
            }
            None => content,
        };

        if record.path.is_none() {
            record.path = Some(route_of(relative));
        }
        record.excerpt = Some(plain_excerpt(body, self.excerpt_length));
        record
    }
}

/// `2020/hello.md` is served at `/2020/hello.html`.
fn route_of(relative: &Path) -> String {
    let html = relative.with_extension("html");
    let segments: Vec<_> = html
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    format!("/{}", segments.join("/"))
}
