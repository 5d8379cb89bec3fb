use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use log::info;
use serde::Deserialize;

use crate::seo::ExtraMeta;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct SiteMetadata {
    pub title: String,
    pub description: String,
    pub author: String,
    pub twitter_creator: String,
    pub lang: String,
    /// Appended to the head of every page.
    pub extra_meta: Vec<ExtraMeta>,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            author: String::new(),
            twitter_creator: String::new(),
            lang: "ja".to_string(),
            extra_meta: vec![],
        }
    }
}

impl SiteMetadata {
    /// Reads site metadata from `path` if given, then lets `blog_name`
    /// (usually `$BLOG_NAME`) override the title.
    pub fn load(path: Option<&Path>, blog_name: Option<String>) -> anyhow::Result<Self> {
        let mut site = match path {
            Some(path) => {
                let fd = File::open(path)
                    .with_context(|| format!("while opening site metadata {:?}", path))?;
                serde_json::from_reader(BufReader::new(fd))
                    .with_context(|| format!("while parsing site metadata {:?}", path))?
            }
            None => {
                info!("No site metadata file given. using defaults...");
                SiteMetadata::default()
            }
        };
        if let Some(name) = blog_name.filter(|n| !n.is_empty()) {
            site.title = name;
        }
        Ok(site)
    }
}
