//! Head metadata for every generated page: document title plus the
//! description, OpenGraph and Twitter card meta tags. Anything a page does
//! not supply falls back to the site metadata.

use maud::{html, Markup, Render};
use serde::Deserialize;

use crate::site::SiteMetadata;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExtraMeta {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HeadMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub extra_meta: Vec<ExtraMeta>,
}

impl HeadMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_extra_meta(mut self, extra_meta: &[ExtraMeta]) -> Self {
        self.extra_meta.extend_from_slice(extra_meta);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MetaTag {
    Name { name: String, content: String },
    Property { property: String, content: String },
}

impl MetaTag {
    fn name(name: &str, content: &str) -> Self {
        MetaTag::Name {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    fn property(property: &str, content: &str) -> Self {
        MetaTag::Property {
            property: property.to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedHead {
    pub lang: String,
    pub title: String,
    pub meta: Vec<MetaTag>,
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

pub(crate) fn resolve(head: &HeadMeta, site: &SiteMetadata) -> ResolvedHead {
    let title = or_default(&head.title, &site.title);
    let description = or_default(&head.description, &site.description);

    let mut meta = vec![
        MetaTag::name("description", description),
        MetaTag::property("og:title", title),
        MetaTag::property("og:description", description),
        MetaTag::property("og:type", "website"),
        MetaTag::property("og:image", ""),
        MetaTag::name("twitter:card", "summary"),
        MetaTag::name("twitter:creator", &site.twitter_creator),
        MetaTag::name("twitter:title", title),
        MetaTag::name("twitter:description", description),
        MetaTag::name("twitter:image", ""),
    ];
    meta.extend(
        head.extra_meta
            .iter()
            .map(|m| MetaTag::name(&m.name, &m.content)),
    );

    ResolvedHead {
        lang: site.lang.clone(),
        title: title.to_string(),
        meta,
    }
}

impl Render for MetaTag {
    fn render(&self) -> Markup {
        match self {
            MetaTag::Name { name, content } => html! { meta name=(name) content=(content); },
            MetaTag::Property { property, content } => {
                html! { meta property=(property) content=(content); }
            }
        }
    }
}

impl Render for ResolvedHead {
    fn render(&self) -> Markup {
        html! {
            meta charset="utf-8";
            title { (self.title) }
            @for m in &self.meta { (m) }
        }
    }
}
