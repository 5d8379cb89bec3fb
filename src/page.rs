use anyhow::Context;
use handlebars::Handlebars;
use maud::Render;
use serde::Serialize;

use crate::{
    listing::RenderResult,
    seo::{self, HeadMeta},
    site::SiteMetadata,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Page {
    pub heading: String,
    pub body: RenderResult,
    pub head: HeadMeta,
}

#[derive(Serialize, Debug)]
struct LayoutData<'a> {
    lang: &'a str,
    blog_name: &'a str,
    author: &'a str,
    head: String,
    heading: &'a str,
    body: String,
}

pub(crate) fn wrap(heading: impl Into<String>, body: RenderResult, head: HeadMeta) -> Page {
    Page {
        heading: heading.into(),
        body,
        head,
    }
}

impl Page {
    pub fn render(
        &self,
        handlebars: &Handlebars<'_>,
        site: &SiteMetadata,
    ) -> anyhow::Result<String> {
        let head = seo::resolve(&self.head, site);
        let data = LayoutData {
            lang: &head.lang,
            blog_name: &site.title,
            author: &site.author,
            head: head.render().into_string(),
            heading: &self.heading,
            body: self.body.render().into_string(),
        };
        handlebars
            .render("layout", &data)
            .with_context(|| format!("while rendering page {:?}", self.heading))
    }
}
