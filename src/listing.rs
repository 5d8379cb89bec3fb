use maud::{html, Markup, Render};

use crate::projection::DisplayItem;

pub(crate) const READ_MORE_LABEL: &str = "続きを読む……";

/// Maps `seq` with `f`, or gives `None` when there is nothing to map.
/// Callers emit no container at all for `None`.
pub(crate) fn empty_or<T, U>(seq: &[T], f: impl FnMut(&T) -> U) -> Option<Vec<U>> {
    if seq.is_empty() {
        None
    } else {
        Some(seq.iter().map(f).collect())
    }
}

/// Route of the tag-scoped list. The tag is a single percent-encoded
/// segment so that `#`, `?` and `%` stay part of it.
pub(crate) fn tag_href(tag: &str) -> String {
    format!("/tags/{}", urlencoding::encode(tag))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Link {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderedRow {
    pub key: String,
    pub title: Link,
    pub date: String,
    pub tags: Option<Vec<Link>>,
    pub excerpt: String,
    pub read_more: Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RenderResult {
    Empty,
    List(Vec<RenderedRow>),
}

impl From<Option<Vec<RenderedRow>>> for RenderResult {
    fn from(rows: Option<Vec<RenderedRow>>) -> Self {
        rows.map_or(RenderResult::Empty, RenderResult::List)
    }
}

fn render_row(item: &DisplayItem) -> RenderedRow {
    RenderedRow {
        key: item.path.to_string(),
        title: Link {
            href: item.path.to_string(),
            label: item.title.to_string(),
        },
        date: item.date.clone(),
        tags: empty_or(&item.tags, |t| Link {
            href: tag_href(t),
            label: t.to_string(),
        }),
        excerpt: item.excerpt.clone(),
        read_more: Link {
            href: item.path.to_string(),
            label: READ_MORE_LABEL.to_string(),
        },
    }
}

pub(crate) fn render(items: &[DisplayItem]) -> RenderResult {
    empty_or(items, render_row).into()
}

impl Render for Link {
    fn render(&self) -> Markup {
        html! {
            a.plain-link href=(self.href) { (self.label) }
        }
    }
}

impl Render for RenderedRow {
    fn render(&self) -> Markup {
        html! {
            li.article-list-item data-key=(self.key) {
                section.article {
                    div.article-title-wrapper {
                        a.plain-link href=(self.title.href) {
                            h1.article-title { (self.title.label) }
                        }
                        @if !self.date.is_empty() {
                            time.article-date { (self.date) }
                        }
                        @if let Some(tags) = &self.tags {
                            ul.title-tag-list {
                                @for tag in tags {
                                    li.title-tag-list-item { (tag) }
                                }
                            }
                        }
                    }
                    div.description-wrapper {
                        p.article-description { (self.excerpt) }
                        div.article-read-more { (self.read_more) }
                    }
                }
            }
        }
    }
}

impl Render for RenderResult {
    fn render(&self) -> Markup {
        html! {
            @if let RenderResult::List(rows) = self {
                ul.article-list {
                    @for row in rows { (row) }
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::projection::NonEmptyString;

    fn item(path: &str, tags: &[&str]) -> DisplayItem {
        DisplayItem {
            path: NonEmptyString::new(path).unwrap(),
            title: NonEmptyString::new(format!("title of {}", path)).unwrap(),
            excerpt: "an excerpt".to_string(),
            date: "2020-01-01".to_string(),
            tags: tags
                .iter()
                .map(|t| NonEmptyString::new(*t).unwrap())
                .collect(),
        }
    }

    #[test]
    fn test_empty_or() {
        let empty: [u8; 0] = [];
        assert_eq!(empty_or(&empty, |x| x + 1), None);
        assert_eq!(empty_or(&[1, 2], |x| x * 10), Some(vec![10, 20]));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), RenderResult::Empty);
        let html = render(&[]).render().into_string();
        assert_eq!(html, "");
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn test_render_one_item_is_one_keyed_row() {
        let result = render(&[item("/a", &["x"])]);
        let RenderResult::List(rows) = &result else {
            panic!("expected a list");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, "/a");
        assert_eq!(rows[0].title.href, "/a");
        assert_eq!(rows[0].read_more.href, "/a");
        assert_eq!(rows[0].read_more.label, READ_MORE_LABEL);

        let html = result.render().into_string();
        assert_eq!(html.matches("<ul class=\"article-list\">").count(), 1);
        assert_eq!(html.matches("<li class=\"article-list-item\"").count(), 1);
        assert!(html.contains("data-key=\"/a\""));
    }

    #[test]
    fn test_tag_sub_list_is_suppressed_per_row() {
        let RenderResult::List(rows) = render(&[item("/none", &[]), item("/one", &["x"])]) else {
            panic!("expected a list");
        };
        assert_eq!(rows[0].tags, None);
        assert_eq!(
            rows[1].tags,
            Some(vec![Link {
                href: "/tags/x".to_string(),
                label: "x".to_string(),
            }])
        );

        let without = rows[0].render().into_string();
        assert!(!without.contains("title-tag-list"));
        let with = rows[1].render().into_string();
        assert_eq!(with.matches("href=\"/tags/x\"").count(), 1);
        assert_eq!(with.matches("title-tag-list-item").count(), 1);
    }

    #[test]
    fn test_rows_follow_input_order() {
        let RenderResult::List(rows) = render(&[item("/b", &[]), item("/a", &[]), item("/c", &[])])
        else {
            panic!("expected a list");
        };
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["/b", "/a", "/c"]);
    }

    #[test]
    fn test_markup_is_escaped() {
        let mut it = item("/a", &["<b>"]);
        it.excerpt = "1 < 2 & 3".to_string();
        let html = render(&[it]).render().into_string();
        assert!(html.contains("1 &lt; 2 &amp; 3"));
        assert!(html.contains("/tags/%3Cb%3E"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_tag_href_is_one_segment() {
        assert_eq!(tag_href("rust"), "/tags/rust");
        assert_eq!(tag_href("c#"), "/tags/c%23");
        assert_eq!(tag_href("why?"), "/tags/why%3F");
        assert_eq!(tag_href("100%"), "/tags/100%25");
        assert_eq!(tag_href("日記"), "/tags/%E6%97%A5%E8%A8%98");
    }

    #[test]
    fn test_empty_date_has_no_time_element() {
        let mut it = item("/a", &[]);
        it.date = String::new();
        let html = render(&[it]).render().into_string();
        assert!(!html.contains("<time"));
        assert!(render(&[item("/b", &[])]).render().into_string().contains("<time"));
    }
}
