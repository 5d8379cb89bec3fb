use serde::Deserialize;

type RawTags = Option<Vec<Option<String>>>;

/// One article as handed over by the content source. Every field may be
/// missing; deciding what is displayable is left to the projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ContentRecord {
    pub path: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub date: Option<String>,
    pub tags: RawTags,
}

impl ContentRecord {
    pub fn has_tag(&self, tag_name: &str) -> bool {
        self.tags
            .iter()
            .flatten()
            .any(|t| t.as_deref() == Some(tag_name))
    }
}

// `tags` wins when both spellings are present
#[derive(Deserialize, Debug, Default)]
pub(crate) struct Frontmatter {
    path: Option<String>,
    title: Option<String>,
    date: Option<String>,
    tag: RawTags,
    tags: RawTags,
}

// query result node: metadata under `frontmatter`, excerpt beside it.
// `frontmatter` has to be present (even as null) for a node to match.
#[derive(Deserialize, Debug)]
pub(crate) struct QueryNode {
    #[serde(deserialize_with = "Option::deserialize")]
    frontmatter: Option<Frontmatter>,
    excerpt: Option<String>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct FlatRecord {
    path: Option<String>,
    title: Option<String>,
    excerpt: Option<String>,
    date: Option<String>,
    tag: RawTags,
    tags: RawTags,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(crate) enum RawRecord {
    Node(QueryNode),
    Flat(FlatRecord),
}

impl From<RawRecord> for ContentRecord {
    fn from(raw: RawRecord) -> Self {
        match raw {
            RawRecord::Flat(flat) => ContentRecord {
                path: flat.path,
                title: flat.title,
                excerpt: flat.excerpt,
                date: flat.date,
                tags: flat.tags.or(flat.tag),
            },
            RawRecord::Node(QueryNode {
                frontmatter,
                excerpt,
            }) => {
                let fm = frontmatter.unwrap_or_default();
                ContentRecord {
                    path: fm.path,
                    title: fm.title,
                    excerpt,
                    date: fm.date,
                    tags: fm.tags.or(fm.tag),
                }
            }
        }
    }
}
