use std::{fs, path::Path};

use anyhow::Context as _;
use fs_extra::dir::CopyOptions;
use log::{debug, info, warn};

use crate::{
    context::Context,
    listing,
    page::{self, Page},
    projection::{project, project_with, validate, Projected, Requirement},
    record::ContentRecord,
    seo::HeadMeta,
};

mod source;
mod utils;

use utils::{collect_tags, duplicate_paths, is_path_segment, sort_record};

const INDEX_HEADING: &str = "記事一覧";
const INDEX_TITLE: &str = "Home";

fn tag_heading(tag_name: &str) -> String {
    format!("{}の記事一覧", tag_name)
}

fn write_page(ctx: &Context, out_path: &Path, page: &Page) -> anyhow::Result<()> {
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let html = page.render(&ctx.handlebars, &ctx.site)?;
    fs::write(out_path, html).with_context(|| format!("while writing {:?}", out_path))?;
    debug!("Wrote {:?}", out_path);
    Ok(())
}

fn generate_tag_page(
    ctx: &Context,
    records: &[ContentRecord],
    tag_name: &str,
) -> anyhow::Result<()> {
    let tagged: Vec<ContentRecord> = records
        .iter()
        .filter(|r| r.has_tag(tag_name))
        .cloned()
        .collect();
    let items = project(&tagged);
    debug!(
        "tag {}: {} of {} records displayable",
        tag_name,
        items.len(),
        tagged.len()
    );

    let page = page::wrap(
        tag_heading(tag_name),
        listing::render(&items),
        HeadMeta::titled(tag_name).with_extra_meta(&ctx.site.extra_meta),
    );
    let out_path = ctx.out_dir.join("tags").join(tag_name).join("index.html");
    write_page(ctx, &out_path, &page)
        .with_context(|| format!("while generating tag page for {:?}", tag_name))
}

/// Builds every list page described by `ctx`.
pub(crate) fn build(ctx: &Context) -> anyhow::Result<()> {
    if ctx.out_dir.exists() {
        fs_extra::dir::remove(&ctx.out_dir)?;
    }
    fs::create_dir_all(&ctx.out_dir)?;

    // copy `public_dir`
    if let Some(public_dir) = &ctx.public_dir {
        let mut cp_opts = CopyOptions::new();
        cp_opts.content_only = true;
        cp_opts.overwrite = true;
        fs_extra::dir::copy(public_dir, &ctx.out_dir, &cp_opts)
            .with_context(|| format!("while copying {:?}", public_dir))?;
    }

    let mut records = source::load(&ctx.content_path, ctx.excerpt_length)
        .with_context(|| format!("while loading content from {:?}", ctx.content_path))?;
    records.sort_by(sort_record);

    for record in records.iter() {
        if let Projected::Skip(reason) = validate(record, Requirement::PathAndTitle) {
            debug!("Skipping {:?}: {:?}", record.path, reason);
        }
    }

    // index page
    let items = project_with(&records, Requirement::PathAndTitle);
    info!("{} of {} records listed on the index", items.len(), records.len());
    for path in duplicate_paths(&items) {
        warn!("Duplicate article path: {}", path);
    }
    let index = page::wrap(
        INDEX_HEADING,
        listing::render(&items),
        HeadMeta::titled(INDEX_TITLE).with_extra_meta(&ctx.site.extra_meta),
    );
    write_page(ctx, &ctx.out_dir.join("index.html"), &index)
        .context("while generating index.html")?;

    // tag pages
    for tag_name in collect_tags(&items) {
        if !is_path_segment(&tag_name) {
            warn!(
                "Tag {:?} cannot be used as a directory name. skipping its page...",
                tag_name
            );
            continue;
        }
        generate_tag_page(ctx, &records, &tag_name)?;
    }

    Ok(())
}

pub(crate) fn generate() -> anyhow::Result<()> {
    build(Context::instance()?)
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::*;
    use crate::{renderer::generate_renderer, site::SiteMetadata};

    fn context(content_path: PathBuf, out_dir: PathBuf, public_dir: Option<PathBuf>) -> Context {
        Context {
            content_path,
            out_dir,
            public_dir,
            excerpt_length: 100,
            site: SiteMetadata {
                title: "diary".to_string(),
                ..Default::default()
            },
            handlebars: generate_renderer(None).unwrap(),
        }
    }

    #[test]
    fn test_build_from_markdown() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let posts = dir.path().join("posts");
        let public = dir.path().join("public");
        let out = dir.path().join("out");
        fs::create_dir_all(&posts)?;
        fs::create_dir_all(&public)?;
        fs::create_dir_all(&out)?;
        fs::write(out.join("stale.html"), "old")?;
        fs::write(public.join("style.css"), "body {}")?;
        fs::write(
            posts.join("first.md"),
            "---\ntitle: First\ndate: 2020-01-01\ntag: rust, go\n---\nfirst body\n",
        )?;
        fs::write(
            posts.join("second.md"),
            "---\ntitle: Second\ndate: 2020-02-01\ntag: go\n---\nsecond body\n",
        )?;
        fs::write(posts.join("draft.md"), "---\ntitle: Draft\n---\nno date\n")?;

        build(&context(posts, out.clone(), Some(public)))?;

        assert!(!out.join("stale.html").exists());
        assert!(out.join("style.css").exists());

        let index = fs::read_to_string(out.join("index.html"))?;
        assert!(index.contains("記事一覧"));
        assert!(index.contains("<title>Home</title>"));
        assert_eq!(index.matches("article-list-item").count(), 3);
        let second = index.find("/second.html").unwrap();
        let first = index.find("/first.html").unwrap();
        let draft = index.find("/draft.html").unwrap();
        assert!(second < first);
        assert!(first < draft);

        let rust = fs::read_to_string(out.join("tags").join("rust").join("index.html"))?;
        assert!(rust.contains("rustの記事一覧"));
        assert!(rust.contains("/first.html"));
        assert!(!rust.contains("/second.html"));

        let go = fs::read_to_string(out.join("tags").join("go").join("index.html"))?;
        assert_eq!(go.matches("article-list-item").count(), 2);
        assert!(!go.contains("Draft"));
        Ok(())
    }

    #[test]
    fn test_untagged_article_is_listed_on_index_only() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let content = dir.path().join("content.json");
        fs::write(
            &content,
            r#"[{"path": "/untagged", "title": "Untagged", "date": "2020-01-02"},
                {"path": "/undated", "title": "Undated", "tags": ["rust"]}]"#,
        )?;
        let out = dir.path().join("out");

        build(&context(content, out.clone(), None))?;

        let index = fs::read_to_string(out.join("index.html"))?;
        assert!(index.contains("data-key=\"/untagged\""));
        assert!(index.contains("data-key=\"/undated\""));
        assert_eq!(index.matches("title-tag-list-item").count(), 1);

        // linked from the index, but an undated article is not listed there
        let rust = fs::read_to_string(out.join("tags").join("rust").join("index.html"))?;
        assert!(rust.contains("rustの記事一覧"));
        assert!(!rust.contains("article-list"));
        Ok(())
    }

    #[test]
    fn test_build_without_displayable_records() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let content = dir.path().join("content.json");
        fs::write(
            &content,
            r#"[{"path": null, "title": "B", "date": "2020-01-02", "tags": []}]"#,
        )?;
        let out = dir.path().join("out");

        build(&context(content, out.clone(), None))?;

        let index = fs::read_to_string(out.join("index.html"))?;
        assert!(!index.contains("article-list"));
        assert!(!out.join("tags").exists());
        Ok(())
    }

    #[test]
    fn test_unsafe_tag_has_no_page() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let content = dir.path().join("content.json");
        fs::write(
            &content,
            r#"[{"path": "/a", "title": "A", "date": "2020-01-02", "tags": ["..", "ok"]}]"#,
        )?;
        let out = dir.path().join("out");

        build(&context(content, out.clone(), None))?;

        assert!(out.join("tags").join("ok").join("index.html").exists());
        let index = fs::read_to_string(out.join("index.html"))?;
        assert!(index.contains("<title>Home</title>"));
        assert!(!index.contains("..の記事一覧"));
        Ok(())
    }

    #[test]
    fn test_missing_content_fails() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path().join("missing.json"), dir.path().join("out"), None);
        assert!(build(&ctx).is_err());
    }
}
