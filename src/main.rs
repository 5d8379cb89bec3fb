use anyhow::bail;
use clap::{command, value_parser, Arg};
use context::Context;
use generator::generate;
use site::SiteMetadata;
use std::path::PathBuf;

mod context;
mod generator;
mod listing;
mod page;
mod projection;
mod record;
mod renderer;
mod seo;
mod site;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args(&[
            Arg::new("content")
                .help("Directory of markdown articles, or a JSON file of content records")
                .value_parser(value_parser!(PathBuf))
                .default_value("posts"),
            Arg::new("out_dir")
                .help("Directory path of output. Existing contents will be removed.")
                .value_parser(value_parser!(PathBuf))
                .default_value("out"),
            Arg::new("public_dir")
                .long("public")
                .help("Directory whose contents are copied into the output as they are")
                .value_parser(value_parser!(PathBuf)),
            Arg::new("template_dir")
                .long("template-dir")
                .help("Directory containing layout.hbs")
                .value_parser(value_parser!(PathBuf)),
            Arg::new("site")
                .long("site")
                .help(
                    "JSON file of site metadata \
                     (title, description, author, twitter_creator, lang)",
                )
                .value_parser(value_parser!(PathBuf)),
            Arg::new("blog_name")
                .long("blog-name")
                .env("BLOG_NAME")
                .help("Overrides the site title"),
            Arg::new("excerpt_length")
                .long("excerpt-length")
                .help("Maximum number of characters of an article excerpt")
                .value_parser(value_parser!(usize))
                .default_value("100"),
        ])
        .get_matches();

    let Some(content_path) = matches.get_one::<PathBuf>("content") else {
        bail!("content is required.");
    };
    if !content_path.exists() {
        bail!("content must be a directory or a JSON file.");
    }
    let Some(out_dir) = matches.get_one::<PathBuf>("out_dir") else {
        bail!("out_dir is required.");
    };
    if out_dir.exists() && !out_dir.is_dir() {
        bail!("if out_dir exists, it must be directory.");
    }
    let public_dir = matches.get_one::<PathBuf>("public_dir");
    if public_dir.is_some_and(|p| !p.is_dir()) {
        bail!("public_dir must be a directory.");
    }
    let template_dir = matches.get_one::<PathBuf>("template_dir");
    if template_dir.is_some_and(|p| !p.is_dir()) {
        bail!("template_dir must be a directory.");
    }
    let excerpt_length = matches
        .get_one::<usize>("excerpt_length")
        .copied()
        .unwrap_or(100);

    let site = SiteMetadata::load(
        matches.get_one::<PathBuf>("site").map(PathBuf::as_path),
        matches.get_one::<String>("blog_name").cloned(),
    )?;
    let handlebars = renderer::generate_renderer(template_dir.map(PathBuf::as_path))?;

    Context::init(Context {
        content_path: content_path.to_owned(),
        out_dir: out_dir.to_owned(),
        public_dir: public_dir.cloned(),
        excerpt_length,
        site,
        handlebars,
    })?;

    generate()
}
