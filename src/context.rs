use std::{path::PathBuf, sync::OnceLock};

use anyhow::anyhow;

use crate::site::SiteMetadata;

#[derive(Debug)]
pub(crate) struct Context {
    pub content_path: PathBuf,
    pub out_dir: PathBuf,
    pub public_dir: Option<PathBuf>,
    pub excerpt_length: usize,

    pub site: SiteMetadata,

    pub handlebars: handlebars::Handlebars<'static>,
}

static CONTEXT: OnceLock<Context> = OnceLock::new();

impl Context {
    pub fn init(context: Context) -> anyhow::Result<()> {
        CONTEXT
            .set(context)
            .map_err(|_| anyhow!("context is already initialized"))
    }

    pub fn instance() -> anyhow::Result<&'static Context> {
        CONTEXT
            .get()
            .ok_or_else(|| anyhow!("context is not initialized"))
    }
}
