use std::path::Path;

use anyhow::Context;
use handlebars::Handlebars;
use log::info;

const DEFAULT_LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="{{lang}}">
<head>
{{{head}}}
</head>
<body>
<header class="site-header"><a href="/">{{blog_name}}</a></header>
<main>
<article>
<h1 class="page-title">{{heading}}</h1>
{{{body}}}
</article>
</main>
{{#if author}}<footer class="site-footer">{{author}}</footer>{{/if}}
</body>
</html>
"#;

/// Registers the document layout. `layout.hbs` in `template_dir` replaces
/// the built-in one.
pub(crate) fn generate_renderer(
    template_dir: Option<&Path>,
) -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    match template_dir {
        Some(dir) => handlebars
            .register_template_file("layout", dir.join("layout.hbs"))
            .context("layout.hbs")?,
        None => {
            info!("No template directory given. using the built-in layout...");
            handlebars
                .register_template_string("layout", DEFAULT_LAYOUT)
                .context("built-in layout")?
        }
    }

    Ok(handlebars)
}
