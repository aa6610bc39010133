use std::path::Path;

use anyhow::Context;
use handlebars::{handlebars_helper, Handlebars};
use log::debug;
use serde::Serialize;

use crate::date::get_formatted_date;

const DEFAULT_LAYOUT: &str = include_str!("../template/layout.hbs");

handlebars_helper!(formatted_date: |date: str| get_formatted_date(date));

#[derive(Serialize, Debug)]
pub(crate) struct PageData<'a> {
    pub blog_name: &'a str,
    pub title: String,
    /// Raw date of the page, shown through the `formatted_date` helper.
    pub date: Option<&'a str>,
    pub body: String,
}

/// Registers the `layout` template, preferring `layout.hbs` in `template_dir`.
pub(crate) fn generate_renderer(template_dir: &Path) -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("formatted_date", Box::new(formatted_date));

    let layout_path = template_dir.join("layout.hbs");
    if layout_path.is_file() {
        debug!("using layout from {layout_path:?}");
        handlebars
            .register_template_file("layout", &layout_path)
            .context("layout.hbs")?;
    } else {
        handlebars
            .register_template_string("layout", DEFAULT_LAYOUT)
            .context("built-in layout")?;
    }

    Ok(handlebars)
}

pub(crate) fn render_page(handlebars: &Handlebars, data: &PageData) -> anyhow::Result<String> {
    handlebars
        .render("layout", data)
        .with_context(|| format!("while rendering {:?}", data.title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn wraps_body_and_escapes_title() {
        let temp = TempDir::new().unwrap();
        let hb = generate_renderer(temp.path()).unwrap();
        let page = render_page(
            &hb,
            &PageData {
                blog_name: "Diary",
                title: "Posts about <b>".to_string(),
                date: None,
                body: "<p>hi</p>".to_string(),
            },
        )
        .unwrap();
        assert!(page.contains("<title>Posts about &lt;b&gt; | Diary</title>"));
        assert!(page.contains("<p>hi</p>"));
        assert!(!page.contains("page-date"));
    }

    #[test]
    fn built_in_layout_formats_page_date() {
        let temp = TempDir::new().unwrap();
        let hb = generate_renderer(temp.path()).unwrap();
        let page = render_page(
            &hb,
            &PageData {
                blog_name: "",
                title: "One".to_string(),
                date: Some("2024-01-05"),
                body: String::new(),
            },
        )
        .unwrap();
        assert!(page.contains(r#"<p class="page-date">January 5, 2024</p>"#));
    }

    #[test]
    fn custom_layout_and_date_helper() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("layout.hbs"),
            "{{title}}|{{formatted_date \"2024-01-05\"}}",
        )
        .unwrap();
        let hb = generate_renderer(temp.path()).unwrap();
        let page = render_page(
            &hb,
            &PageData {
                blog_name: "",
                title: "t".to_string(),
                date: None,
                body: String::new(),
            },
        )
        .unwrap();
        assert_eq!(page, "t|January 5, 2024");
    }
}
