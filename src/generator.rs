use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::Utc;
use fs_extra::dir::CopyOptions;
use log::{debug, info, warn};
use maud::html;

use crate::{
    context::Context,
    list_item,
    manifest::{load_manifest, save_manifest, Manifest},
    metadata::PostMeta,
    posts::{get_posts_meta, sort_newest_first},
    renderer::{render_page, PageData},
    tag_page::{self, TagParams},
};

fn write_page(path: &Path, html: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html).with_context(|| format!("while writing {path:?}"))
}

/// Tags and post ids become file names, so path separators and dot segments are refused.
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(['/', '\\']) && segment != "." && segment != ".."
}

fn tag_page_path(out_dir: &Path, tag: &str) -> PathBuf {
    out_dir.join("tags").join(tag).join("index.html")
}

fn post_page_path(out_dir: &Path, id: &str) -> PathBuf {
    out_dir.join("posts").join(format!("{id}.html"))
}

/// Complete HTML document for the page of `tag`.
pub(crate) fn render_tag_page(
    ctx: &Context,
    tag: &str,
    posts: Option<&[PostMeta]>,
) -> anyhow::Result<String> {
    let metadata = tag_page::generate_metadata(tag);
    render_page(
        &ctx.handlebars,
        &PageData {
            blog_name: &ctx.blog_name,
            title: metadata.title,
            date: None,
            body: tag_page::render(tag, posts).into_string(),
        },
    )
}

fn render_post_page(ctx: &Context, post: &PostMeta) -> anyhow::Result<String> {
    let body = html! {
        article.post {
            h2 { (post.title) }
            @if !post.tags.is_empty() {
                p.post-tags {
                    @for tag in &post.tags {
                        a.post-tag href=(list_item::tag_href(tag)) { "#" (tag) }
                        " "
                    }
                }
            }
        }
    };
    render_page(
        &ctx.handlebars,
        &PageData {
            blog_name: &ctx.blog_name,
            title: post.title.clone(),
            date: Some(post.date.as_str()),
            body: body.into_string(),
        },
    )
}

fn render_index_page(ctx: &Context, posts: Option<&[PostMeta]>) -> anyhow::Result<String> {
    let body = match posts {
        Some(posts) if !posts.is_empty() => {
            let mut posts: Vec<&PostMeta> = posts.iter().collect();
            posts.sort_by(sort_newest_first);
            html! {
                section.post-list {
                    h2 { "Posts" }
                    ul {
                        @for post in &posts {
                            (list_item::render(post))
                        }
                    }
                }
            }
        }
        _ => tag_page::no_posts(),
    };
    render_page(
        &ctx.handlebars,
        &PageData {
            blog_name: &ctx.blog_name,
            title: "index".to_string(),
            date: None,
            body: body.into_string(),
        },
    )
}

/// Every page of the site, keyed by its path under the output dir, plus the
/// tags that got a page.
fn render_site(ctx: &Context) -> anyhow::Result<(Vec<(PathBuf, String)>, Vec<String>)> {
    let posts = get_posts_meta(&ctx.posts_dir)?;
    let posts = posts.as_deref();

    let mut pages = vec![(PathBuf::from("index.html"), render_index_page(ctx, posts)?)];

    for post in posts.unwrap_or_default() {
        if !is_safe_segment(&post.id) {
            warn!("skipping post {:?}: not usable as a file name", post.id);
            continue;
        }
        pages.push((post_page_path(Path::new(""), &post.id), render_post_page(ctx, post)?));
    }

    let mut tags = vec![];
    for TagParams { tag } in tag_page::generate_static_params(posts) {
        if !is_safe_segment(&tag) {
            warn!("skipping tag {tag:?}: not usable as a path segment");
            continue;
        }
        debug!("generating page for tag {tag:?}");
        pages.push((tag_page_path(Path::new(""), &tag), render_tag_page(ctx, &tag, posts)?));
        tags.push(tag);
    }

    Ok((pages, tags))
}

/// Builds the site into `ctx.out_dir`.
///
/// Returns `false` without touching the output when the previous build is
/// still within the revalidation interval and `force` is not set. Pages are
/// rendered before the old output is removed, so a failing build leaves it in place.
pub(crate) fn generate(ctx: &Context, force: bool) -> anyhow::Result<bool> {
    if !force {
        if let Some(manifest) = load_manifest(&ctx.out_dir) {
            if manifest.is_fresh(Utc::now()) {
                info!(
                    "Output was generated at {}; skipping rebuild.",
                    manifest.generated_at
                );
                return Ok(false);
            }
        }
    }

    let (pages, tags) = render_site(ctx)?;

    fs_extra::dir::remove(&ctx.out_dir)?;
    fs_extra::dir::create_all(&ctx.out_dir, false)?;

    // copy `public_dir`
    if ctx.public_dir.is_dir() {
        let mut cp_opts = CopyOptions::new();
        cp_opts.copy_inside = true;
        cp_opts.content_only = true;
        cp_opts.overwrite = true;
        fs_extra::dir::copy(&ctx.public_dir, &ctx.out_dir, &cp_opts)
            .with_context(|| format!("while copying {:?}", ctx.public_dir))?;
    } else {
        debug!("no public dir at {:?}", ctx.public_dir);
    }

    for (path, html) in &pages {
        write_page(&ctx.out_dir.join(path), html)?;
    }
    info!("generated {} pages, {} of them for tags", pages.len(), tags.len());

    save_manifest(
        &ctx.out_dir,
        &Manifest {
            generated_at: Utc::now(),
            tags,
        },
    )?;

    Ok(true)
}
