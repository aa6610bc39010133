use std::{borrow::Borrow, cmp::Ordering, path::Path};

use anyhow::{bail, Context};
use log::{debug, info};
use regex::{Regex, RegexBuilder};

use crate::{date::parse_date, metadata::PostMeta};

const POST_EXTENSION: &str = "md";

fn header_pattern() -> anyhow::Result<Regex> {
    // pandoc-style metadata block
    Ok(RegexBuilder::new(r"\A---\r?\n(.*?)^---\r?$")
        .dot_matches_new_line(true)
        .multi_line(true)
        .build()?)
}

fn parse_post(id: &str, content: &str, header_pattern: &Regex) -> anyhow::Result<PostMeta> {
    let mut meta = PostMeta {
        id: id.to_string(),
        title: id.to_string(),
        date: String::new(),
        tags: vec![],
    };

    let Some(caps) = header_pattern.captures(content) else {
        return Ok(meta);
    };
    for line in caps[1].lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            bail!("Invalid header: {}", line);
        };
        let value = value.trim();
        match name.trim() {
            "title" => meta.title = value.to_string(),
            "date" => meta.date = value.to_string(),
            "tags" | "tag" => {
                meta.tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            other => debug!("ignoring header key {other:?} in {id}"),
        }
    }

    Ok(meta)
}

/// Reads the header of every post in `posts_dir`.
///
/// Returns `None` when there is nothing to show: the directory is missing or
/// holds no posts. I/O and header errors propagate.
pub(crate) fn get_posts_meta(posts_dir: &Path) -> anyhow::Result<Option<Vec<PostMeta>>> {
    if !posts_dir.is_dir() {
        info!("Posts directory({posts_dir:?}) does not exist.");
        return Ok(None);
    }

    let header_pattern = header_pattern()?;
    let mut paths = vec![];
    for entry in std::fs::read_dir(posts_dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.metadata()?.is_file()
            && path.extension().map_or(false, |ext| ext == POST_EXTENSION)
        {
            paths.push(path);
        } else {
            debug!("skipping {path:?}");
        }
    }
    paths.sort();

    let mut posts = Vec::with_capacity(paths.len());
    for path in paths {
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("while reading {path:?}"))?;
        let post = parse_post(&id, &content, &header_pattern)
            .with_context(|| format!("while preprocessing {path:?}"))?;
        posts.push(post);
    }

    debug!("found {} posts in {posts_dir:?}", posts.len());
    Ok(if posts.is_empty() { None } else { Some(posts) })
}

/// Newest first. Undated posts go last, ordered by title.
pub(crate) fn sort_newest_first<T: Borrow<PostMeta>>(a: &T, b: &T) -> Ordering {
    let (a, b) = (a.borrow(), b.borrow());
    match (parse_date(&a.date), parse_date(&b.date)) {
        (Some(a_date), Some(b_date)) => b_date.cmp(&a_date).then_with(|| a.title.cmp(&b.title)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.title.cmp(&b.title),
    }
}
