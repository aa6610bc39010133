use std::collections::BTreeSet;

use maud::{html, Markup};
use serde::Serialize;

use crate::{list_item, metadata::PostMeta};

/// Seconds a generated tag page may be served before it is rebuilt.
pub(crate) const REVALIDATE_SECS: i64 = 86400;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagParams {
    pub tag: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageMetadata {
    pub title: String,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TagPage<'a> {
    NoPosts,
    NoMatches,
    Results { tag: &'a str, posts: Vec<&'a PostMeta> },
}

/// One parameter per distinct tag over all posts.
pub(crate) fn generate_static_params(posts: Option<&[PostMeta]>) -> Vec<TagParams> {
    let Some(posts) = posts else {
        return vec![];
    };
    let tags: BTreeSet<&str> = posts
        .iter()
        .flat_map(|post| post.tags.iter().map(String::as_str))
        .collect();
    tags.into_iter()
        .map(|tag| TagParams {
            tag: tag.to_string(),
        })
        .collect()
}

pub(crate) fn generate_metadata(tag: &str) -> PageMetadata {
    PageMetadata {
        title: format!("Posts about {tag}"),
    }
}

pub(crate) fn select<'a>(tag: &'a str, posts: Option<&'a [PostMeta]>) -> TagPage<'a> {
    let posts = match posts {
        Some(posts) if !posts.is_empty() => posts,
        _ => return TagPage::NoPosts,
    };
    let matching: Vec<&PostMeta> = posts.iter().filter(|post| post.has_tag(tag)).collect();
    if matching.is_empty() {
        TagPage::NoMatches
    } else {
        TagPage::Results {
            tag,
            posts: matching,
        }
    }
}

pub(crate) fn no_posts() -> Markup {
    html! {
        p.no-posts { "Sorry, no posts available." }
    }
}

impl TagPage<'_> {
    pub fn to_markup(&self) -> Markup {
        match self {
            TagPage::NoPosts => no_posts(),
            TagPage::NoMatches => html! {
                div.no-matches {
                    p { "Sorry, no posts for that keyword." }
                    a href="/" { "Back to Home" }
                }
            },
            TagPage::Results { tag, posts } => html! {
                h2 { "Results for: #" (tag) }
                section.post-list {
                    ul {
                        @for post in posts {
                            (list_item::render(post))
                        }
                    }
                }
            },
        }
    }
}

/// Body of the page for `tag`.
pub(crate) fn render(tag: &str, posts: Option<&[PostMeta]>) -> Markup {
    select(tag, posts).to_markup()
}
