use maud::{html, Markup};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::{date::get_formatted_date, metadata::PostMeta};

/// Bytes that may not appear unescaped in a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub(crate) fn post_href(id: &str) -> String {
    format!("/posts/{}.html", utf8_percent_encode(id, PATH_SEGMENT))
}

pub(crate) fn tag_href(tag: &str) -> String {
    format!("/tags/{}/", utf8_percent_encode(tag, PATH_SEGMENT))
}

/// One entry of a post list, keyed by the post id.
pub(crate) fn render(post: &PostMeta) -> Markup {
    html! {
        li.post-item data-key=(post.id) {
            a.post-title href=(post_href(&post.id)) { (post.title) }
            @if !post.date.is_empty() {
                br;
                small.post-date { (get_formatted_date(&post.date)) }
            }
            @if !post.tags.is_empty() {
                span.post-tags {
                    @for tag in &post.tags {
                        " "
                        a.post-tag href=(tag_href(tag)) { "#" (tag) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> PostMeta {
        PostMeta {
            id: "first-post".to_string(),
            title: "Fish & Chips".to_string(),
            date: "2024-01-05".to_string(),
            tags: vec!["go".to_string(), "rust".to_string()],
        }
    }

    #[test]
    fn renders_link_date_and_tags() {
        let html = render(&post()).into_string();
        assert!(html.starts_with("<li"));
        assert!(html.contains(r#"data-key="first-post""#));
        assert!(html.contains(r#"href="/posts/first-post.html""#));
        assert!(html.contains("Fish &amp; Chips"));
        assert!(html.contains("January 5, 2024"));
        assert!(html.contains(r#"<a class="post-tag" href="/tags/rust/">#rust</a>"#));
    }

    #[test]
    fn tag_and_post_links_are_percent_encoded() {
        let mut p = post();
        p.id = "what? now".to_string();
        p.tags = vec!["c#".to_string(), "日本".to_string()];
        let html = render(&p).into_string();
        assert!(html.contains(r#"href="/posts/what%3F%20now.html""#));
        assert!(html.contains(r#"<a class="post-tag" href="/tags/c%23/">#c#</a>"#));
        assert!(html.contains(r#"href="/tags/%E6%97%A5%E6%9C%AC/""#));
        assert_eq!(tag_href("c++"), "/tags/c++/");
    }

    #[test]
    fn omits_empty_date() {
        let mut p = post();
        p.date.clear();
        p.tags.clear();
        let html = render(&p).into_string();
        assert!(!html.contains("post-date"));
        assert!(!html.contains("post-tags"));
    }
}
