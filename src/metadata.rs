use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostMeta {
    pub id: String,
    pub title: String,
    /// Raw date string from the header; formatted only when displayed.
    pub date: String,
    pub tags: Vec<String>,
}

impl PostMeta {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
