use std::path::PathBuf;

#[derive(Debug)]
pub(crate) struct Context {
    pub posts_dir: PathBuf,
    pub out_dir: PathBuf,
    pub public_dir: PathBuf,

    pub blog_name: String,

    pub handlebars: handlebars::Handlebars<'static>,
}
