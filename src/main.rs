use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use context::Context;
use generator::{generate, render_tag_page};
use log::info;
use posts::get_posts_meta;
use renderer::generate_renderer;

mod context;
mod date;
mod generator;
mod list_item;
mod manifest;
mod metadata;
mod posts;
mod renderer;
mod tag_page;

fn path_arg(matches: &ArgMatches, id: &str) -> anyhow::Result<PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .with_context(|| format!("{id} is not given"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args([
            Arg::new("posts_dir")
                .long("posts-dir")
                .help("Directory path of posts")
                .value_parser(value_parser!(PathBuf))
                .default_value("posts"),
            Arg::new("out_dir")
                .long("out-dir")
                .help("Directory path of output. Existing contents will be removed.")
                .value_parser(value_parser!(PathBuf))
                .default_value("out"),
            Arg::new("public_dir")
                .long("public-dir")
                .help("Directory path of public. Contents will be copied as it is.")
                .value_parser(value_parser!(PathBuf))
                .default_value("public"),
            Arg::new("template_dir")
                .long("template-dir")
                .help("Directory of template. The built-in layout is used without layout.hbs.")
                .value_parser(value_parser!(PathBuf))
                .default_value("template"),
        ])
        .subcommand_required(true)
        .subcommand(
            Command::new("build")
                .about("Generate the index and every tag page")
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Rebuild even if the last build is less than a day old")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render the page of a single tag to stdout")
                .arg(Arg::new("tag").required(true)),
        )
        .get_matches();

    let posts_dir = path_arg(&matches, "posts_dir")?;
    if posts_dir.exists() && !posts_dir.is_dir() {
        bail!("if posts_dir exists, it must be a directory.");
    }
    let out_dir = path_arg(&matches, "out_dir")?;
    if out_dir.exists() && !out_dir.is_dir() {
        bail!("if out_dir exists, it must be directory.");
    }
    let public_dir = path_arg(&matches, "public_dir")?;
    let template_dir = path_arg(&matches, "template_dir")?;

    let ctx = Context {
        posts_dir,
        out_dir,
        public_dir,
        blog_name: std::env::var("BLOG_NAME").unwrap_or_default(),
        handlebars: generate_renderer(&template_dir)?,
    };

    match matches.subcommand() {
        Some(("build", sub)) => {
            if generate(&ctx, sub.get_flag("force"))? {
                info!("Site generated into {:?}", ctx.out_dir);
            }
        }
        Some(("render", sub)) => {
            let tag: &String = sub.get_one("tag").context("tag is not given")?;
            let posts = get_posts_meta(&ctx.posts_dir)?;
            println!("{}", render_tag_page(&ctx, tag, posts.as_deref())?);
        }
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}
