use super::forms::{self, CreateArgs, EditArgs};
use super::{delete_row, show_list, Context, ListArgs};
use crate::output;
use admin_client::{Post, PostDraft};
use admin_console::{PostDetail, Tab};
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum PostCommand {
    /// List posts with search and pagination
    List(ListArgs),

    /// Show a post with its comments
    Show {
        id: i64,

        /// Print the post as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Create a post; required: title, body, userName
    Create(CreateArgs),

    /// Update fields of an existing post
    Edit {
        id: i64,

        #[command(flatten)]
        args: EditArgs,
    },

    Delete { id: i64 },
}

pub async fn run(ctx: &Context, command: &PostCommand) -> Result<()> {
    ctx.remember_tab(Tab::Posts);

    match command {
        PostCommand::List(args) => show_list::<Post>(ctx, args, output::post_row).await,
        PostCommand::Show { id, json } => show(ctx, *id, *json).await,
        PostCommand::Create(args) => forms::create::<PostDraft>(ctx, args).await,
        PostCommand::Edit { id, args } => forms::edit::<PostDraft>(ctx, *id, args).await,
        PostCommand::Delete { id } => delete_row::<Post>(ctx, *id).await,
    }
}

pub(super) async fn load_detail(ctx: &Context, id: i64) -> PostDetail {
    let mut detail = PostDetail::new(ctx.client.clone(), ctx.store.clone(), id);
    if let Err(e) = detail.load().await {
        output::print_status(detail.status());
        println!("   {}", e);
        std::process::exit(1);
    }
    detail
}

async fn show(ctx: &Context, id: i64, json: bool) -> Result<()> {
    let detail = load_detail(ctx, id).await;
    let Some(post) = detail.post() else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(post)?);
        return Ok(());
    }

    println!("📰 Post #{}", id);
    output::post_details(post);
    println!();
    println!("💬 Comments ({})", detail.comments().len());
    if detail.comments().is_empty() {
        println!("   No comments yet");
    }
    for comment in detail.comments() {
        output::comment_row(comment);
    }
    Ok(())
}
