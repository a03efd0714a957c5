use super::posts::load_detail;
use super::Context;
use crate::output;
use admin_client::CommentPatch;
use admin_console::{CommentInput, ConsoleError, PostDetail, Tab};
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CommentCommand {
    /// List the comments of a post, newest first
    List { post_id: i64 },

    Add {
        post_id: i64,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long)]
        body: String,
    },

    /// Change some fields of a comment; the rest are kept
    Edit {
        id: i64,

        /// Post the comment belongs to
        #[arg(long = "post")]
        post_id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        body: Option<String>,
    },

    Delete {
        id: i64,

        #[arg(long = "post")]
        post_id: i64,
    },
}

pub async fn run(ctx: &Context, command: &CommentCommand) -> Result<()> {
    ctx.remember_tab(Tab::Posts);

    match command {
        CommentCommand::List { post_id } => {
            let detail = load_detail(ctx, *post_id).await;
            println!("💬 Comments on post #{}", post_id);
            if detail.comments().is_empty() {
                println!("   No comments yet");
            }
            for comment in detail.comments() {
                output::comment_row(comment);
            }
        }

        CommentCommand::Add {
            post_id,
            name,
            email,
            body,
        } => {
            let mut detail = load_detail(ctx, *post_id).await;
            let input = CommentInput {
                name: name.clone(),
                email: email.clone(),
                body: body.clone(),
            };
            match detail.add_comment(input).await {
                Ok(id) => {
                    output::print_status(detail.status());
                    println!("   ID: {}", id);
                }
                Err(e) => fail(&detail, e),
            }
        }

        CommentCommand::Edit {
            id,
            post_id,
            name,
            email,
            body,
        } => {
            let mut detail = load_detail(ctx, *post_id).await;
            let patch = CommentPatch {
                name: name.clone(),
                email: email.clone(),
                body: body.clone(),
            };
            if patch == CommentPatch::default() {
                println!("   Nothing to change. Use --name, --email or --body");
                return Ok(());
            }
            match detail.edit_comment(*id, patch).await {
                Ok(()) => output::print_status(detail.status()),
                Err(e) => fail(&detail, e),
            }
        }

        CommentCommand::Delete { id, post_id } => {
            let mut detail = load_detail(ctx, *post_id).await;
            let confirm = ctx.confirmer();
            match detail.delete_comment(*id, &confirm).await {
                Ok(true) => output::print_status(detail.status()),
                Ok(false) => println!("   Cancelled"),
                Err(e) => fail(&detail, e),
            }
        }
    }
    Ok(())
}

fn fail(detail: &PostDetail, error: ConsoleError) -> ! {
    match &error {
        ConsoleError::NotFound(id) => {
            println!("❌ No comment #{} on post #{}", id, detail.post_id())
        }
        ConsoleError::Validation(errors) => output::print_field_errors(errors),
        _ => {
            output::print_status(detail.status());
            println!("   {}", error);
        }
    }
    std::process::exit(1);
}
