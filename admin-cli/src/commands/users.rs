use super::forms::{self, CreateArgs, EditArgs};
use super::{delete_row, show_list, Context, ListArgs};
use crate::output;
use admin_client::{User, UserDraft};
use admin_console::Tab;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List users with search and pagination
    List(ListArgs),

    /// Show one user (read-only)
    Show { id: i64 },

    /// Create a user; required: name, username, email, phone, address.city
    Create(CreateArgs),

    /// Update fields of an existing user
    Edit {
        id: i64,

        #[command(flatten)]
        args: EditArgs,
    },

    Delete { id: i64 },
}

pub async fn run(ctx: &Context, command: &UserCommand) -> Result<()> {
    ctx.remember_tab(Tab::Users);

    match command {
        UserCommand::List(args) => show_list::<User>(ctx, args, output::user_row).await,
        UserCommand::Show { id } => show(ctx, *id).await,
        UserCommand::Create(args) => forms::create::<UserDraft>(ctx, args).await,
        UserCommand::Edit { id, args } => forms::edit::<UserDraft>(ctx, *id, args).await,
        UserCommand::Delete { id } => delete_row::<User>(ctx, *id).await,
    }
}

async fn show(ctx: &Context, id: i64) -> Result<()> {
    match ctx.client.get_user(id).await {
        Ok(user) => {
            println!("👤 User #{}", id);
            output::user_details(&user);
            println!();
            println!("   Edit: admin users edit {} --set PATH=VALUE", id);
            Ok(())
        }
        Err(e) => {
            if e.is_not_found() {
                println!("❌ User #{} not found", id);
                println!("   Tip: Use 'users list' to see available users");
            } else {
                println!("❌ Failed to load user data: {}", e);
            }
            std::process::exit(1);
        }
    }
}
