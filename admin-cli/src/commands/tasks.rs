use super::{Context, ListArgs};
use crate::output;
use admin_client::TaskStatus;
use admin_console::{ConsoleError, Tab, TaskBoard};
use anyhow::Result;
use clap::Subcommand;
use std::collections::BTreeSet;

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// List tasks in one status tab
    List {
        /// ongoing, completed or deleted
        #[arg(long, default_value_t = TaskStatus::Ongoing)]
        status: TaskStatus,

        #[command(flatten)]
        args: ListArgs,
    },

    Add {
        title: String,

        /// Local description, not stored by the backend
        #[arg(long, default_value = "")]
        body: String,
    },

    Complete { id: i64 },

    /// Move a task to the deleted tab
    Delete { id: i64 },

    /// Move several tasks at once; nothing changes unless every update succeeds
    Bulk {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<i64>,

        #[arg(long)]
        to: TaskStatus,
    },
}

pub async fn run(ctx: &Context, command: &TaskCommand) -> Result<()> {
    ctx.remember_tab(Tab::Tasks);
    let mut board = TaskBoard::new(ctx.client.clone(), ctx.settings.per_page);

    match command {
        TaskCommand::List { status, args } => {
            load(&mut board).await;
            board.set_tab(*status);
            if let Some(term) = &args.search {
                board.list_mut().set_search(term.clone());
            }
            board.list_mut().go_to_page(args.page);
            print_board(&board);
        }

        TaskCommand::Add { title, body } => match board.create(title, body).await {
            Ok(id) => {
                output::print_status(board.list().status());
                println!("   ID: {}", id);
            }
            Err(_) => fail(&board),
        },

        TaskCommand::Complete { id } => {
            load(&mut board).await;
            match board.complete(*id).await {
                Ok(()) => output::print_status(board.list().status()),
                Err(ConsoleError::NotFound(id)) => not_found(id),
                Err(_) => fail(&board),
            }
        }

        TaskCommand::Delete { id } => {
            load(&mut board).await;
            let confirm = ctx.confirmer();
            match board.delete(*id, &confirm).await {
                Ok(true) => output::print_status(board.list().status()),
                Ok(false) => println!("   Cancelled"),
                Err(ConsoleError::NotFound(id)) => not_found(id),
                Err(_) => fail(&board),
            }
        }

        TaskCommand::Bulk { ids, to } => {
            load(&mut board).await;
            let requested: BTreeSet<i64> = ids.iter().copied().collect();
            board.select(requested.iter().copied());
            let skipped = requested.len() - board.selection().len();
            if skipped > 0 {
                println!("⚠️  Ignoring {} unknown id(s)", skipped);
            }
            match board.bulk_transition(*to).await {
                Ok(0) => println!("   Nothing selected"),
                Ok(_) => output::print_status(board.list().status()),
                Err(e) => {
                    output::print_status(board.list().status());
                    println!("   {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}

async fn load(board: &mut TaskBoard) {
    if let Err(e) = board.load().await {
        output::print_status(board.list().status());
        println!("   {}", e);
        std::process::exit(1);
    }
}

fn print_board(board: &TaskBoard) {
    let counts: Vec<String> = TaskStatus::ALL
        .iter()
        .map(|status| {
            let label = format!("{} ({})", status, board.count(*status));
            if *status == board.tab() {
                format!("[{}]", label)
            } else {
                label
            }
        })
        .collect();
    println!("✅ Tasks   {}", counts.join("  "));

    let list = board.list();
    if list.is_empty_result() {
        println!("   No {} tasks", board.tab());
    }
    for task in list.visible() {
        output::task_row(task, board.selection().contains(&task.id));
    }
    output::print_pager(
        &list.summary(),
        list.current_page(),
        list.total_pages(),
        list.pagination().controls_visible(list.filtered_count()),
    );
}

fn not_found(id: i64) -> ! {
    println!("❌ Task #{} not found", id);
    std::process::exit(1);
}

fn fail(board: &TaskBoard) -> ! {
    output::print_status(board.list().status());
    std::process::exit(1);
}
