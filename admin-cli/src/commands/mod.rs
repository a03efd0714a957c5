pub mod comments;
pub mod forms;
pub mod posts;
pub mod tasks;
pub mod users;

use crate::config::Settings;
use crate::output;
use admin_client::AdminClient;
use admin_console::{ConsoleError, KeyValueStore, ListResource, ListView, Preferences, Tab};
use anyhow::Result;
use clap::Args;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Shared per-invocation state.
pub struct Context {
    pub settings: Settings,
    pub client: AdminClient,
    pub store: Arc<dyn KeyValueStore>,
}

impl Context {
    pub fn new(settings: Settings) -> Result<Self> {
        let client = settings.client()?;
        let store = settings.store()?;
        Ok(Self {
            settings,
            client,
            store,
        })
    }

    /// Yes/no prompt on the terminal, or always yes with `--yes`.
    pub fn confirmer(&self) -> impl Fn(&str) -> bool {
        let assume_yes = self.settings.assume_yes;
        move |prompt: &str| assume_yes || ask(prompt)
    }

    pub fn remember_tab(&self, tab: Tab) {
        if let Err(e) = Preferences::new(self.store.clone()).set_active_tab(tab) {
            tracing::warn!("Failed to remember active tab: {}", e);
        }
    }

    pub fn active_tab(&self) -> Tab {
        Preferences::new(self.store.clone()).active_tab()
    }
}

fn ask(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive text filter
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

/// Loads a collection and prints one page of it.
pub async fn show_list<T: ListResource>(ctx: &Context, args: &ListArgs, row: fn(&T)) -> Result<()> {
    let mut list = ListView::<T>::new(ctx.client.clone(), ctx.settings.per_page);
    load_or_exit(&mut list).await;

    if let Some(term) = &args.search {
        list.set_search(term.clone());
    }
    list.go_to_page(args.page);

    println!("📋 {}", capitalize(T::NOUN));
    if list.is_empty_result() {
        println!("   No {} found", T::NOUN);
    }
    for item in list.visible() {
        row(item);
    }
    output::print_pager(
        &list.summary(),
        list.current_page(),
        list.total_pages(),
        list.pagination().controls_visible(list.filtered_count()),
    );
    Ok(())
}

/// Per-row delete through the list view, so the same confirm prompt and
/// failure handling apply as on screen.
pub async fn delete_row<T: ListResource>(ctx: &Context, id: i64) -> Result<()> {
    let mut list = ListView::<T>::new(ctx.client.clone(), ctx.settings.per_page);
    load_or_exit(&mut list).await;

    let confirm = ctx.confirmer();
    match list.delete(id, &confirm).await {
        Ok(true) => output::print_status(list.status()),
        Ok(false) => println!("   Cancelled"),
        Err(ConsoleError::NotFound(id)) => {
            println!("❌ No {} with id #{}", T::NOUN, id);
            std::process::exit(1);
        }
        Err(_) => {
            output::print_status(list.status());
            std::process::exit(1);
        }
    }
    Ok(())
}

async fn load_or_exit<T: ListResource>(list: &mut ListView<T>) {
    if let Err(e) = list.load().await {
        output::print_status(list.status());
        println!("   {}", e);
        std::process::exit(1);
    }
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
