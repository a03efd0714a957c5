//! Create/edit flows shared by the user and post commands.

use super::{capitalize, Context};
use crate::output;
use admin_console::{FormController, Navigate, RemoteRecord};
use anyhow::Result;
use clap::Args;

/// `path=value`, e.g. `address.city=Gwenborough`.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=VALUE, got {:?}", raw))?;
    let path = path.trim();
    if path.is_empty() {
        return Err(format!("empty field path in {:?}", raw));
    }
    Ok((path.to_string(), value.to_string()))
}

#[derive(Args, Debug, Clone, Default)]
pub struct EditArgs {
    /// Field assignment, repeatable: --set name="Leanne Graham"
    #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_assignment)]
    pub sets: Vec<(String, String)>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: EditArgs,

    /// Start from the built-in sample record
    #[arg(long)]
    pub sample: bool,

    /// Start from the locally saved draft
    #[arg(long)]
    pub from_draft: bool,

    /// Save the form as a local draft instead of submitting it
    #[arg(long)]
    pub save_draft: bool,
}

pub async fn create<R: RemoteRecord>(ctx: &Context, args: &CreateArgs) -> Result<()> {
    println!("📝 New {}", R::ENTITY);
    let mut form = FormController::<R>::create(ctx.client.clone(), ctx.store.clone());

    if args.from_draft && !form.restore_draft()? {
        println!("ℹ️  No saved {} draft", R::ENTITY);
    }
    if args.sample {
        form.load_sample();
    }
    apply_fields(&mut form, &args.fields).await;

    if args.save_draft {
        form.save_draft()?;
        output::print_status(form.status());
        return Ok(());
    }
    submit(form).await
}

pub async fn edit<R: RemoteRecord>(ctx: &Context, id: i64, args: &EditArgs) -> Result<()> {
    println!("✏️ Editing {} #{}", R::ENTITY, id);
    let mut form = match FormController::<R>::edit(ctx.client.clone(), ctx.store.clone(), id).await
    {
        Ok(form) => form,
        Err(e) => {
            if matches!(&e, admin_console::ConsoleError::Client(c) if c.is_not_found()) {
                println!("❌ {} #{} not found", capitalize(R::ENTITY), id);
            } else {
                println!("❌ Failed to load {} data: {}", R::ENTITY, e);
            }
            std::process::exit(1);
        }
    };

    if args.sets.is_empty() {
        println!("   Nothing to change. Use --set PATH=VALUE");
        return Ok(());
    }
    apply_fields(&mut form, args).await;
    submit(form).await
}

/// Types each value into its field and leaves it, which is when the email
/// uniqueness check runs.
async fn apply_fields<R: RemoteRecord>(form: &mut FormController<R>, args: &EditArgs) {
    for (path, value) in &args.sets {
        if let Err(e) = form.set_field(path, value.clone()) {
            println!("❌ {}", e);
            println!("   Known fields: {}", R::FIELDS.join(", "));
            std::process::exit(1);
        }
        form.blur(path).await;
    }
}

async fn submit<R: RemoteRecord>(mut form: FormController<R>) -> Result<()> {
    match form.submit().await {
        Ok(navigate) => {
            output::print_status(form.status());
            match navigate {
                Navigate::List => println!("   Next: admin {}s list", R::ENTITY),
                Navigate::Detail(id) => println!("   Next: admin {}s show {}", R::ENTITY, id),
            }
            Ok(())
        }
        Err(e) => {
            output::print_status(form.status());
            if form.errors().is_empty() {
                println!("   {}", e);
            } else {
                output::print_field_errors(form.errors());
            }
            std::process::exit(1);
        }
    }
}
