//! Terminal rendering of console views.

use admin_client::{Comment, Post, Task, TaskStatus, User};
use admin_console::{relative_time, FieldErrors, StatusBar, StatusKind};
use chrono::Utc;
use colored::Colorize;

/// Avatar text for a user row: the first two characters of the name.
pub fn initials(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

/// Prints the view's latest status message, if it has one.
pub fn print_status(status: &StatusBar) {
    let Some(message) = status.last() else {
        return;
    };
    match message.kind {
        StatusKind::Success => println!("✅ {}", message.text.green()),
        StatusKind::Error => println!("❌ {}", message.text.red()),
        StatusKind::Info => println!("ℹ️  {}", message.text.blue()),
    }
}

pub fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors {
        println!("   {} {}", format!("{}:", field).bold(), message.red());
    }
}

pub fn print_pager(summary: &str, page: usize, total_pages: usize, controls_visible: bool) {
    println!();
    println!("{}", summary.dimmed());
    if controls_visible {
        let prev = if page > 1 { "« prev" } else { "" };
        let next = if page < total_pages { "next »" } else { "" };
        println!("   Page {} of {}   {} {}", page, total_pages, prev, next);
    }
}

pub fn user_row(user: &User) {
    let profile = &user.profile;
    println!(
        "   [{}] {} {} {}",
        user.id,
        initials(&profile.name).bold().on_blue(),
        profile.name.bold(),
        format!("@{}", profile.username).dimmed()
    );
    println!("        {}", profile.email);
    if !profile.website.is_empty() {
        println!("        {}", profile.website);
    }
    println!(
        "        {} • {}",
        profile.company.name, profile.address.city
    );
}

pub fn user_details(user: &User) {
    let p = &user.profile;
    println!("   ID: {}", user.id);
    println!("   Name: {}", p.name);
    println!("   Username: @{}", p.username);
    println!("   Email: {}", p.email);
    println!("   Phone: {}", p.phone);
    println!("   Website: {}", p.website);
    println!(
        "   Address: {}, {}, {} {}",
        p.address.street, p.address.suite, p.address.city, p.address.zipcode
    );
    println!("   Geo: {}, {}", p.address.geo.lat, p.address.geo.lng);
    println!("   Company: {}", p.company.name);
    println!("      \"{}\"", p.company.catch_phrase);
    println!("      {}", p.company.bs);
}

pub fn post_row(post: &Post) {
    let c = &post.content;
    println!("   [{}] {}", post.id, c.title.bold());
    println!(
        "        by {} on {}",
        or_unknown(&c.user_name),
        or_unknown(&c.date)
    );
    println!("        {}", truncate(&c.body, 60));
}

pub fn post_details(post: &Post) {
    let c = &post.content;
    println!("   ID: {}", post.id);
    println!("   Title: {}", c.title.bold());
    println!("   Author: {}", or_unknown(&c.user_name));
    println!("   Published on {}", or_unknown(&c.date));
    if !c.photo.is_empty() {
        println!("   Photo: {}", c.photo);
    }
    println!();
    println!("{}", c.body);
}

pub fn comment_row(comment: &Comment) {
    let age = comment
        .created_at
        .map(|at| relative_time(Utc::now(), at))
        .unwrap_or_default();
    println!(
        "   [{}] {} <{}> {}",
        comment.id,
        comment.name.bold(),
        comment.email,
        age.dimmed()
    );
    println!("        {}", comment.body);
}

pub fn task_row(task: &Task, selected: bool) {
    let marker = if selected { "[x]" } else { "[ ]" };
    let label = match task.status() {
        TaskStatus::Ongoing => task.title.normal(),
        TaskStatus::Completed => task.title.green(),
        TaskStatus::Deleted => task.title.strikethrough(),
    };
    println!("   {} [{}] {}", marker, task.id, label);
    if !task.body.is_empty() {
        println!("        {}", truncate(&task.body, 60));
    }
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        "Unknown"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_two_chars() {
        assert_eq!(initials("Leanne Graham"), "LE");
        assert_eq!(initials("x"), "X");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("привет мир", 6), "привет...");
    }
}
