// UI layer: everything that ends up on the terminal. Renderers take a
// `Write` so handlers can print to stdout while tests capture a buffer.
// Colours come from crossterm and are dropped when `NO_COLOR` is set.

use crate::config::SCOPES;
use crate::model::{Attachment, ListItem, ListNotesResponse, Note, Permission};
use chrono::{DateTime, Local};
use crossterm::style::{style, Stylize};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

const NO_TITLE: &str = "(No title)";
const PREVIEW_CHARS: usize = 50;
const RULE_WIDTH: usize = 40;

/// Run `f` behind a stderr spinner. The spinner is cleared before
/// returning, whether `f` succeeded or not.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = f();
    spinner.finish_and_clear();
    result
}

/// RFC 3339 timestamp in local time, or `Invalid Date`.
pub fn format_timestamp(ts: Option<&str>) -> String {
    ts.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

/// First `PREVIEW_CHARS` characters of a text body.
pub fn preview(text: &str) -> &str {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn render_empty_list(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "No notes found.".yellow())
}

pub fn render_note_list(out: &mut impl Write, page: &ListNotesResponse) -> io::Result<()> {
    writeln!(out, "{}", "\n📝 Your Google Keep Notes\n".bold().cyan())?;

    for (index, note) in page.notes.iter().enumerate() {
        let title = note.title.as_deref().unwrap_or(NO_TITLE);
        writeln!(out, "{}. {}", index + 1, style(title).bold())?;
        writeln!(out, "   {} {}", "🕐".dim(), format_timestamp(note.update_time.as_deref()))?;
        if let Some(text) = note.text().filter(|t| !t.is_empty()) {
            writeln!(out, "   {} {}...", "📄".dim(), preview(text))?;
        }
        writeln!(out, "   {} {}", "🆔".dim(), note.short_id())?;
        writeln!(out)?;
    }

    if let Some(token) = &page.next_page_token {
        let hint = format!(
            "→ More notes available. Use --page-token {} to see more.",
            token
        );
        writeln!(out, "{}", hint.cyan())?;
    }
    Ok(())
}

pub fn render_note(out: &mut impl Write, note: &Note) -> io::Result<()> {
    let title = note.title.as_deref().unwrap_or(NO_TITLE);
    writeln!(out, "{}", format!("\n📝 {}\n", title).bold().cyan())?;

    writeln!(out, "{} {}", "🆔 ID:".dim(), note.name.as_deref().unwrap_or_default())?;
    writeln!(out, "{} {}", "🕐 Created:".dim(), format_timestamp(note.create_time.as_deref()))?;
    writeln!(out, "{} {}", "✏️ Updated:".dim(), format_timestamp(note.update_time.as_deref()))?;

    if note.trashed {
        writeln!(out, "{}", "\n⚠️ This note is in trash and will be deleted.\n".yellow())?;
    }

    if let Some(body) = &note.body {
        writeln!(out, "{}", "\n📄 Content:".bold())?;
        writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;
        if let Some(text) = &body.text {
            writeln!(out, "{}", text.text)?;
        } else if let Some(list) = &body.list {
            render_checklist(out, &list.list_items, 0)?;
        }
        writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;
    }

    if !note.attachments.is_empty() {
        render_attachments(out, &note.attachments)?;
    }
    Ok(())
}

/// One line per item, children indented two spaces per level.
pub fn render_checklist(out: &mut impl Write, items: &[ListItem], depth: usize) -> io::Result<()> {
    for item in items {
        let checkbox = if item.checked { '☑' } else { '☐' };
        writeln!(out, "{}{} {}", "  ".repeat(depth), checkbox, item.label())?;
        render_checklist(out, &item.child_list_items, depth + 1)?;
    }
    Ok(())
}

fn render_attachments(out: &mut impl Write, attachments: &[Attachment]) -> io::Result<()> {
    writeln!(out, "{}", format!("\n📎 Attachments: {}", attachments.len()).bold())?;
    for att in attachments {
        writeln!(out, "   - {} ({})", att.file_name(), att.mime_type.join(", "))?;
    }
    Ok(())
}

pub fn render_created(out: &mut impl Write, note: &Note) -> io::Result<()> {
    writeln!(out, "{}", "\n✅ Note created successfully!".green())?;
    writeln!(out, "{} {}", "🆔".dim(), note.name.as_deref().unwrap_or_default())?;
    writeln!(out, "{} {}", "📝".dim(), note.title.as_deref().unwrap_or(NO_TITLE))
}

pub fn render_delete_warning(out: &mut impl Write, id: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("\n⚠️ About to delete note: {}", id).yellow())?;
    writeln!(out, "{}", "This action cannot be undone.".dim())
}

pub fn render_deleted(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "\n✅ Note deleted successfully!".green())
}

pub fn render_permissions(out: &mut impl Write, permissions: &[Permission]) -> io::Result<()> {
    writeln!(out, "{}", "\n✅ Permissions created successfully!".green())?;
    for p in permissions {
        writeln!(
            out,
            "   {} → {}",
            p.role.as_deref().unwrap_or_default(),
            p.recipient().unwrap_or_default()
        )?;
    }
    Ok(())
}

pub fn render_error(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("\n❌ Error: {}", message).red())
}

pub fn render_usage(out: &mut impl Write) -> io::Result<()> {
    let bin = env!("CARGO_PKG_NAME");
    writeln!(out)?;
    writeln!(out, "{}", "Google Keep CLI".bold().cyan())?;
    writeln!(out)?;
    writeln!(out, "{}", "Usage:".bold())?;
    writeln!(out, "  {} <command> [options]", bin)?;
    writeln!(out)?;
    writeln!(out, "{}", "Commands:".bold())?;
    for (cmd, about) in [
        ("list", "List all notes (--limit, --filter, --page-token)"),
        ("get <id>", "Get a specific note"),
        ("create", "Create a new note (--title, --text, --list-item)"),
        ("delete <id>", "Delete a note (--force)"),
        ("share <id>", "Share a note (--email, --emails, --role)"),
    ] {
        writeln!(out, "  {}{}", format!("{:<15}", cmd).cyan(), about)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "Examples:".bold())?;
    for example in [
        "list",
        "list --limit 10",
        "get ABC123",
        "create --title \"Shopping\" --text \"Buy milk\"",
        "create --title \"Todo\" --list-item \"Task 1\" --list-item \"Task 2\"",
        "delete ABC123",
        "share ABC123 --email \"friend@gmail.com\"",
        "share ABC123 --emails \"a@x.com,b@x.com\" --role WRITER",
    ] {
        writeln!(out, "  {} {}", bin, example)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "Setup:".bold())?;
    writeln!(out, "  Run: gcloud auth application-default login")?;
    writeln!(out, "  Or set GOOGLE_ACCESS_TOKEN (scope: {})", SCOPES.join(" "))
}
