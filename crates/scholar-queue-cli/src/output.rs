use std::io::Write;

use owo_colors::OwoColorize;
use scholar_queue_core::{QueryKind, QueueSnapshot, SavedEntry, classify};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the current/next preview.
pub fn print_snapshot(
    w: &mut dyn Write,
    snapshot: &QueueSnapshot,
    color: ColorMode,
) -> std::io::Result<()> {
    match &snapshot.current {
        Some(current) => {
            if color.enabled() {
                writeln!(w, "{} {}", "Current:".bold(), current)?;
            } else {
                writeln!(w, "Current: {}", current)?;
            }
        }
        None => {
            if color.enabled() {
                writeln!(w, "{}", "No active paper".bold())?;
            } else {
                writeln!(w, "No active paper")?;
            }
        }
    }

    if let Some(next) = &snapshot.next {
        if color.enabled() {
            writeln!(w, "{}", format!("Next: {}", next).dimmed())?;
        } else {
            writeln!(w, "Next: {}", next)?;
        }
    }

    if snapshot.remaining > 2 {
        let more = format!("(+{} more queued)", snapshot.remaining - 2);
        if color.enabled() {
            writeln!(w, "{}", more.dimmed())?;
        } else {
            writeln!(w, "{}", more)?;
        }
    }
    Ok(())
}

/// Print every queued line, current first, tagging DOIs.
pub fn print_queue(w: &mut dyn Write, queue: &[String], color: ColorMode) -> std::io::Result<()> {
    if queue.is_empty() {
        writeln!(w, "Queue is empty.")?;
        return Ok(());
    }

    for (i, line) in queue.iter().enumerate() {
        let marker = if i == 0 { ">" } else { " " };
        let tag = match classify(line) {
            QueryKind::Doi(_) => "doi",
            QueryKind::Title(_) => "title",
        };
        if color.enabled() {
            let tag = format!("[{:<5}]", tag);
            if i == 0 {
                writeln!(w, "{} {:>3}. {} {}", marker.cyan(), i + 1, tag.dimmed(), line.bold())?;
            } else {
                writeln!(w, "{} {:>3}. {} {}", marker, i + 1, tag.dimmed(), line)?;
            }
        } else {
            writeln!(w, "{} {:>3}. [{:<5}] {}", marker, i + 1, tag, line)?;
        }
    }
    Ok(())
}

/// Print the navigation line.
pub fn print_navigation(w: &mut dyn Write, url: &str, opened: bool, color: ColorMode) -> std::io::Result<()> {
    let verb = if opened { "Opening" } else { "Search" };
    if color.enabled() {
        writeln!(w, "{} {}", format!("{}:", verb).cyan(), url.underline())
    } else {
        writeln!(w, "{}: {}", verb, url)
    }
}

/// Print the outcome of a Save.
pub fn print_saved(w: &mut dyn Write, query: &str, newly_saved: bool, color: ColorMode) -> std::io::Result<()> {
    let msg = if newly_saved {
        format!("Saved to library: {}", query)
    } else {
        format!("Already in library: {}", query)
    };
    if color.enabled() {
        if newly_saved {
            writeln!(w, "{}", msg.green())
        } else {
            writeln!(w, "{}", msg.dimmed())
        }
    } else {
        writeln!(w, "{}", msg)
    }
}

/// Point the user at the save action once the result page is up.
pub fn print_save_hint(w: &mut dyn Write, query: &str, color: ColorMode) -> std::io::Result<()> {
    let msg = format!("Run `scholar-queue save` to add \"{}\" to your library.", query);
    if color.enabled() {
        writeln!(w, "{}", msg.yellow())
    } else {
        writeln!(w, "{}", msg)
    }
}

pub fn print_warning(w: &mut dyn Write, msg: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", msg.yellow())
    } else {
        writeln!(w, "{}", msg)
    }
}

/// Print the library ledger, oldest first.
pub fn print_library(w: &mut dyn Write, entries: &[SavedEntry], color: ColorMode) -> std::io::Result<()> {
    if entries.is_empty() {
        writeln!(w, "Library is empty.")?;
        return Ok(());
    }
    for entry in entries {
        if color.enabled() {
            writeln!(w, "{}  {}", entry.saved_at.dimmed(), entry.query)?;
        } else {
            writeln!(w, "{}  {}", entry.saved_at, entry.query)?;
        }
    }
    writeln!(w)?;
    writeln!(w, "{} saved", entries.len())?;
    Ok(())
}
