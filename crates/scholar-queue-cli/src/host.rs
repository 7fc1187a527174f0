use std::io::Write;

use scholar_queue_core::{
    Library, NavigateError, Navigator, PageActions, Presenter, QueueSnapshot,
};

use crate::output::{self, ColorMode};

/// Terminal-side collaborators: the system browser for navigation, the
/// library ledger for Save, and a writer for previews.
pub struct CliHost<W: Write> {
    writer: W,
    color: ColorMode,
    open_browser: bool,
    library: Library,
    last_rendered: Option<QueueSnapshot>,
}

impl<W: Write> CliHost<W> {
    pub fn new(writer: W, color: ColorMode, open_browser: bool, library: Library) -> Self {
        Self {
            writer,
            color,
            open_browser,
            library,
            last_rendered: None,
        }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn color(&self) -> ColorMode {
        self.color
    }

    pub fn library(&self) -> &Library {
        &self.library
    }
}

impl<W: Write> Navigator for CliHost<W> {
    fn navigate(&mut self, url: &str) -> Result<(), NavigateError> {
        let _ = output::print_navigation(&mut self.writer, url, self.open_browser, self.color);
        if self.open_browser {
            open::that(url).map_err(|e| NavigateError::Launch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

impl<W: Write> PageActions for CliHost<W> {
    fn click_save(&mut self, query: &str) {
        match self.library.save(query) {
            Ok(newly_saved) => {
                let _ = output::print_saved(&mut self.writer, query, newly_saved, self.color);
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "failed to save to library");
                let _ = output::print_warning(
                    &mut self.writer,
                    &format!("Could not write library: {}", e),
                    self.color,
                );
            }
        }
    }

    fn highlight_save(&mut self, query: &str) {
        if self.library.contains(query) {
            return;
        }
        let _ = output::print_save_hint(&mut self.writer, query, self.color);
    }
}

impl<W: Write> Presenter for CliHost<W> {
    fn render(&mut self, snapshot: &QueueSnapshot) {
        // A page load re-renders the same preview; print it once.
        if self.last_rendered.as_ref() == Some(snapshot) {
            return;
        }
        let _ = output::print_snapshot(&mut self.writer, snapshot, self.color);
        self.last_rendered = Some(snapshot.clone());
    }
}
