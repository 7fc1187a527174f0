use scholar_queue_core::{
    Library, NavigateError, Navigator, PageActions, Presenter, QueueSnapshot,
};

use crate::model::activity::ActivityLog;

/// Collaborators the session drives while the panel is up.
///
/// Navigation opens the system browser, Save writes to the library ledger,
/// and rendering just keeps the latest snapshot for the next frame.
pub struct TuiHost {
    pub snapshot: QueueSnapshot,
    pub activity: ActivityLog,
    pub library: Library,
    pub open_browser: bool,
    /// Query whose Save button is currently highlighted.
    pub highlighted: Option<String>,
    pub last_url: Option<String>,
}

impl TuiHost {
    pub fn new(library: Library, open_browser: bool) -> Self {
        Self {
            snapshot: QueueSnapshot::default(),
            activity: ActivityLog::default(),
            library,
            open_browser,
            highlighted: None,
            last_url: None,
        }
    }

    /// Whether the Save button should be drawn highlighted.
    pub fn save_highlighted(&self) -> bool {
        self.highlighted.is_some() && self.highlighted == self.snapshot.current
    }
}

impl Navigator for TuiHost {
    fn navigate(&mut self, url: &str) -> Result<(), NavigateError> {
        self.highlighted = None;
        self.last_url = Some(url.to_string());
        if self.open_browser {
            open::that(url).map_err(|e| NavigateError::Launch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            self.activity.log(format!("Opened {}", url));
        } else {
            self.activity.log(format!("Search: {}", url));
        }
        Ok(())
    }
}

impl PageActions for TuiHost {
    fn click_save(&mut self, query: &str) {
        match self.library.save(query) {
            Ok(true) => self.activity.log_success(format!("Saved: {}", query)),
            Ok(false) => self.activity.log(format!("Already in library: {}", query)),
            Err(e) => self
                .activity
                .log_warn(format!("Could not write library: {}", e)),
        }
    }

    fn highlight_save(&mut self, query: &str) {
        self.highlighted = Some(query.to_string());
        if !self.library.contains(query) {
            self.activity.log("Results ready: press s to save".to_string());
        }
    }
}

impl Presenter for TuiHost {
    fn render(&mut self, snapshot: &QueueSnapshot) {
        self.snapshot = snapshot.clone();
        if self.highlighted.is_some() && self.highlighted != self.snapshot.current {
            self.highlighted = None;
        }
    }
}
