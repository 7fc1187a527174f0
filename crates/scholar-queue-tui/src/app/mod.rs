mod host;

use std::time::Instant;

use ratatui::layout::{Position, Rect};
use scholar_queue_core::queue::clean_lines;
use scholar_queue_core::{
    FileStore, KeyValueStore, MachineConfig, Navigator, PanelPosition, QueueStore, Session,
    Trigger, load_position, save_position,
};

pub use host::TuiHost;

use crate::action::Action;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Keystrokes go to the query box.
    TextInput,
}

/// The four panel buttons, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Begin,
    Clear,
    Save,
    Next,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Begin, Button::Clear, Button::Save, Button::Next];

    pub fn label(self) -> &'static str {
        match self {
            Button::Begin => "Begin (B)",
            Button::Clear => "Clear (C)",
            Button::Save => "Save (S)",
            Button::Next => "Next (N)",
        }
    }

    fn action(self) -> Action {
        match self {
            Button::Begin => Action::Begin,
            Button::Clear => Action::Clear,
            Button::Save => Action::Save,
            Button::Next => Action::Next,
        }
    }
}

/// Screen areas from the last frame, used for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub struct PanelLayout {
    pub panel: Rect,
    pub input: Rect,
    pub buttons: Vec<(Button, Rect)>,
}

impl PanelLayout {
    fn button_at(&self, pos: Position) -> Option<Button> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(button, _)| *button)
    }

    /// The panel's top border doubles as its drag handle.
    fn on_header(&self, pos: Position) -> bool {
        pos.y == self.panel.y && pos.x >= self.panel.x && pos.x < self.panel.right()
    }
}

pub struct App<S: KeyValueStore = FileStore> {
    pub session: Session<S>,
    pub host: TuiHost,
    pub theme: Theme,
    pub input: String,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub should_quit: bool,
    /// Requested top-left of the panel as `(row, col)`; `None` docks it top-right.
    pub panel_pos: Option<(u16, u16)>,
    /// Grab offset inside the panel while its header is being dragged.
    pub drag: Option<(u16, u16)>,
    pub layout: PanelLayout,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: QueueStore<S>, config: MachineConfig, host: TuiHost, theme: Theme) -> Self {
        let panel_pos = load_position(store.backend()).and_then(|p| p.cells());
        Self {
            session: Session::new(store, config),
            host,
            theme,
            input: String::new(),
            input_mode: InputMode::Normal,
            show_help: false,
            should_quit: false,
            panel_pos,
            drag: None,
            layout: PanelLayout::default(),
        }
    }

    /// Treat startup like a page load: show the queue and arm the Save highlight.
    pub fn start(&mut self) {
        self.fire(Trigger::PageLoaded);
    }

    /// Process an action. Returns true when the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Begin => {
                self.input_mode = InputMode::Normal;
                if self.input.trim().is_empty() {
                    self.host.activity.log_warn(
                        "Nothing to queue: type or paste one title or DOI per line".to_string(),
                    );
                } else {
                    let count = clean_lines(self.input.lines()).len();
                    self.host.activity.log(format!("Queued {} queries", count));
                    self.fire(Trigger::Begin(self.input.clone()));
                }
            }
            Action::Clear => {
                self.fire(Trigger::Clear);
                self.host.activity.log("Queue cleared".to_string());
            }
            Action::Save => {
                if self.session.snapshot().is_empty() {
                    self.host.activity.log_warn("No active paper to save".to_string());
                } else {
                    self.fire(Trigger::Save);
                }
            }
            Action::Next => {
                if self.session.snapshot().is_empty() {
                    self.host.activity.log_warn("Queue is empty".to_string());
                } else {
                    self.fire(Trigger::Next);
                    if self.session.snapshot().is_empty() {
                        self.host.activity.log_success("Queue finished".to_string());
                    }
                }
            }
            Action::Reopen => self.reopen(),
            Action::FocusInput => self.input_mode = InputMode::TextInput,
            Action::LeaveInput => self.input_mode = InputMode::Normal,
            Action::InputChar(c) => self.input.push(c),
            Action::InputBackspace => {
                self.input.pop();
            }
            Action::InputPaste(text) => {
                self.input_mode = InputMode::TextInput;
                self.input.push_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
            }
            Action::ClickAt(col, row) => self.click(Position::new(col, row)),
            Action::DragTo(col, row) => {
                if let Some((dx, dy)) = self.drag {
                    self.panel_pos = Some((row.saturating_sub(dy), col.saturating_sub(dx)));
                }
            }
            Action::Release(..) => {
                if self.drag.take().is_some() {
                    self.persist_position();
                }
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Dismiss => self.show_help = false,
            Action::Tick => {
                self.session.poll_timers(Instant::now(), &mut self.host);
            }
            Action::Resize(..) | Action::None => {}
        }
        self.should_quit
    }

    fn fire(&mut self, trigger: Trigger) {
        let label = trigger.label();
        if let Err(e) = self.session.dispatch(trigger, &mut self.host) {
            self.host.activity.log_warn(format!("{} failed: {}", label, e));
        }
    }

    fn reopen(&mut self) {
        let Some(current) = self.session.store().peek() else {
            self.host.activity.log_warn("Queue is empty".to_string());
            return;
        };
        let url = self.session.config().engine.search_url(&current);
        match self.host.navigate(&url) {
            Ok(()) => self.fire(Trigger::PageLoaded),
            Err(e) => self.host.activity.log_warn(e.to_string()),
        }
    }

    fn click(&mut self, pos: Position) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.layout.on_header(pos) {
            self.drag = Some((pos.x - self.layout.panel.x, pos.y - self.layout.panel.y));
            return;
        }
        if self.layout.input.contains(pos) {
            self.input_mode = InputMode::TextInput;
            return;
        }
        self.input_mode = InputMode::Normal;
        if let Some(button) = self.layout.button_at(pos) {
            self.update(button.action());
        }
    }

    fn persist_position(&mut self) {
        let Some((row, col)) = self.panel_pos else {
            return;
        };
        let position = PanelPosition::from_cells(row, col);
        if let Err(e) = save_position(self.session.store_mut().backend_mut(), &position) {
            self.host
                .activity
                .log_warn(format!("Could not save panel position: {}", e));
        }
    }
}
