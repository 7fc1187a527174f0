/// Everything the TUI reacts to, after terminal events are mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Begin,
    Clear,
    Save,
    Next,
    /// Navigate to the current query again.
    Reopen,
    FocusInput,
    LeaveInput,
    InputChar(char),
    InputBackspace,
    InputPaste(String),
    ClickAt(u16, u16),
    DragTo(u16, u16),
    Release(u16, u16),
    ToggleHelp,
    /// Close an open overlay.
    Dismiss,
    Resize(u16, u16),
    Tick,
    None,
}
