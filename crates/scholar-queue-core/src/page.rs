use crate::queue::QueueSnapshot;

/// Actions on the "save to library" affordance of the current result page.
///
/// Both actions must be idempotent and must fail silently: the affordance
/// only exists on some pages, and its absence is not an error.
pub trait PageActions {
    fn click_save(&mut self, query: &str);
    fn highlight_save(&mut self, query: &str);
}

/// Renders current/next preview text.
pub trait Presenter {
    fn render(&mut self, snapshot: &QueueSnapshot);
}

/// Page actions that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPage;

impl PageActions for NoopPage {
    fn click_save(&mut self, _query: &str) {}
    fn highlight_save(&mut self, _query: &str) {}
}

impl Presenter for NoopPage {
    fn render(&mut self, _snapshot: &QueueSnapshot) {}
}
