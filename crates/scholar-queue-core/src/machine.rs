//! The queue state machine as a pure function.
//!
//! [`step`] maps the current queue and a [`Trigger`] to the queue change and
//! the side effects that should follow. It touches no storage and no I/O;
//! [`crate::session::Session`] applies the result.

use std::time::Duration;

use crate::navigate::SearchEngine;
use crate::normalize::normalize_query;
use crate::queue::clean_lines;

/// Delay between a page load and highlighting its save affordance.
pub const DEFAULT_HIGHLIGHT_DELAY: Duration = Duration::from_millis(800);

/// A discrete user or page event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Start a new queue from newline-separated input.
    Begin(String),
    /// Delete the queue.
    Clear,
    /// Save the current result to the library.
    Save,
    /// Move on to the next query.
    Next,
    /// The page for the current query finished loading.
    PageLoaded,
}

impl Trigger {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Begin(_) => "begin",
            Self::Clear => "clear",
            Self::Save => "save",
            Self::Next => "next",
            Self::PageLoaded => "page-loaded",
        }
    }
}

/// How the persisted queue changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueUpdate {
    Keep,
    Replace(Vec<String>),
    Advance,
    Clear,
}

/// A side effect to run after the queue update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-render the current/next preview.
    Render,
    /// Navigate to the search page for `query`.
    Navigate { query: String, url: String },
    /// Click the save affordance for `query`.
    ClickSave { query: String },
    /// Highlight the save affordance for `query` after `delay`.
    HighlightSave { query: String, delay: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub update: QueueUpdate,
    pub effects: Vec<Effect>,
}

impl Step {
    fn noop() -> Self {
        Self {
            update: QueueUpdate::Keep,
            effects: Vec::new(),
        }
    }
}

/// Tunables for [`step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    pub engine: SearchEngine,
    pub highlight_delay: Duration,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            engine: SearchEngine::default(),
            highlight_delay: DEFAULT_HIGHLIGHT_DELAY,
        }
    }
}

fn navigate_to(query: &str, config: &MachineConfig) -> Effect {
    Effect::Navigate {
        query: query.to_string(),
        url: config.engine.query_url(&normalize_query(query)),
    }
}

/// Compute the transition for `trigger` on `queue`.
pub fn step(queue: &[String], trigger: &Trigger, config: &MachineConfig) -> Step {
    match trigger {
        Trigger::Begin(input) => {
            let lines = clean_lines(input.lines());
            let Some(head) = lines.first() else {
                return Step::noop();
            };
            let effects = vec![Effect::Render, navigate_to(head, config)];
            Step {
                update: QueueUpdate::Replace(lines),
                effects,
            }
        }
        Trigger::Next => {
            if queue.is_empty() {
                return Step::noop();
            }
            let mut effects = vec![Effect::Render];
            if let Some(head) = queue.get(1) {
                effects.push(navigate_to(head, config));
            }
            Step {
                update: QueueUpdate::Advance,
                effects,
            }
        }
        Trigger::Clear => Step {
            update: QueueUpdate::Clear,
            effects: vec![Effect::Render],
        },
        Trigger::Save => match queue.first() {
            Some(current) => Step {
                update: QueueUpdate::Keep,
                effects: vec![Effect::ClickSave {
                    query: current.clone(),
                }],
            },
            None => Step::noop(),
        },
        Trigger::PageLoaded => {
            let mut effects = vec![Effect::Render];
            if let Some(current) = queue.first() {
                effects.push(Effect::HighlightSave {
                    query: current.clone(),
                    delay: config.highlight_delay,
                });
            }
            Step {
                update: QueueUpdate::Keep,
                effects,
            }
        }
    }
}

/// Apply a [`QueueUpdate`] to an in-memory queue.
pub fn apply(queue: &[String], update: &QueueUpdate) -> Vec<String> {
    match update {
        QueueUpdate::Keep => queue.to_vec(),
        QueueUpdate::Replace(lines) => lines.clone(),
        QueueUpdate::Advance => queue.iter().skip(1).cloned().collect(),
        QueueUpdate::Clear => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn cfg() -> MachineConfig {
        MachineConfig::default()
    }

    #[test]
    fn begin_replaces_and_navigates_to_head() {
        let s = step(&[], &Trigger::Begin("10.1/abcd\nSome Title\n".into()), &cfg());
        assert_eq!(s.update, QueueUpdate::Replace(q(&["10.1/abcd", "Some Title"])));
        assert_eq!(
            s.effects,
            vec![
                Effect::Render,
                Effect::Navigate {
                    query: "10.1/abcd".into(),
                    url: "https://scholar.google.com/scholar?q=10.1%2Fabcd".into(),
                },
            ]
        );
    }

    #[test]
    fn begin_normalizes_doi_for_navigation() {
        let s = step(
            &[],
            &Trigger::Begin("https://doi.org/10.1000/xyz123".into()),
            &cfg(),
        );
        assert!(s.effects.contains(&Effect::Navigate {
            query: "https://doi.org/10.1000/xyz123".into(),
            url: "https://scholar.google.com/scholar?q=doi%3A10.1000%2Fxyz123".into(),
        }));
    }

    #[test]
    fn blank_begin_is_noop_even_when_active() {
        let queue = q(&["a", "b"]);
        assert_eq!(step(&queue, &Trigger::Begin("  \n\n\t".into()), &cfg()), Step::noop());
        assert_eq!(step(&[], &Trigger::Begin(String::new()), &cfg()), Step::noop());
    }

    #[test]
    fn begin_while_active_overwrites() {
        let queue = q(&["a", "b"]);
        let s = step(&queue, &Trigger::Begin("c".into()), &cfg());
        assert_eq!(apply(&queue, &s.update), q(&["c"]));
    }

    #[test]
    fn begin_handles_crlf_input() {
        let s = step(&[], &Trigger::Begin("one\r\ntwo\r\n".into()), &cfg());
        assert_eq!(s.update, QueueUpdate::Replace(q(&["one", "two"])));
    }

    #[test]
    fn next_navigates_to_new_head() {
        let queue = q(&["a", "b c"]);
        let s = step(&queue, &Trigger::Next, &cfg());
        assert_eq!(s.update, QueueUpdate::Advance);
        assert_eq!(
            s.effects,
            vec![
                Effect::Render,
                Effect::Navigate {
                    query: "b c".into(),
                    url: "https://scholar.google.com/scholar?q=b%20c".into(),
                },
            ]
        );
        assert_eq!(apply(&queue, &s.update), q(&["b c"]));
    }

    #[test]
    fn next_on_last_item_empties_without_navigation() {
        let queue = q(&["only"]);
        let s = step(&queue, &Trigger::Next, &cfg());
        assert_eq!(s.update, QueueUpdate::Advance);
        assert_eq!(s.effects, vec![Effect::Render]);
        assert!(apply(&queue, &s.update).is_empty());
    }

    #[test]
    fn next_on_empty_is_noop() {
        assert_eq!(step(&[], &Trigger::Next, &cfg()), Step::noop());
    }

    #[test]
    fn clear_never_navigates() {
        for queue in [q(&[]), q(&["a", "b"])] {
            let s = step(&queue, &Trigger::Clear, &cfg());
            assert_eq!(s.update, QueueUpdate::Clear);
            assert_eq!(s.effects, vec![Effect::Render]);
        }
    }

    #[test]
    fn save_targets_current_query() {
        let s = step(&q(&["a", "b"]), &Trigger::Save, &cfg());
        assert_eq!(s.update, QueueUpdate::Keep);
        assert_eq!(s.effects, vec![Effect::ClickSave { query: "a".into() }]);

        assert!(step(&[], &Trigger::Save, &cfg()).effects.is_empty());
    }

    #[test]
    fn page_loaded_schedules_highlight() {
        let config = MachineConfig {
            highlight_delay: Duration::from_millis(250),
            ..MachineConfig::default()
        };
        let s = step(&q(&["a"]), &Trigger::PageLoaded, &config);
        assert_eq!(
            s.effects,
            vec![
                Effect::Render,
                Effect::HighlightSave {
                    query: "a".into(),
                    delay: Duration::from_millis(250),
                },
            ]
        );

        let empty = step(&[], &Trigger::PageLoaded, &config);
        assert_eq!(empty.effects, vec![Effect::Render]);
    }

    #[test]
    fn custom_engine_is_used() {
        let config = MachineConfig {
            engine: SearchEngine::new("https://example.org/s"),
            ..MachineConfig::default()
        };
        let s = step(&[], &Trigger::Begin("x y".into()), &config);
        assert!(s.effects.contains(&Effect::Navigate {
            query: "x y".into(),
            url: "https://example.org/s?q=x%20y".into(),
        }));
    }
}
