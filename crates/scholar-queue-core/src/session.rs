use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::CoreError;
use crate::machine::{Effect, MachineConfig, QueueUpdate, Trigger, step};
use crate::navigate::Navigator;
use crate::page::{PageActions, Presenter};
use crate::queue::{QueueSnapshot, QueueStore};
use crate::storage::KeyValueStore;

/// Everything a session drives: navigation, the save affordance and the preview.
pub trait Host: Navigator + PageActions + Presenter {}

impl<T: Navigator + PageActions + Presenter> Host for T {}

/// A delayed effect waiting for its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    pub due: Instant,
    pub effect: Effect,
}

/// Applies [`step`] results to a [`QueueStore`] and runs the effects on a [`Host`].
#[derive(Debug)]
pub struct Session<S> {
    store: QueueStore<S>,
    config: MachineConfig,
    timers: Vec<Timer>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: QueueStore<S>, config: MachineConfig) -> Self {
        Self {
            store,
            config,
            timers: Vec::new(),
        }
    }

    pub fn store(&self) -> &QueueStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut QueueStore<S> {
        &mut self.store
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.store.snapshot()
    }

    pub fn pending_timers(&self) -> &[Timer] {
        &self.timers
    }

    /// Earliest timer deadline, if any timer is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Handle one trigger.
    ///
    /// A successful navigation is followed by [`Trigger::PageLoaded`], which
    /// arms the delayed highlight. Returns the queue snapshot after all
    /// immediate effects ran.
    pub fn dispatch<H: Host + ?Sized>(
        &mut self,
        trigger: Trigger,
        host: &mut H,
    ) -> Result<QueueSnapshot, CoreError> {
        let mut pending = VecDeque::from([trigger]);

        while let Some(trigger) = pending.pop_front() {
            let queue = self.store.load();
            let result = step(&queue, &trigger, &self.config);
            tracing::debug!(
                trigger = trigger.label(),
                effects = result.effects.len(),
                "dispatch"
            );

            match result.update {
                QueueUpdate::Keep => {}
                QueueUpdate::Replace(lines) => {
                    self.store.replace(lines)?;
                }
                QueueUpdate::Advance => {
                    self.store.advance()?;
                }
                QueueUpdate::Clear => {
                    self.store.clear()?;
                }
            }

            for effect in result.effects {
                match effect {
                    Effect::Render => host.render(&self.store.snapshot()),
                    Effect::Navigate { query, url } => {
                        tracing::info!(query = %query, url = %url, "navigating");
                        host.navigate(&url)?;
                        pending.push_back(Trigger::PageLoaded);
                    }
                    Effect::ClickSave { query } => host.click_save(&query),
                    Effect::HighlightSave { query, delay } => {
                        // A fresh page load replaces any highlight still pending.
                        self.timers
                            .retain(|t| !matches!(t.effect, Effect::HighlightSave { .. }));
                        self.timers.push(Timer {
                            due: Instant::now() + delay,
                            effect: Effect::HighlightSave { query, delay },
                        });
                    }
                }
            }
        }

        Ok(self.store.snapshot())
    }

    /// Run every timer due at `now`. Returns how many fired.
    pub fn poll_timers<H: Host + ?Sized>(&mut self, now: Instant, host: &mut H) -> usize {
        let (due, waiting): (Vec<Timer>, Vec<Timer>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = waiting;

        let fired = due.len();
        for timer in due {
            self.run_delayed(timer.effect, host);
        }
        fired
    }

    /// Block until every pending timer has fired.
    pub fn settle<H: Host + ?Sized>(&mut self, host: &mut H) {
        while let Some(deadline) = self.next_deadline() {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            self.poll_timers(Instant::now(), host);
        }
    }

    /// Drop pending timers without running them.
    pub fn cancel_timers(&mut self) {
        self.timers.clear();
    }

    fn run_delayed<H: Host + ?Sized>(&mut self, effect: Effect, host: &mut H) {
        match effect {
            Effect::HighlightSave { query, .. } => {
                // The page may have moved on since the timer was armed.
                if self.store.peek().as_deref() == Some(query.as_str()) {
                    host.highlight_save(&query);
                }
            }
            other => tracing::debug!(effect = ?other, "ignoring non-delayed effect in timer"),
        }
    }
}

/// Zero-delay config, handy for tests and non-interactive hosts.
pub fn immediate(config: MachineConfig) -> MachineConfig {
    MachineConfig {
        highlight_delay: Duration::ZERO,
        ..config
    }
}
