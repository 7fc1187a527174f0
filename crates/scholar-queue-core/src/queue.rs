use crate::StoreError;
use crate::storage::KeyValueStore;

/// Storage key holding the pending queries as a JSON array of strings.
pub const QUEUE_KEY: &str = "gs_paper_queue";

/// Value snapshot of the queue for presenters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    /// Query being acted on (head of the queue).
    pub current: Option<String>,
    /// Query that comes after `current`.
    pub next: Option<String>,
    /// Number of queries still queued, including `current`.
    pub remaining: usize,
}

impl QueueSnapshot {
    pub fn from_queue(queue: &[String]) -> Self {
        Self {
            current: queue.first().cloned(),
            next: queue.get(1).cloned(),
            remaining: queue.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }
}

/// Lifecycle state of the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueState {
    Empty,
    Active { current: String, rest: Vec<String> },
}

impl QueueState {
    pub fn from_queue(queue: &[String]) -> Self {
        match queue.split_first() {
            None => Self::Empty,
            Some((current, rest)) => Self::Active {
                current: current.clone(),
                rest: rest.to_vec(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Trim every line and drop the blank ones, keeping order.
pub fn clean_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|l| l.as_ref().trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// The persisted list of pending queries.
///
/// Every read goes back to storage, so two handles over the same backend see
/// each other's writes. Nothing returned borrows from the backend.
#[derive(Debug)]
pub struct QueueStore<S> {
    backend: S,
}

impl<S: KeyValueStore> QueueStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Read the persisted queue.
    ///
    /// Absent, unreadable, or malformed data all read as an empty queue.
    pub fn load(&self) -> Vec<String> {
        let raw = match self.backend.get(QUEUE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read queue, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(queue) => queue,
            Err(e) => {
                tracing::warn!(error = %e, "stored queue is malformed, treating as empty");
                Vec::new()
            }
        }
    }

    fn save(&mut self, queue: &[String]) -> Result<(), StoreError> {
        let json = serde_json::to_string(queue)?;
        self.backend.set(QUEUE_KEY, &json)
    }

    /// Overwrite the queue with `lines`, trimmed and with blanks dropped.
    ///
    /// Input that cleans down to nothing leaves the stored queue untouched.
    /// Returns whether the queue was overwritten.
    pub fn replace<I, T>(&mut self, lines: I) -> Result<bool, StoreError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let queue = clean_lines(lines);
        if queue.is_empty() {
            tracing::debug!("replace ignored: no non-blank lines");
            return Ok(false);
        }
        self.save(&queue)?;
        tracing::debug!(len = queue.len(), "queue replaced");
        Ok(true)
    }

    /// Drop the head of the queue and persist the rest.
    ///
    /// Returns the removed query, or `None` when the queue was already empty
    /// (in which case storage is not touched).
    pub fn advance(&mut self) -> Result<Option<String>, StoreError> {
        let mut queue = self.load();
        if queue.is_empty() {
            return Ok(None);
        }
        let done = queue.remove(0);
        self.save(&queue)?;
        tracing::debug!(remaining = queue.len(), "queue advanced");
        Ok(Some(done))
    }

    /// Delete the persisted queue.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.remove(QUEUE_KEY)?;
        tracing::debug!("queue cleared");
        Ok(())
    }

    /// Current query, if any.
    pub fn peek(&self) -> Option<String> {
        self.load().into_iter().next()
    }

    /// Query after the current one, if any.
    pub fn peek_next(&self) -> Option<String> {
        self.load().into_iter().nth(1)
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot::from_queue(&self.load())
    }

    pub fn state(&self) -> QueueState {
        QueueState::from_queue(&self.load())
    }
}
