use serde::{Deserialize, Serialize};

use crate::StoreError;
use crate::storage::KeyValueStore;

/// Storage key holding the panel position.
pub const POSITION_KEY: &str = "gs_panel_position";

/// Where the panel sits, as CSS-length strings (`"80px"`, `"12ch"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelPosition {
    pub top: String,
    pub left: String,
}

impl PanelPosition {
    /// Position measured in terminal cells.
    pub fn from_cells(row: u16, col: u16) -> Self {
        Self {
            top: format!("{}lh", row),
            left: format!("{}ch", col),
        }
    }

    /// `(row, col)` from the leading integer of each length; the unit is
    /// ignored. `None` if either side has no leading digits.
    pub fn cells(&self) -> Option<(u16, u16)> {
        Some((leading_int(&self.top)?, leading_int(&self.left)?))
    }
}

fn leading_int(s: &str) -> Option<u16> {
    let s = s.trim();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Read the saved position. Absent or malformed data is `None`.
pub fn load_position<S: KeyValueStore>(store: &S) -> Option<PanelPosition> {
    let raw = match store.get(POSITION_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read panel position");
            return None;
        }
    };
    serde_json::from_str(&raw)
        .map_err(|e| tracing::warn!(error = %e, "stored panel position is malformed"))
        .ok()
}

pub fn save_position<S: KeyValueStore>(
    store: &mut S,
    position: &PanelPosition,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(position)?;
    store.set(POSITION_KEY, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::{QUEUE_KEY, QueueStore};
    use crate::storage::MemoryStore;

    #[test]
    fn round_trip_through_store() {
        let mut store = MemoryStore::new();
        assert_eq!(load_position(&store), None);

        let pos = PanelPosition::from_cells(4, 17);
        save_position(&mut store, &pos).unwrap();
        assert_eq!(load_position(&store), Some(pos.clone()));
        assert_eq!(pos.cells(), Some((4, 17)));
    }

    #[test]
    fn stored_layout_is_top_left_object() {
        let mut store = MemoryStore::new();
        save_position(&mut store, &PanelPosition::from_cells(2, 3)).unwrap();
        let raw = store.get(POSITION_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["top"], "2lh");
        assert_eq!(value["left"], "3ch");
    }

    #[test]
    fn css_pixel_lengths_parse() {
        let pos = PanelPosition {
            top: "80px".into(),
            left: " 20px".into(),
        };
        assert_eq!(pos.cells(), Some((80, 20)));

        let auto = PanelPosition {
            top: "auto".into(),
            left: "1px".into(),
        };
        assert_eq!(auto.cells(), None);
    }

    #[test]
    fn malformed_position_is_none() {
        let mut store = MemoryStore::new();
        store.set(POSITION_KEY, "[1, 2]").unwrap();
        assert_eq!(load_position(&store), None);
    }

    #[test]
    fn position_does_not_touch_queue() {
        let mut queue = QueueStore::new(MemoryStore::new());
        queue.replace(["a"]).unwrap();
        save_position(queue.backend_mut(), &PanelPosition::from_cells(1, 1)).unwrap();
        queue.clear().unwrap();

        assert!(!queue.backend().contains_key(QUEUE_KEY));
        assert!(load_position(queue.backend()).is_some());
    }
}
