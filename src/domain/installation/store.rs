//! PropertyStore - Last Known Property Values

use ahash::AHashMap;

use crate::domain::property::PropertyId;

/// Last received value per property id.
///
/// Entries are only ever inserted or overwritten, never removed.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    values: AHashMap<PropertyId, f64>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, replacing whatever was stored for `id` before
    pub fn set(&mut self, id: PropertyId, value: f64) {
        tracing::trace!("{} = {}", id, value);
        self.values.insert(id, value);
    }

    /// The stored value, or `None` while nothing has arrived for `id`
    pub fn get(&self, id: &PropertyId) -> Option<f64> {
        self.values.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites() {
        let mut store = PropertyStore::new();
        let id = PropertyId::from("xcom.bat.7002");
        assert_eq!(store.get(&id), None);

        store.set(id.clone(), 55.0);
        store.set(id.clone(), 56.5);
        assert_eq!(store.get(&id), Some(56.5));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_ids_are_kept() {
        let mut store = PropertyStore::new();
        store.set("other.dev.1".into(), 1.0);
        assert!(!store.is_empty());
        assert_eq!(store.get(&"other.dev.1".into()), Some(1.0));
    }
}
