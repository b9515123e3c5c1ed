use parking_lot::RwLock;
use std::collections::BTreeMap;
use storage::models::Weight;

/// Local cache of the `weights` collection as a plain name to value map
#[derive(Debug, Default)]
pub struct WeightTable {
    values: RwLock<BTreeMap<String, f64>>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.read().get(name).copied()
    }

    /// Weight names in key order
    pub fn names(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.values.read().clone()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Swap in a freshly loaded mapping in one step
    pub(crate) fn replace_all(&self, weights: Vec<Weight>) {
        let fresh: BTreeMap<String, f64> = weights
            .into_iter()
            .map(|weight| (weight.name, weight.value))
            .collect();
        *self.values.write() = fresh;
    }

    pub(crate) fn insert(&self, name: &str, value: f64) {
        self.values.write().insert(name.to_string(), value);
    }

    pub(crate) fn remove(&self, name: &str) -> Option<f64> {
        self.values.write().remove(name)
    }
}
