//! Embedded registry of structure datasets and name resolution against it.
//!
//! The registry is compiled into the binary from `registry/datasets.toml` and parsed once on
//! first use. Callers hold [`DatasetView`] handles that borrow from the static store.

mod loader;
mod schema;
mod store;

pub use schema::LayoutKind;

/// Minimum normalized similarity for a fuzzy match to be accepted.
const MIN_SIMILARITY: f64 = 0.5;

/// Read-only handle to one registry entry.
#[derive(Debug, Clone, Copy)]
pub struct DatasetView {
    inner: &'static store::InternalDataset,
}

impl DatasetView {
    /// Canonical dataset name, as spelled in the registry.
    pub fn name(&self) -> &'static str {
        &self.inner.schema.name
    }

    pub fn layout(&self) -> LayoutKind {
        self.inner.schema.layout
    }

    /// Whether the dataset sits in `<root>/<name>` rather than at the root itself.
    pub fn in_subdirectory(&self) -> bool {
        self.inner.schema.subdirectory
    }

    pub fn description(&self) -> &'static str {
        &self.inner.schema.description
    }
}

/// Iterates every registered dataset in registry order.
pub fn datasets() -> impl Iterator<Item = DatasetView> {
    store::get_store()
        .datasets
        .iter()
        .map(|inner| DatasetView { inner })
}

/// Case-insensitive exact lookup.
pub fn get_dataset(name: &str) -> Option<DatasetView> {
    let store = store::get_store();
    store
        .by_key
        .get(&name.to_lowercase())
        .map(|&i| DatasetView {
            inner: &store.datasets[i],
        })
}

/// Resolves a loosely spelled dataset name.
///
/// The query is lowercased and stripped of a `tdc.` prefix. An exact match wins; otherwise
/// the most similar registered name is returned if its similarity reaches the threshold.
///
/// # Returns
///
/// `None` when no registered name is close enough.
pub fn resolve(query: &str) -> Option<DatasetView> {
    let normalized = query.trim().to_lowercase();
    let normalized = normalized.strip_prefix("tdc.").unwrap_or(&normalized);

    if let Some(view) = get_dataset(normalized) {
        return Some(view);
    }

    datasets()
        .map(|view| (similarity(normalized, &view.inner.key), view))
        .filter(|(score, _)| *score >= MIN_SIMILARITY)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, view)| view)
}

/// `1 - levenshtein(a, b) / max(len)`, in `[0, 1]`.
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    1.0 - previous[b.len()] as f64 / longest as f64
}
