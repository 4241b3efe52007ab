use super::loader;
use super::schema::DatasetEntry;
use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct InternalDataset {
    /// Lowercased name used for lookups.
    pub key: String,
    pub schema: DatasetEntry,
}

#[derive(Debug)]
pub struct DataStore {
    pub datasets: Vec<InternalDataset>,
    pub by_key: HashMap<String, usize>,
}

static STORE: OnceLock<DataStore> = OnceLock::new();

pub fn get_store() -> &'static DataStore {
    STORE.get_or_init(loader::load_registry)
}
