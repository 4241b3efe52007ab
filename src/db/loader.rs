use super::schema::RegistryFile;
use super::store::{DataStore, InternalDataset};
use std::collections::HashMap;

const REGISTRY: &str = include_str!("../../registry/datasets.toml");

pub fn load_registry() -> DataStore {
    parse_registry(REGISTRY).unwrap_or_else(|e| panic!("Failed to load dataset registry: {e}"))
}

fn parse_registry(content: &str) -> Result<DataStore, String> {
    let file: RegistryFile = toml::from_str(content).map_err(|e| e.to_string())?;

    let mut datasets = Vec::with_capacity(file.datasets.len());
    let mut by_key = HashMap::new();

    for schema in file.datasets {
        let key = schema.name.to_lowercase();
        if by_key.insert(key.clone(), datasets.len()).is_some() {
            return Err(format!("Duplicate dataset name found: {}", schema.name));
        }
        datasets.push(InternalDataset { key, schema });
    }

    Ok(DataStore { datasets, by_key })
}
