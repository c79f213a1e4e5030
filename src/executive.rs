//! The agent ("ejecutivo") operating the station.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::AgentDirectory;
use crate::storage::{get_as, set_as, KvStore};
use crate::text::is_blank;

pub const STORAGE_KEY: &str = "ejecutivo";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executive {
    pub cedula: String,
    pub name: String,
}

pub struct ExecutiveStore {
    store: Arc<dyn KvStore>,
}

impl ExecutiveStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Result<Option<Executive>> {
        get_as(self.store.as_ref(), STORAGE_KEY)
    }

    pub fn name(&self) -> Result<String> {
        Ok(self.get()?.map(|e| e.name).unwrap_or_default())
    }

    /// Save the executive for `cedula`, resolving the name from the directory.
    /// A blank cedula deletes the stored executive. Returns the stored name.
    pub fn save(&self, cedula: &str, directory: &AgentDirectory) -> Result<String> {
        let cedula = cedula.trim();
        if cedula.is_empty() {
            self.delete()?;
            return Ok(String::new());
        }

        let name = directory
            .find_name(cedula)
            .filter(|n| !is_blank(Some(n)))
            .map(str::to_string)
            .unwrap_or_else(|| cedula.to_string());

        set_as(
            self.store.as_ref(),
            STORAGE_KEY,
            &Executive {
                cedula: cedula.to_string(),
                name: name.clone(),
            },
        )?;
        tracing::info!("Executive saved: {}", name);
        Ok(name)
    }

    pub fn delete(&self) -> Result<()> {
        self.store.delete(STORAGE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKvStore;

    fn directory() -> AgentDirectory {
        AgentDirectory::from_sheet(&vec![
            vec!["12.345.678-9".to_string(), "Ana Díaz".to_string()],
            vec!["555".to_string(), "".to_string()],
        ])
    }

    #[test]
    fn test_save_resolves_name() {
        let exec = ExecutiveStore::new(Arc::new(MemoryKvStore::new()));
        let name = exec.save(" 123456789 ", &directory()).unwrap();
        assert_eq!(name, "Ana Díaz");
        assert_eq!(
            exec.get().unwrap(),
            Some(Executive {
                cedula: "123456789".into(),
                name: "Ana Díaz".into()
            })
        );
    }

    #[test]
    fn test_save_unknown_uses_cedula() {
        let exec = ExecutiveStore::new(Arc::new(MemoryKvStore::new()));
        assert_eq!(exec.save("555", &directory()).unwrap(), "555");
        assert_eq!(exec.save("777", &directory()).unwrap(), "777");
        assert_eq!(exec.name().unwrap(), "777");
    }

    #[test]
    fn test_blank_cedula_deletes() {
        let exec = ExecutiveStore::new(Arc::new(MemoryKvStore::new()));
        exec.save("777", &AgentDirectory::default()).unwrap();
        assert_eq!(exec.save("   ", &AgentDirectory::default()).unwrap(), "");
        assert_eq!(exec.get().unwrap(), None);
        assert_eq!(exec.name().unwrap(), "");
    }
}
