use std::collections::HashMap;

use crate::error::TasklistError;

/// External key-value store holding serialized blobs.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, TasklistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), TasklistError>;
    fn remove(&mut self, key: &str) -> Result<(), TasklistError>;

    /// Make every write so far durable. Stores that write through need not
    /// override this.
    fn flush(&mut self) -> Result<(), TasklistError> {
        Ok(())
    }
}

/// Process-local store. Nothing outlives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, TasklistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TasklistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), TasklistError> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<S: BlobStore + ?Sized> BlobStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, TasklistError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TasklistError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), TasklistError> {
        (**self).remove(key)
    }

    fn flush(&mut self) -> Result<(), TasklistError> {
        (**self).flush()
    }
}
