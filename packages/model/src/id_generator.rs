use crate::block::{BlockId, ContentBlock};
use crc32fast::Hasher;

/// Derive a stable id seed from a document key (resource or profile id)
pub fn get_document_seed(key: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential block id generator scoped to one document
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(document_key: &str) -> Self {
        Self {
            seed: get_document_seed(document_key),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> BlockId {
        self.count += 1;
        BlockId::new(format!("{}-{}", self.seed, self.count))
    }

    /// Generate the next ID not already used by `existing`.
    ///
    /// Documents loaded from storage carry ids minted by earlier sessions
    /// with the same seed, so the counter alone is not enough.
    pub fn next_unique(&mut self, existing: &[ContentBlock]) -> BlockId {
        loop {
            let id = self.new_id();
            if !existing.iter().any(|b| b.id == id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
