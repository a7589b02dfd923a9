use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    InvalidDocument(String),
    NotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidDocument(msg) => write!(f, "Invalid document: {msg}"),
            StoreError::NotFound(id) => write!(f, "Document not found: {id}"),
        }
    }
}

impl std::error::Error for StoreError {}
