use serde::{Deserialize, Serialize};

/// A product category. Names are unique display labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A college. Names are unique display labels and are what profiles store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    pub id: String,
    pub name: String,
}

/// Payload for creating a category or college.
#[derive(Debug, Clone)]
pub struct LookupCreate {
    pub name: String,
}
