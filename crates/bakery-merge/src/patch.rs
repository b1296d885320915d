use std::fmt;

use bakery_types::Cake;

/// A single edit produced by the merge engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatchOp {
    /// Set `name` to `cake` (which may be unresolved).
    Update { name: String, cake: Option<Cake> },
    /// Remove `name`.
    Delete { name: String },
}

impl PatchOp {
    pub fn update(name: impl Into<String>, cake: Option<Cake>) -> Self {
        Self::Update {
            name: name.into(),
            cake,
        }
    }

    pub fn delete(name: impl Into<String>) -> Self {
        Self::Delete { name: name.into() }
    }

    /// The entry name this operation touches.
    pub fn name(&self) -> &str {
        match self {
            Self::Update { name, .. } | Self::Delete { name } => name,
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update {
                name,
                cake: Some(cake),
            } => write!(f, "update {name} {cake}"),
            Self::Update { name, cake: None } => write!(f, "update {name} null"),
            Self::Delete { name } => write!(f, "delete {name}"),
        }
    }
}
