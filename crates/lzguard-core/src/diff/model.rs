//! Structural diff output types.

use crate::value::{ConfigValue, Path};
use serde::Serialize;
use std::fmt;

/// Discriminant of a [`DiffEntry`], used for logging and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiffKind {
    Added,
    Edited,
    Deleted,
    ArrayChanged,
}

impl DiffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffKind::Added => "Added",
            DiffKind::Edited => "Edited",
            DiffKind::Deleted => "Deleted",
            DiffKind::ArrayChanged => "ArrayChanged",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one element of a sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ArrayItemChange {
    Added { rhs: ConfigValue },
    Deleted { lhs: ConfigValue },
    /// Element replaced wholesale. [`compute_diff`](crate::diff::compute_diff)
    /// reports replaced elements as a plain `Edited` at the element path instead.
    Edited { lhs: ConfigValue, rhs: ConfigValue },
}

impl ArrayItemChange {
    pub fn kind(&self) -> DiffKind {
        match self {
            ArrayItemChange::Added { .. } => DiffKind::Added,
            ArrayItemChange::Deleted { .. } => DiffKind::Deleted,
            ArrayItemChange::Edited { .. } => DiffKind::Edited,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, ArrayItemChange::Deleted { .. })
    }
}

/// One structural difference between two configuration trees.
///
/// For `ArrayChanged` the path locates the sequence itself; the element
/// position is carried separately in `index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum DiffEntry {
    Added {
        path: Path,
        rhs: ConfigValue,
    },
    Edited {
        path: Path,
        lhs: ConfigValue,
        rhs: ConfigValue,
    },
    Deleted {
        path: Path,
        lhs: ConfigValue,
    },
    ArrayChanged {
        path: Path,
        index: usize,
        item: ArrayItemChange,
    },
}

impl DiffEntry {
    pub fn kind(&self) -> DiffKind {
        match self {
            DiffEntry::Added { .. } => DiffKind::Added,
            DiffEntry::Edited { .. } => DiffKind::Edited,
            DiffEntry::Deleted { .. } => DiffKind::Deleted,
            DiffEntry::ArrayChanged { .. } => DiffKind::ArrayChanged,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DiffEntry::Added { path, .. }
            | DiffEntry::Edited { path, .. }
            | DiffEntry::Deleted { path, .. }
            | DiffEntry::ArrayChanged { path, .. } => path,
        }
    }

    /// Prior value, present for `Edited` and `Deleted`
    pub fn lhs(&self) -> Option<&ConfigValue> {
        match self {
            DiffEntry::Edited { lhs, .. } | DiffEntry::Deleted { lhs, .. } => Some(lhs),
            _ => None,
        }
    }

    /// New value, present for `Added` and `Edited`
    pub fn rhs(&self) -> Option<&ConfigValue> {
        match self {
            DiffEntry::Added { rhs, .. } | DiffEntry::Edited { rhs, .. } => Some(rhs),
            _ => None,
        }
    }

    /// Inner element change of an `ArrayChanged` entry
    pub fn item(&self) -> Option<(usize, &ArrayItemChange)> {
        match self {
            DiffEntry::ArrayChanged { index, item, .. } => Some((*index, item)),
            _ => None,
        }
    }

    /// The same change seen from the other side: additions become deletions
    /// and edits swap their values.
    pub fn mirrored(&self) -> DiffEntry {
        match self {
            DiffEntry::Added { path, rhs } => DiffEntry::Deleted {
                path: path.clone(),
                lhs: rhs.clone(),
            },
            DiffEntry::Deleted { path, lhs } => DiffEntry::Added {
                path: path.clone(),
                rhs: lhs.clone(),
            },
            DiffEntry::Edited { path, lhs, rhs } => DiffEntry::Edited {
                path: path.clone(),
                lhs: rhs.clone(),
                rhs: lhs.clone(),
            },
            DiffEntry::ArrayChanged { path, index, item } => DiffEntry::ArrayChanged {
                path: path.clone(),
                index: *index,
                item: match item {
                    ArrayItemChange::Added { rhs } => ArrayItemChange::Deleted { lhs: rhs.clone() },
                    ArrayItemChange::Deleted { lhs } => ArrayItemChange::Added { rhs: lhs.clone() },
                    ArrayItemChange::Edited { lhs, rhs } => ArrayItemChange::Edited {
                        lhs: rhs.clone(),
                        rhs: lhs.clone(),
                    },
                },
            },
        }
    }
}
