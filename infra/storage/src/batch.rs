use crate::error::StorageError;
use crate::validate_key;
use fxhash::FxHashMap;

/// A single mutation inside a [`Batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Put { key: String, value: String },
    Remove { key: String },
}

impl Op {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Remove { key } => key,
        }
    }
}

/// An ordered list of mutations applied atomically.
///
/// Later operations on the same key win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    ops: Vec<Op>,
}

impl Batch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn put(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ops.push(Op::Put { key: key.into(), value: value.into() });
        self
    }

    #[must_use]
    pub fn remove(mut self, key: impl Into<String>) -> Self {
        self.ops.push(Op::Remove { key: key.into() });
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub(crate) fn validate(&self) -> Result<(), StorageError> {
        self.ops.iter().try_for_each(|op| validate_key(op.key()))
    }

    /// Applies the batch to `map` in order. Callers validate first.
    pub(crate) fn apply_to(self, map: &mut FxHashMap<String, String>) {
        for op in self.ops {
            match op {
                Op::Put { key, value } => {
                    map.insert(key, value);
                },
                Op::Remove { key } => {
                    map.remove(&key);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_ops_win() {
        let mut map = FxHashMap::default();
        Batch::new().put("a", "1").remove("a").put("b", "2").put("b", "3").apply_to(&mut map);

        assert!(!map.contains_key("a"));
        assert_eq!(map.get("b").map(String::as_str), Some("3"));
    }

    #[test]
    fn invalid_key_fails_validation() {
        assert!(Batch::new().put("ok", "1").put("", "2").validate().is_err());
        assert!(Batch::new().remove("line\nbreak").validate().is_err());
        assert!(Batch::new().put("token", "x").validate().is_ok());
    }
}
