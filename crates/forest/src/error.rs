use thiserror::Error;

/// Recoverable tree errors.
///
/// A search miss is not an error (`search` returns `None`) and deleting an
/// absent key is a no-op. Broken structural invariants are bugs and panic
/// instead of surfacing here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError<K> {
    #[error("{0:?} already exists.")]
    DuplicateKey(K),
    #[error("{0:?} does not exist.")]
    KeyNotFound(K),
    #[error("The tree is empty.")]
    EmptyTree,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_key() {
        assert_eq!(TreeError::DuplicateKey(23).to_string(), "23 already exists.");
        assert_eq!(
            TreeError::KeyNotFound("x".to_string()).to_string(),
            "\"x\" does not exist."
        );
        assert_eq!(TreeError::<i32>::EmptyTree.to_string(), "The tree is empty.");
    }
}
