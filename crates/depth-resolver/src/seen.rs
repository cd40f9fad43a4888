//! Tree-wide memo of module names already encountered during one resolution run.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Tracks which module names have been seen anywhere in the tree so each
/// module is fully expanded at most once per run.
///
/// The only mutation is [`SeenSet::check_and_mark`], a single locked
/// read-modify-write, so two sibling branches can never both observe a name
/// as unseen.
#[derive(Debug, Default)]
pub struct SeenSet {
    seen: Mutex<HashSet<String>>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as seen. Returns `true` if it had already been marked.
    pub fn check_and_mark(&self, name: &str) -> bool {
        // Every critical section is a single insert, so a poisoned set is still consistent.
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        !seen.insert(name.to_string())
    }

    /// Number of distinct names marked so far.
    pub(crate) fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn first_mark_wins() {
        let set = SeenSet::new();
        assert!(!set.check_and_mark("strings"));
        assert!(set.check_and_mark("strings"));
        assert!(!set.check_and_mark("io"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn concurrent_marks_have_a_single_winner() {
        let set = Arc::new(SeenSet::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let set = Arc::clone(&set);
                std::thread::spawn(move || set.check_and_mark("net/http"))
            })
            .collect();
        let firsts = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|already| !already)
            .count();
        assert_eq!(firsts, 1);
    }
}
