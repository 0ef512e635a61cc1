use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Source of the identifiers given to sections and headings.
///
/// Passed explicitly to formatters and transformers. Nothing in the pipeline
/// falls back to a random source on its own.
#[derive(Clone)]
pub struct IdGenerator(Arc<dyn Fn() -> String + Send + Sync>);

impl IdGenerator {
    pub fn new(generate: impl Fn() -> String + Send + Sync + 'static) -> Self {
        IdGenerator(Arc::new(generate))
    }

    /// Always returns `id`.
    pub fn fixed(id: impl Into<String>) -> Self {
        let id = id.into();
        IdGenerator::new(move || id.clone())
    }

    /// Returns `prefix-1`, `prefix-2`, ... Clones share the counter.
    pub fn sequential(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let counter = Arc::new(AtomicU64::new(0));
        IdGenerator::new(move || {
            let n = counter.fetch_add(1, Ordering::Relaxed) + 1;
            format!("{prefix}-{n}")
        })
    }

    /// Random ids, valid as `xml:id` values.
    pub fn random() -> Self {
        IdGenerator::new(|| format!("id{}", Uuid::new_v4().simple()))
    }

    #[must_use]
    pub fn next_id(&self) -> String {
        (self.0)()
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdGenerator")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed() {
        let ids = IdGenerator::fixed("fakeid");
        assert_eq!(ids.next_id(), "fakeid");
        assert_eq!(ids.next_id(), "fakeid");
    }

    #[test]
    fn test_sequential_shares_counter_across_clones() {
        let ids = IdGenerator::sequential("sec");
        let other = ids.clone();
        assert_eq!(ids.next_id(), "sec-1");
        assert_eq!(other.next_id(), "sec-2");
    }

    #[test]
    fn test_random_ids_start_with_letter() {
        let ids = IdGenerator::random();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(a.starts_with("id"));
        assert_ne!(a, b);
    }
}
