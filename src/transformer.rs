use crate::error::TransformError;

/// Rewrites a generated tree into one that satisfies a dialect's structural
/// rules. The input is left untouched; everything placed in the returned
/// tree is a clone.
pub trait Transformer<N> {
    /// # Errors
    /// Returns a `TransformError` when the tree cannot be brought into shape.
    fn transform(&self, tree: &N) -> Result<N, TransformError>;
}

/// Transformer for dialects with no structural rules to enforce.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTransformer;

impl<N: Clone> Transformer<N> for IdentityTransformer {
    fn transform(&self, tree: &N) -> Result<N, TransformError> {
        Ok(tree.clone())
    }
}
