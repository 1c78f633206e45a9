//! Document vectors from token embeddings

use crate::error::{Result, ResumeMatcherError};
use crate::processing::document::AnnotatedDocument;
use crate::processing::embeddings::Embeddings;
use log::debug;

/// Mean of the token vectors over every token of the document.
///
/// Stopwords and punctuation are included. Tokens the table does not know
/// contribute a zero vector but still count toward the mean, and an empty
/// document yields the zero vector. A token vector whose length differs from
/// the table dimension fails with `DimensionMismatch`.
pub fn document_vector(
    document: &AnnotatedDocument,
    embeddings: &dyn Embeddings,
) -> Result<Vec<f32>> {
    let mut sum = vec![0.0f32; embeddings.dimension()];
    if document.is_empty() {
        return Ok(sum);
    }

    let mut known = 0usize;
    for token in document {
        if let Some(vector) = embeddings.vector_for(&token.text) {
            if vector.len() != sum.len() {
                return Err(ResumeMatcherError::DimensionMismatch {
                    left: sum.len(),
                    right: vector.len(),
                });
            }
            for (acc, &v) in sum.iter_mut().zip(vector.iter()) {
                *acc += v;
            }
            known += 1;
        }
    }

    let count = document.len() as f32;
    sum.iter_mut().for_each(|x| *x /= count);

    debug!(
        "Vectorized {} tokens ({} known to {})",
        document.len(),
        known,
        embeddings.name()
    );
    Ok(sum)
}
