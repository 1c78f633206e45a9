//! Cosine similarity between document vectors

use crate::error::{Result, ResumeMatcherError, VectorOperand};

/// `dot(a, b) / (|a| * |b|)`.
///
/// Fails when the lengths differ or when either vector has zero magnitude;
/// a zero vector never silently scores 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(ResumeMatcherError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let norm_a = magnitude(a);
    if norm_a == 0.0 {
        return Err(ResumeMatcherError::DegenerateVector(VectorOperand::First));
    }
    let norm_b = magnitude(b);
    if norm_b == 0.0 {
        return Err(ResumeMatcherError::DegenerateVector(VectorOperand::Second));
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    Ok(dot / (norm_a * norm_b))
}

fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identical_vectors() {
        let score = cosine_similarity(&[0.3, -1.2, 4.0], &[0.3, -1.2, 4.0]).unwrap();
        assert_abs_diff_eq!(score, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_orthogonal_and_opposite() {
        assert_abs_diff_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 2.0]).unwrap(), 0.0);
        assert_abs_diff_eq!(
            cosine_similarity(&[1.0, 1.0], &[-1.0, -1.0]).unwrap(),
            -1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_symmetric() {
        let a = [0.2, 0.7, 0.1];
        let b = [0.9, 0.05, 0.4];
        assert_abs_diff_eq!(
            cosine_similarity(&a, &b).unwrap(),
            cosine_similarity(&b, &a).unwrap(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_zero_vector_is_degenerate() {
        let err = cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            ResumeMatcherError::DegenerateVector(VectorOperand::First)
        ));
        let err = cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            ResumeMatcherError::DegenerateVector(VectorOperand::Second)
        ));
    }

    #[test]
    fn test_empty_vectors_are_degenerate() {
        assert!(matches!(
            cosine_similarity(&[], &[]),
            Err(ResumeMatcherError::DegenerateVector(_))
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            ResumeMatcherError::DimensionMismatch { left: 2, right: 3 }
        ));
    }
}
