/// Random vector of `dimension` components in [-1, 1), scaled to unit length.
///
/// Stands in for a real embedding when the embeddings service cannot be
/// reached. Similarity between two such vectors carries no meaning.
pub fn random_unit_vector(dimension: usize) -> Vec<f32> {
    let raw: Vec<f64> = (0..dimension)
        .map(|_| rand::random::<f64>() * 2.0 - 1.0)
        .collect();

    // Normalize in f64 so the f32 result stays within rounding of unit length.
    let norm = raw.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        return raw.iter().map(|v| (v / norm) as f32).collect();
    }

    let mut values = vec![0.0; dimension];
    if let Some(first) = values.first_mut() {
        *first = 1.0;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(values: &[f32]) -> f64 {
        values
            .iter()
            .map(|v| f64::from(*v) * f64::from(*v))
            .sum::<f64>()
            .sqrt()
    }

    #[test]
    fn test_unit_norm_and_dimension() {
        for _ in 0..32 {
            let values = random_unit_vector(768);
            assert_eq!(values.len(), 768);
            assert!(values.iter().all(|v| v.is_finite()));
            assert!((norm(&values) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_vectors_differ_between_calls() {
        assert_ne!(random_unit_vector(768), random_unit_vector(768));
    }

    #[test]
    fn test_zero_dimension() {
        assert!(random_unit_vector(0).is_empty());
    }
}
