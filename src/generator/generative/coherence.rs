//! 语义连贯性校验
//!
//! 对按顺序排列的段落计算向量，相邻两段的余弦相似度必须不低于阈值。

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::BlogError;
use crate::llm::capabilities::Embedder;

/// 默认的相邻段落相似度下限
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// 余弦相似度，结果限制在 [-1, 1]；任一向量为零向量时为 0
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, BlogError> {
    if a.len() != b.len() {
        return Err(BlogError::Model(format!(
            "embedding dimensions differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok((dot / (norm_a * norm_b)).clamp(-1.0, 1.0))
}

/// 逐对检查相邻向量，返回全部相似度；遇到第一对低于阈值（或无法比较）的即失败
pub fn check_adjacent(embeddings: &[Vec<f64>], threshold: f64) -> Result<Vec<f64>, BlogError> {
    let mut similarities = Vec::with_capacity(embeddings.len().saturating_sub(1));
    for (index, pair) in embeddings.windows(2).enumerate() {
        let similarity = cosine_similarity(&pair[0], &pair[1])?;
        // NaN 与任何值比较都为 false，只有明确不低于阈值才算通过
        let passes = similarity >= threshold;
        if !passes {
            return Err(BlogError::SemanticCoherence {
                first: index,
                second: index + 1,
                similarity,
                threshold,
            });
        }
        similarities.push(similarity);
    }
    Ok(similarities)
}

/// 向量化各段落并执行连贯性校验
pub async fn ensure_coherent(
    sections: &[&str],
    embedder: &dyn Embedder,
    threshold: f64,
) -> Result<Vec<f64>> {
    let mut embeddings = Vec::with_capacity(sections.len());
    for (index, text) in sections.iter().enumerate() {
        let vector = embedder
            .embed(text)
            .await
            .with_context(|| format!("Failed to embed section {}", index))?;
        embeddings.push(vector);
    }

    let similarities = check_adjacent(&embeddings, threshold)?;
    debug!(?similarities, threshold, "sections passed the coherence check");
    Ok(similarities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < 1e-12);
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_similarity_dimension_mismatch() {
        let err = cosine_similarity(&[1.0, 0.0], &[1.0]).unwrap_err();
        assert!(matches!(err, BlogError::Model(_)));
    }

    #[test]
    fn test_check_adjacent_names_offending_pair() {
        // 第 1、2 段之间的相似度为 0.1
        let embeddings = vec![
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![0.1, (1.0f64 - 0.01).sqrt()],
            vec![0.1, (1.0f64 - 0.01).sqrt()],
        ];
        match check_adjacent(&embeddings, DEFAULT_THRESHOLD).unwrap_err() {
            BlogError::SemanticCoherence {
                first,
                second,
                similarity,
                threshold,
            } => {
                assert_eq!((first, second), (1, 2));
                assert!((similarity - 0.1).abs() < 1e-9);
                assert_eq!(threshold, DEFAULT_THRESHOLD);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_adjacent_passes_and_reports_similarities() {
        let embeddings = vec![vec![1.0, 0.2], vec![0.9, 0.3], vec![0.8, 0.4]];
        let similarities = check_adjacent(&embeddings, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(similarities.len(), 2);
        assert!(similarities.iter().all(|s| *s >= DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_nan_similarity_fails_the_gate() {
        let embeddings = vec![vec![1.0, 0.0], vec![f64::NAN, 0.0], vec![1.0, 0.0]];
        match check_adjacent(&embeddings, DEFAULT_THRESHOLD).unwrap_err() {
            BlogError::SemanticCoherence {
                first,
                second,
                similarity,
                ..
            } => {
                assert_eq!((first, second), (0, 1));
                assert!(similarity.is_nan());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_nan_threshold_rejects_everything() {
        let embeddings = vec![vec![1.0, 0.0], vec![1.0, 0.0]];
        assert!(matches!(
            check_adjacent(&embeddings, f64::NAN),
            Err(BlogError::SemanticCoherence { .. })
        ));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let embeddings = vec![vec![1.0, 0.0], vec![1.0, 0.0]];
        assert!(check_adjacent(&embeddings, 1.0).is_ok());
        assert!(check_adjacent(&[], DEFAULT_THRESHOLD).unwrap().is_empty());
    }
}
