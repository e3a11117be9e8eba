//! Text normalization, sentence segmentation, and vector math.
//!
//! All offsets and lengths here are counted in Unicode code points, not
//! bytes — chunk boundaries and the embedder both depend on that.

/// Characters that terminate a sentence (Chinese and ASCII).
const SENTENCE_TERMINATORS: [char; 6] = ['。', '！', '？', '.', '!', '?'];

/// Collapse consecutive whitespace (including newlines) into single spaces
/// and strip control characters, keeping all printable Unicode.
pub fn normalize(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .chars()
        .filter(|c| c.is_whitespace() || !c.is_control())
        .collect()
}

/// Split text into sentences at `。！？.!?` boundaries.
///
/// A terminator only closes a sentence when the accumulated text is longer
/// than one code point; the trailing remainder becomes a final sentence.
/// Decimal points are treated as boundaries (`3.14` splits twice) — chunk
/// boundaries of persisted stores depend on this, so it stays.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    for ch in text.chars() {
        current.push(ch);
        current_len += 1;
        if SENTENCE_TERMINATORS.contains(&ch) && current_len > 1 {
            sentences.push(current.trim().to_string());
            current.clear();
            current_len = 0;
        }
    }
    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

/// Cosine similarity of two vectors.
///
/// Returns 0.0 when the lengths differ or either norm is zero (defined,
/// never NaN). Accumulates in f64 for stability.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// In-place L2 normalization. No-op for the zero vector.
pub fn normalize_vector(vector: &mut [f32]) {
    let sum: f64 = vector.iter().map(|&v| f64::from(v) * f64::from(v)).sum();
    if sum > 0.0 {
        let norm = sum.sqrt() as f32;
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

/// Truncate text to at most `max_chars` code points, appending `...` when
/// anything was cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = chars[..max_chars].iter().collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("a  b\n\nc\td"), "a b c d");
        assert_eq!(normalize("  leading and trailing  "), "leading and trailing");
    }

    #[test]
    fn test_normalize_strips_control_chars() {
        assert_eq!(normalize("a\u{0}b\u{7}c"), "abc");
        // CJK passes through untouched
        assert_eq!(normalize("退款  需要"), "退款 需要");
    }

    #[test]
    fn test_split_sentences_mixed() {
        let sentences = split_sentences("退款需要在7天内申请。退款审核需要3个工作日。");
        assert_eq!(
            sentences,
            vec!["退款需要在7天内申请。", "退款审核需要3个工作日。"]
        );
    }

    #[test]
    fn test_split_sentences_trailing_remainder() {
        let sentences = split_sentences("First one. And a tail without terminator");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1], "And a tail without terminator");
    }

    #[test]
    fn test_split_sentences_decimal_point_splits() {
        let sentences = split_sentences("pi is 3.14 exactly!");
        assert_eq!(sentences, vec!["pi is 3.", "14 exactly!"]);
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_cosine_similarity_self_is_one() {
        let v = [0.5f32, 0.25, 0.1];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_disjoint_is_zero() {
        let a = [1.0f32, 0.0, 0.0];
        let b = [0.0f32, 1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_similarity_degenerate_cases() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_normalize_vector_unit_norm() {
        let mut v = [3.0f32, 4.0];
        normalize_vector(&mut v);
        let norm: f64 = v.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
        assert!((norm.sqrt() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_vector_zero_noop() {
        let mut v = [0.0f32, 0.0];
        normalize_vector(&mut v);
        assert_eq!(v, [0.0, 0.0]);
    }

    #[test]
    fn test_truncate_text_code_points() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("退款审核需要三天", 4), "退款审核...");
    }
}
