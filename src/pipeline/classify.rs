//! Classification label normalizer.
//!
//! Vision models return the letter type in many spellings. The table below
//! maps substrings to the closed type set; earlier rows win, so the more
//! specific leave patterns are checked before the generic letter patterns.

use crate::models::enums::DocumentType;

/// Outcome of normalizing a raw classifier label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedLabel {
    Known(DocumentType),
    /// Lower-cased, trimmed input that matched no pattern.
    Unrecognized(String),
}

impl NormalizedLabel {
    pub fn document_type(&self) -> DocumentType {
        match self {
            NormalizedLabel::Known(doc_type) => *doc_type,
            NormalizedLabel::Unrecognized(_) => DocumentType::Unknown,
        }
    }
}

/// Substring patterns in priority order. First match wins.
const LABEL_PATTERNS: &[(&[&str], DocumentType)] = &[
    (
        &["earned leave letter", "earned_leave_letter", "earned leave", "earned_leave"],
        DocumentType::EarnedLeaveLetter,
    ),
    (&["medical leave", "medical_leave"], DocumentType::MedicalLeave),
    (&["reward letter", "reward_letter", "reward"], DocumentType::RewardLetter),
    (
        &["punishment letter", "punishment_letter", "punishment"],
        DocumentType::PunishmentLetter,
    ),
    (
        &["probation letter", "probation_letter", "probation"],
        DocumentType::ProbationLetter,
    ),
];

/// Normalize a raw classifier label. Total: any input maps to a
/// `NormalizedLabel`, garbage included.
pub fn normalize_label(raw: &str) -> NormalizedLabel {
    let folded = raw.to_lowercase().trim().to_string();

    for (patterns, doc_type) in LABEL_PATTERNS {
        if patterns.iter().any(|p| folded.contains(p)) {
            return NormalizedLabel::Known(*doc_type);
        }
    }

    NormalizedLabel::Unrecognized(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_and_variant_spellings_normalize_equal() {
        for raw in ["Medical Leave", "medical_leave", "  MEDICAL LEAVE  ", "Medical Leave Letter"] {
            assert_eq!(
                normalize_label(raw),
                NormalizedLabel::Known(DocumentType::MedicalLeave),
                "input: {raw:?}"
            );
        }
    }

    #[test]
    fn earned_leave_wins_over_generic_leave_patterns() {
        // "earned leave letter" also contains no medical pattern, but the
        // priority row must catch it before anything else.
        assert_eq!(
            normalize_label("Earned Leave Letter"),
            NormalizedLabel::Known(DocumentType::EarnedLeaveLetter)
        );
        assert_eq!(
            normalize_label("this is an earned_leave document"),
            NormalizedLabel::Known(DocumentType::EarnedLeaveLetter)
        );
    }

    #[test]
    fn embedded_labels_match_by_substring() {
        assert_eq!(
            normalize_label("The document is a Reward Letter."),
            NormalizedLabel::Known(DocumentType::RewardLetter)
        );
        assert_eq!(
            normalize_label("Type: punishment_letter\n"),
            NormalizedLabel::Known(DocumentType::PunishmentLetter)
        );
        assert_eq!(
            normalize_label("probation letter (multi page)"),
            NormalizedLabel::Known(DocumentType::ProbationLetter)
        );
    }

    #[test]
    fn unmatched_input_returns_folded_original() {
        assert_eq!(
            normalize_label("  Transfer Order  "),
            NormalizedLabel::Unrecognized("transfer order".to_string())
        );
        assert_eq!(
            normalize_label("").document_type(),
            DocumentType::Unknown
        );
    }

    #[test]
    fn never_panics_on_garbage() {
        for raw in ["", "\0\0\0", "日本語のテキスト", "🙂🙂🙂", "a".repeat(10_000).as_str()] {
            let _ = normalize_label(raw);
        }
    }
}
