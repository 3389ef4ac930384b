use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(DocumentType {
    MedicalLeave => "medical_leave",
    EarnedLeaveLetter => "earned_leave_letter",
    ProbationLetter => "probation_letter",
    PunishmentLetter => "punishment_letter",
    RewardLetter => "reward_letter",
    Unknown => "unknown",
});

impl DocumentType {
    /// The five letter types the pipeline can extract fields for.
    pub const KNOWN: [DocumentType; 5] = [
        DocumentType::MedicalLeave,
        DocumentType::EarnedLeaveLetter,
        DocumentType::ProbationLetter,
        DocumentType::PunishmentLetter,
        DocumentType::RewardLetter,
    ];

    /// Hyphenated form used by the classify API and UI clients.
    pub fn external_label(&self) -> &'static str {
        match self {
            DocumentType::MedicalLeave => "medical-leave",
            DocumentType::EarnedLeaveLetter => "earned-leave",
            DocumentType::ProbationLetter => "probation-letter",
            DocumentType::PunishmentLetter => "punishment-letter",
            DocumentType::RewardLetter => "reward-letter",
            DocumentType::Unknown => "unknown",
        }
    }
}

str_enum!(DocumentStatus {
    Validated => "validated",
    NeedsReview => "needs_review",
});

str_enum!(LogAction {
    Insert => "INSERT",
    Delete => "DELETE",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn document_type_round_trip() {
        for (variant, s) in [
            (DocumentType::MedicalLeave, "medical_leave"),
            (DocumentType::EarnedLeaveLetter, "earned_leave_letter"),
            (DocumentType::ProbationLetter, "probation_letter"),
            (DocumentType::PunishmentLetter, "punishment_letter"),
            (DocumentType::RewardLetter, "reward_letter"),
            (DocumentType::Unknown, "unknown"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(DocumentType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn document_status_round_trip() {
        for (variant, s) in [
            (DocumentStatus::Validated, "validated"),
            (DocumentStatus::NeedsReview, "needs_review"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(DocumentStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn log_action_round_trip() {
        for (variant, s) in [(LogAction::Insert, "INSERT"), (LogAction::Delete, "DELETE")] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(LogAction::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn external_labels_are_hyphenated() {
        assert_eq!(DocumentType::MedicalLeave.external_label(), "medical-leave");
        assert_eq!(DocumentType::EarnedLeaveLetter.external_label(), "earned-leave");
        assert_eq!(DocumentType::RewardLetter.external_label(), "reward-letter");
    }

    #[test]
    fn known_excludes_unknown() {
        assert!(!DocumentType::KNOWN.contains(&DocumentType::Unknown));
        assert_eq!(DocumentType::KNOWN.len(), 5);
    }

    #[test]
    fn serde_uses_the_storage_strings() {
        let json = serde_json::to_string(&DocumentType::EarnedLeaveLetter).unwrap();
        assert_eq!(json, "\"earned_leave_letter\"");
        let back: DocumentStatus = serde_json::from_str("\"needs_review\"").unwrap();
        assert_eq!(back, DocumentStatus::NeedsReview);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(DocumentType::from_str("invalid").is_err());
        assert!(DocumentStatus::from_str("pending").is_err());
        assert!(LogAction::from_str("").is_err());
    }
}
