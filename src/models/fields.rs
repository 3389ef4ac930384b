//! Typed field records for each letter type.
//!
//! Every field defaults to the `"NONE"` sentinel so a partially extracted
//! record always carries the complete key set for its type. Keys the
//! extractor returns beyond the template flatten into `extra` and are
//! preserved verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::DocumentType;

/// Sentinel for a field the extractor did not produce.
pub const NONE_SENTINEL: &str = "NONE";

fn none_value() -> Value {
    Value::String(NONE_SENTINEL.to_string())
}

/// Macro to generate a field record struct with sentinel defaults,
/// an open pass-through map, and the canonical key list.
macro_rules! field_record {
    ($name:ident { $($field:ident => $key:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(rename = $key, default = "none_value")]
                pub $field: Value,
            )+
            #[serde(flatten)]
            pub extra: Map<String, Value>,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: none_value(),)+
                    extra: Map::new(),
                }
            }
        }

        impl $name {
            pub const FIELD_KEYS: &'static [&'static str] = &[$($key),+];
        }
    };
}

field_record!(MedicalLeaveFields {
    name => "name",
    date_of_submission => "dateOfSubmission",
    coy_belongs_to => "coyBelongsTo",
    rank => "rank",
    leave_reason => "leaveReason",
    phone_number => "phoneNumber",
    unit_and_district => "unitAndDistrict",
});

field_record!(EarnedLeaveFields {
    rc_no => "rcNo",
    hod_no => "hodNo",
    pc_no => "pcNo",
    name => "name",
    date => "date",
    number_of_days => "numberOfDays",
    leave_from_date => "leaveFromDate",
    leave_to_date => "leaveToDate",
    leave_reason => "leaveReason",
});

field_record!(ProbationFields {
    service_class_category => "serviceClassCategory",
    name_of_probationer => "nameOfProbationer",
    date_of_regularization => "dateOfRegularization",
    period_of_probation => "periodOfProbation",
    leave_taken_during_probation => "leaveTakenDuringProbation",
    date_of_completion => "dateOfCompletion",
    tests_to_be_passed => "testsToBePassed",
    punishments_during_probation => "punishmentsDuringProbation",
    pending_pr_oe => "pendingPROE",
    character_and_conduct => "characterAndConduct",
    firing_practice_completed => "firingPracticeCompleted",
    remarks_of_ic_officer => "remarksOfICOfficer",
    remarks_of_commandant => "remarksOfCommandant",
    remarks_of_dig => "remarksOfDIG",
    adgp_orders => "adgpOrders",
    date_of_birth => "dateOfBirth",
    salary => "salary",
    qualification => "qualification",
    acceptance_of_self_appraisal => "acceptanceOfSelfAppraisal",
    assessment_of_performance => "assessmentOfPerformance",
});

field_record!(PunishmentFields {
    rc_no => "rcNo",
    do_no => "doNo",
    order_date => "orderDate",
    punishment_awarded => "punishmentAwarded",
    delinquency_description => "delinquencyDescription",
    issued_by => "issuedBy",
    issued_date => "issuedDate",
});

field_record!(RewardFields {
    rc_no => "rcNo",
    hoo_no => "hooNo",
    date => "date",
    issued_by => "issuedBy",
    subject => "subject",
    reference_orders => "referenceOrders",
    reward_details => "rewardDetails",
    reason_for_reward => "reasonForReward",
});

/// A complete field record, tagged by letter type.
///
/// `Open` holds payloads with no fixed schema: records for the `unknown`
/// type and diagnostic messages from degraded pipeline runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldSet {
    MedicalLeave(MedicalLeaveFields),
    EarnedLeave(EarnedLeaveFields),
    Probation(ProbationFields),
    Punishment(PunishmentFields),
    Reward(RewardFields),
    Open(Map<String, Value>),
}

impl FieldSet {
    /// Deserialize a JSON value into the record shape for `doc_type`.
    ///
    /// Untagged deserialization would be ambiguous because every variant
    /// accepts any object, so the caller supplies the type explicitly.
    pub fn from_value(doc_type: DocumentType, value: Value) -> Result<Self, serde_json::Error> {
        match doc_type {
            DocumentType::MedicalLeave => serde_json::from_value(value).map(Self::MedicalLeave),
            DocumentType::EarnedLeaveLetter => serde_json::from_value(value).map(Self::EarnedLeave),
            DocumentType::ProbationLetter => serde_json::from_value(value).map(Self::Probation),
            DocumentType::PunishmentLetter => serde_json::from_value(value).map(Self::Punishment),
            DocumentType::RewardLetter => serde_json::from_value(value).map(Self::Reward),
            DocumentType::Unknown => Ok(Self::Open(match value {
                Value::Object(map) => map,
                other => {
                    let mut map = Map::new();
                    map.insert("value".to_string(), other);
                    map
                }
            })),
        }
    }

    /// Single-entry open record, used for diagnostic payloads.
    pub fn open_message(key: &str, message: &str) -> Self {
        let mut map = Map::new();
        map.insert(key.to_string(), Value::String(message.to_string()));
        Self::Open(map)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Flatten to a key/value map, e.g. for export column generation.
    pub fn as_map(&self) -> Map<String, Value> {
        match self.to_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}
