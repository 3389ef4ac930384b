//! Type registry: the fixed dispatch table from letter type to field
//! template and field descriptions.
//!
//! `unknown` is deliberately not registered. A record for an unrecognized
//! letter carries an open field map instead of a template.

use crate::models::enums::DocumentType;
use crate::models::fields::{
    EarnedLeaveFields, FieldSet, MedicalLeaveFields, ProbationFields, PunishmentFields,
    RewardFields,
};

#[derive(Debug, thiserror::Error)]
#[error("no field template registered for document type '{0}'")]
pub struct UnknownTypeError(pub String);

/// Sentinel-filled template record for a registered letter type.
pub fn template(doc_type: DocumentType) -> Result<FieldSet, UnknownTypeError> {
    match doc_type {
        DocumentType::MedicalLeave => Ok(FieldSet::MedicalLeave(MedicalLeaveFields::default())),
        DocumentType::EarnedLeaveLetter => Ok(FieldSet::EarnedLeave(EarnedLeaveFields::default())),
        DocumentType::ProbationLetter => Ok(FieldSet::Probation(ProbationFields::default())),
        DocumentType::PunishmentLetter => Ok(FieldSet::Punishment(PunishmentFields::default())),
        DocumentType::RewardLetter => Ok(FieldSet::Reward(RewardFields::default())),
        DocumentType::Unknown => Err(UnknownTypeError(doc_type.as_str().to_string())),
    }
}

/// Canonical field keys for a registered letter type.
pub fn field_names(doc_type: DocumentType) -> Result<&'static [&'static str], UnknownTypeError> {
    match doc_type {
        DocumentType::MedicalLeave => Ok(MedicalLeaveFields::FIELD_KEYS),
        DocumentType::EarnedLeaveLetter => Ok(EarnedLeaveFields::FIELD_KEYS),
        DocumentType::ProbationLetter => Ok(ProbationFields::FIELD_KEYS),
        DocumentType::PunishmentLetter => Ok(PunishmentFields::FIELD_KEYS),
        DocumentType::RewardLetter => Ok(RewardFields::FIELD_KEYS),
        DocumentType::Unknown => Err(UnknownTypeError(doc_type.as_str().to_string())),
    }
}

pub fn is_known(doc_type: DocumentType) -> bool {
    doc_type != DocumentType::Unknown
}

/// Human-readable descriptions of each field, keyed by field name.
pub fn descriptions(
    doc_type: DocumentType,
) -> Result<&'static [(&'static str, &'static str)], UnknownTypeError> {
    match doc_type {
        DocumentType::MedicalLeave => Ok(MEDICAL_LEAVE_DESCRIPTIONS),
        DocumentType::EarnedLeaveLetter => Ok(EARNED_LEAVE_DESCRIPTIONS),
        DocumentType::ProbationLetter => Ok(PROBATION_DESCRIPTIONS),
        DocumentType::PunishmentLetter => Ok(PUNISHMENT_DESCRIPTIONS),
        DocumentType::RewardLetter => Ok(REWARD_DESCRIPTIONS),
        DocumentType::Unknown => Err(UnknownTypeError(doc_type.as_str().to_string())),
    }
}

const MEDICAL_LEAVE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("name", "Full name of the person requesting leave"),
    ("dateOfSubmission", "Date when leave was submitted (DD-MM-YYYY format)"),
    ("coyBelongsTo", "Company designation (e.g., 'A coy Vijayawada')"),
    ("rank", "Rank or position (e.g., 'HC - 881')"),
    ("leaveReason", "Reason for leave (e.g., 'SICK LEAVE')"),
    ("phoneNumber", "10-digit phone number"),
    ("unitAndDistrict", "Unit and district details"),
];

const EARNED_LEAVE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("rcNo", "RC No in the format of xx/xx/xxxx"),
    ("hodNo", "HOD No"),
    ("pcNo", "PC No"),
    ("name", "Full name of the person requesting leave"),
    ("date", "Date of the letter (DD-MM-YYYY format)"),
    ("numberOfDays", "Count of leave days requested"),
    ("leaveFromDate", "Leave start date (DD-MM-YYYY format)"),
    ("leaveToDate", "Leave end date (DD-MM-YYYY format)"),
    ("leaveReason", "Reason for leave"),
];

const PROBATION_DESCRIPTIONS: &[(&str, &str)] = &[
    ("serviceClassCategory", "Service class and category"),
    ("nameOfProbationer", "Full name of the probationer"),
    ("dateOfRegularization", "Date of regularization (DD-MM-YYYY format)"),
    ("periodOfProbation", "Period of probation (e.g., '2 years')"),
    ("leaveTakenDuringProbation", "Leave taken during probation ('NONE' if no leave taken)"),
    ("dateOfCompletion", "Date of completion of probation (DD-MM-YYYY format)"),
    ("testsToBePassed", "Tests to be passed during probation (e.g., 'Physical Test')"),
    ("punishmentsDuringProbation", "Punishments during probation ('NONE' if no punishments)"),
    ("pendingPROE", "Pending PR/OE ('NONE' if none pending)"),
    ("characterAndConduct", "Character and conduct remarks (e.g., 'Excellent')"),
    ("firingPracticeCompleted", "Firing practice completed ('Yes' or 'No')"),
    ("remarksOfICOfficer", "Remarks of I/C Officer"),
    ("remarksOfCommandant", "Remarks of Commandant"),
    ("remarksOfDIG", "Remarks of DIG"),
    ("adgpOrders", "ADGP orders (e.g., 'Approved')"),
    ("dateOfBirth", "Date of birth (DD-MM-YYYY format)"),
    ("salary", "Salary details (e.g., 'Rs. 30,000')"),
    ("qualification", "Education qualification details"),
    ("acceptanceOfSelfAppraisal", "Acceptance of self-appraisal report (e.g., 'Accepted')"),
    ("assessmentOfPerformance", "Assessment of performance during the year (e.g., 'Good')"),
];

const PUNISHMENT_DESCRIPTIONS: &[(&str, &str)] = &[
    ("rcNo", "RC No in the format of xx/xx/xxxx"),
    ("doNo", "D.O No"),
    ("orderDate", "Date of the order (DD-MM-YYYY format)"),
    ("punishmentAwarded", "Punishment awarded"),
    ("delinquencyDescription", "Description of delinquency"),
    ("issuedBy", "Name of the issuing authority"),
    ("issuedDate", "Date of issue (DD-MM-YYYY format)"),
];

const REWARD_DESCRIPTIONS: &[(&str, &str)] = &[
    ("rcNo", "RC No in the format of xx/xx/xxxx"),
    ("hooNo", "HOO No"),
    ("date", "Date of the letter (DD-MM-YYYY format)"),
    ("issuedBy", "Name of the issuing authority"),
    ("subject", "Subject of the reward letter"),
    ("referenceOrders", "Reference orders related to the reward"),
    ("rewardDetails", "Officer entries with rank, name, and reward"),
    ("reasonForReward", "Reason for the reward (e.g., 'Outstanding performance in duty')"),
];
