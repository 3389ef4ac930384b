//! Prompt text for classification and per-type field extraction.
//!
//! Wording is operationally significant: the extraction prompts pin down
//! field names, date formats, and the Telugu transliteration rule the
//! downstream merge step depends on.

use crate::models::enums::DocumentType;
use crate::registry::UnknownTypeError;

pub const SYSTEM_MESSAGE: &str = "You are an expert in Document Classification and Parsing!";

pub const CLASSIFICATION_PROMPT: &str = "Classify the document image as one of the following types based on the content in it: Medical Leave, Reward Letter, Punishment Letter, Probation Letter, Earned Leave Letter. Do NOT return me any value other than the class name.";

pub const MEDICAL_LEAVE_PROMPT: &str = r#"
You are an expert in document field extraction. Extract the following fields from the uploaded document image.

Instructions:
- If any field is written in Telugu, do NOT translate it. Just write the Telugu text using English letters (e.g., పాండు → Paandu).
- Extract only the required fields listed below.
- If a required field is missing, return "NULL" as the value.
- For the "Name" field, use the main name filled in the form, not the name from the signature or inside the body of the letter.

Required Fields:

1. Name – Full name of the personnel submitting the form. Only alphabets, dots, and spaces. Use the name written in the form section, not the one from the signature or letter body.
2. Date of Submission – Date in DD-MM-YYYY format.
3. Coy Belongs to – Company or division (e.g., A Coy, B Coy, HQ Coy).
4. Rank – Official police rank (e.g., PC, HC, SI).
5. Leave Reason – A short sentence about why leave is being taken.
6. Phone Number – Valid 10-digit Indian mobile number (starting with 6–9).
7. Unit and District – Full unit name followed by district (e.g., 5th Bn. APSP, Vizianagaram).

Output Format (JSON):
{
  "Name": "...",
  "Date of Submission": "...",
  "Coy Belongs to": "...",
  "Rank": "...",
  "Leave Reason": "...",
  "Phone Number": "...",
  "Unit and District": "..."
}
Only return the final JSON output. No explanations or extra text.
"#;

pub const PROBATION_PROMPT: &str = r#"
You are an expert in document field extraction.

Instructions:
- This is a multi-page document. Each page will be sent as a separate image.
- Only extract the fields present on this page. Ignore the fields not found on this page.
- If a field value is found, return it with its correct name and format.
- If the field is not present on this page, simply omit it from the output (do not return "Not found").
- Do not translate Telugu content. If a name or value is in Telugu, write it using English letters (e.g., వెంకట్ → Venkat).
- Maintain original casing, formatting, and expected formats (e.g., DD-MM-YYYY for dates, 'YES'/'NO', 'NIL').

Fields to extract (if available on this page):

1. Service Class Category
2. Name of Probationer
3. Date of Regularization
4. Period of Probation Prescribed
5. Leave Taken During Probation
6. Date of Completion of Probation
7. Tests to be Passed During Probation
8. Punishments During Probation
9. Pending PR/OE
10. Character and Conduct
11. Firing Practice Completed
12. Remarks of I/C Officer
13. Remarks of Commandant
14. Remarks of DIG
15. ADGP Orders
16. Date of Birth
17. Salary
18. Qualification
19. Acceptance of Self Appraisal Report – Part-I
20. Assessment of Officer's Performance During the Year

Nested Fields:
- Reporting Officer:
    - Name
    - Designation
    - Date (Optional)

- Countersigning Officer:
    - Name
    - Designation
    - Date (Optional)
    - Remarks

- Head of Department Opinion:
    - Opinion
    - Date (Optional)
    - Name
    - Designation

Output Format:
Return a clean JSON object with only the fields extracted from this page. Do not include fields that are not present on this page. Do not give any explanations.
"#;

pub const REWARD_PROMPT: &str = r#"
You are an expert in document field extraction.

Instructions:
- This is a reward order document. Extract only the required fields listed below from the document image.
- Do NOT translate any Telugu content. If a name or value is in Telugu, write it in English letters (e.g., రాజు → Raju).
- Extract only the fields present on this page. If a required field is not found, return "NULL" as the value.
- Follow the specified format rules for each field exactly.

Required Fields:

1. R c No – Format: SectionCode/SerialNumber/Year (e.g., B4/149/2020)
2. H. O. O No – Format: ReferenceNumber/YYYY (e.g., 709/2020)
3. Date – Format: DD-MM-YYYY
4. Issued By – Name and designation of the issuing authority.
5. Subject – Title or heading line from the document.
6. Reference Orders – List of references cited (as an array).
7. Reward Details – Array of officer entries with:
    - Rank (e.g., HC, SI)
    - Name
    - Reward amount or description
8. Reason for Reward – Descriptive sentence stating why the reward was granted.

Output Format:
Return a JSON object with only the fields found on this page. For Reward Details, use this structure:
"Reward Details": [
  { "Rank": "...", "Name": "...", "Reward": "..." },
  ...
]
Do not include any explanation or commentary—only return the JSON.
"#;

pub const PUNISHMENT_PROMPT: &str = r#"
You are an expert in document field extraction.

Instructions:
- This is a punishment order document. Extract only the required fields listed below from the document image.
- Do NOT translate Telugu content. If any name or detail is in Telugu, write it using English letters (e.g., వెంకట్ → Venkat).
- Only extract fields that are present in this page else return "NULL" as the value.
- Follow all formatting rules as specified below.

Required Fields:

1. R c. No – Combination of:
   - Reference number (digits),
   - Section code (e.g., A6, B4),
   - Case type (PR),
   - Hyphenated serial number (e.g., PR-309),
   - Year range (e.g., 23-24)
   Example: 123/B4/PR-309/23-24

2. D. O No – Format: ReferenceNumber/YYYY (e.g., 709/2022)

3. Order_date – Format: DD-MM-YYYY or DD/MM/YY

4. Punishment_awarded – e.g., PP I or PP II followed by duration and conditions (like "PP I for 3 months w.e.f. 01-01-2023")

5. Deliquency_Description – Describes the offense or misconduct with details. Should include w.e.f. date if mentioned.

6. Issued By – Officer designation and unit (e.g., Commandant, 5th Bn. APSP)

7. Issued Date – Final signed date in DD-MM-YYYY or DD/MM/YY format

Output Format:
Return the extracted result as a JSON object with only the fields found in this page.
"#;

pub const EARNED_LEAVE_PROMPT: &str = r#"
You are an expert in document field extraction.

Instructions:
- This is a document related to earned leave. Extract only the required fields listed below from the image of this page.
- If any field is written in Telugu, do NOT translate it. Just write the Telugu words using English letters (e.g., శ్రీను → Srinu).
- Extract only fields that are present in this page else return "NULL" as the value.
- Follow the format exactly as described.

Required Fields:

1. R c No. – Format: SectionCode/SerialNumber/Year (e.g., B4/149/2020)
2. H.O.D No. – Format: SerialNumber/Year (e.g., 72/2020)
3. PC No. / HC No. / ARSI No. – Required only if the designation includes 'PC', 'HC', or 'ARSI'. Format: e.g., PC-1158 or HC-230 or ARSI-87
4. Name – Example: S. Praveen Kumar or Praveen Kumar (only alphabets, spaces, dots)
5. Date – Format: DD-MM-YYYY (e.g., issue date or sanction date)
6. Number of Days – Total leave days. Format: Positive whole number (e.g., 7)
7. Leave From Date – Format: DD-MM-YYYY
8. Leave To Date – Format: DD-MM-YYYY
9. Leave Reason – Descriptive text explaining the reason for leave

Output Format:
Return the extracted result as a JSON object. Only include fields found on this page.

Note:
- If the PC/HC/ARSI number is not required based on designation, do not include it, and if it is optional, include it if it's present else ignore it.
- Do not add explanations—only return the final JSON.
"#;

/// Extraction prompt for a registered letter type.
pub fn extraction_prompt(doc_type: DocumentType) -> Result<&'static str, UnknownTypeError> {
    match doc_type {
        DocumentType::MedicalLeave => Ok(MEDICAL_LEAVE_PROMPT),
        DocumentType::EarnedLeaveLetter => Ok(EARNED_LEAVE_PROMPT),
        DocumentType::ProbationLetter => Ok(PROBATION_PROMPT),
        DocumentType::PunishmentLetter => Ok(PUNISHMENT_PROMPT),
        DocumentType::RewardLetter => Ok(REWARD_PROMPT),
        DocumentType::Unknown => Err(UnknownTypeError(doc_type.as_str().to_string())),
    }
}
