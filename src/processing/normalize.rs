use crate::models::RawMrzFields;

/// MRZ filler character.
pub const FILLER: char = '<';

/// Remove MRZ filler, trim surrounding whitespace and upper-case.
pub fn normalize_field(value: Option<&str>) -> Option<String> {
    value.map(|v| v.replace(FILLER, "").trim().to_uppercase())
}

/// The textual fields of a document after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFields {
    pub document_type: Option<String>,
    pub country_code: Option<String>,
    pub passport_number: Option<String>,
    pub nationality: Option<String>,
    pub sex: Option<String>,
    pub given_names: Option<String>,
    pub surname: Option<String>,
    pub personal_number: Option<String>,
}

impl NormalizedFields {
    /// Dates and check digits are left to their own stages.
    pub fn from_raw(raw: &RawMrzFields) -> Self {
        NormalizedFields {
            document_type: normalize_field(raw.document_type.as_deref()),
            country_code: normalize_field(raw.country_code.as_deref()),
            passport_number: normalize_field(raw.passport_number.as_deref()),
            nationality: normalize_field(raw.nationality.as_deref()),
            sex: normalize_field(raw.sex.as_deref()),
            given_names: normalize_field(raw.given_names.as_deref()),
            surname: normalize_field(raw.surname.as_deref()),
            personal_number: normalize_field(raw.personal_number.as_deref()),
        }
    }
}
