use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentFormat {
    TD1, // ID Card, 3 lines of 30
    TD2, // ID Card, 2 lines of 36
    TD3, // Passport, 2 lines of 44
}

impl DocumentFormat {
    pub fn mrz_lines(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 3,
            DocumentFormat::TD2 => 2,
            DocumentFormat::TD3 => 2,
        }
    }

    pub fn mrz_chars_per_line(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 30,
            DocumentFormat::TD2 => 36,
            DocumentFormat::TD3 => 44,
        }
    }

    /// Identify the layout from a line count and a uniform line length.
    pub fn from_shape(lines: usize, chars_per_line: usize) -> Option<Self> {
        [DocumentFormat::TD1, DocumentFormat::TD2, DocumentFormat::TD3]
            .into_iter()
            .find(|f| f.mrz_lines() == lines && f.mrz_chars_per_line() == chars_per_line)
    }
}

/// Which century policy a six-digit MRZ date is resolved with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePurpose {
    BirthDate,
    ExpirationDate,
}

/// Keys the MRZ grammar parser emits that this crate consumes.
pub const RECOGNIZED_KEYS: &[&str] = &[
    "type",
    "country",
    "number",
    "date_of_birth",
    "expiration_date",
    "nationality",
    "sex",
    "names",
    "surname",
    "personal_number",
    "check_number",
    "check_date_of_birth",
    "check_expiration_date",
    "check_personal_number",
    "check_composite",
    "mrz_type",
    "valid_score",
];

/// Field values as produced by the external MRZ grammar parser.
///
/// Every field is optional. Unknown keys are ignored on deserialization;
/// [`RawMrzFields::from_json_map`] additionally reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawMrzFields {
    #[serde(rename = "type")]
    pub document_type: Option<String>,
    #[serde(rename = "country")]
    pub country_code: Option<String>,
    #[serde(rename = "number")]
    pub passport_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub expiration_date: Option<String>,
    pub nationality: Option<String>,
    pub sex: Option<String>,
    #[serde(rename = "names")]
    pub given_names: Option<String>,
    pub surname: Option<String>,
    pub personal_number: Option<String>,
    pub check_number: Option<String>,
    pub check_date_of_birth: Option<String>,
    pub check_expiration_date: Option<String>,
    pub check_personal_number: Option<String>,
    pub check_composite: Option<String>,
    pub mrz_type: Option<String>,
    pub valid_score: Option<i64>,
}

impl RawMrzFields {
    /// Build from an open-ended parser map.
    ///
    /// Returns the recognized fields and the sorted list of keys that were
    /// ignored. A recognized key holding a value of the wrong JSON type is
    /// treated as absent.
    pub fn from_json_map(map: &Map<String, Value>) -> (Self, Vec<String>) {
        let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);

        let fields = RawMrzFields {
            document_type: text("type"),
            country_code: text("country"),
            passport_number: text("number"),
            date_of_birth: text("date_of_birth"),
            expiration_date: text("expiration_date"),
            nationality: text("nationality"),
            sex: text("sex"),
            given_names: text("names"),
            surname: text("surname"),
            personal_number: text("personal_number"),
            check_number: text("check_number"),
            check_date_of_birth: text("check_date_of_birth"),
            check_expiration_date: text("check_expiration_date"),
            check_personal_number: text("check_personal_number"),
            check_composite: text("check_composite"),
            mrz_type: text("mrz_type"),
            valid_score: map.get("valid_score").and_then(Value::as_i64),
        };

        let mut ignored: Vec<String> = map
            .keys()
            .filter(|k| !RECOGNIZED_KEYS.contains(&k.as_str()))
            .cloned()
            .collect();
        ignored.sort();
        if !ignored.is_empty() {
            debug!("Ignoring unrecognized MRZ parser keys: {:?}", ignored);
        }

        (fields, ignored)
    }

    /// True when the parser produced no field at all.
    pub fn is_empty(&self) -> bool {
        *self == RawMrzFields::default()
    }
}

/// The five check digits exactly as extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckDigits {
    #[serde(rename = "check_number")]
    pub document_number: Option<String>,
    #[serde(rename = "check_date_of_birth")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "check_expiration_date")]
    pub expiration_date: Option<String>,
    #[serde(rename = "check_composite")]
    pub composite: Option<String>,
    #[serde(rename = "check_personal_number")]
    pub personal_number: Option<String>,
}

/// Outcome of each ICAO check. `None` means the check was not evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationFlags {
    pub valid_number: Option<bool>,
    pub valid_date_of_birth: Option<bool>,
    pub valid_expiration_date: Option<bool>,
    pub valid_composite: Option<bool>,
    pub valid_personal_number: Option<bool>,
}

impl ValidationFlags {
    pub fn as_array(&self) -> [Option<bool>; 5] {
        [
            self.valid_number,
            self.valid_date_of_birth,
            self.valid_expiration_date,
            self.valid_composite,
            self.valid_personal_number,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub issue_type: ValidationIssueType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssueType {
    Mrz,
    Format,
}

/// A validated passport record. Only the record builder constructs one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassportRecord {
    mrz_texts: Vec<String>,
    mrz_type: Option<String>,
    valid_score: Option<i64>,
    document_type: Option<String>,
    country_code: Option<String>,
    passport_number: Option<String>,
    date_of_birth: Option<String>,
    expiration_date: Option<String>,
    nationality: Option<String>,
    sex: Option<String>,
    given_names: Option<String>,
    surname: Option<String>,
    personal_number: Option<String>,
    #[serde(flatten)]
    check_digits: CheckDigits,
    #[serde(flatten)]
    flags: ValidationFlags,
    is_valid: bool,
}

/// Everything a record holds except the derived verdict.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordParts {
    pub mrz_texts: Vec<String>,
    pub mrz_type: Option<String>,
    pub valid_score: Option<i64>,
    pub document_type: Option<String>,
    pub country_code: Option<String>,
    pub passport_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub expiration_date: Option<String>,
    pub nationality: Option<String>,
    pub sex: Option<String>,
    pub given_names: Option<String>,
    pub surname: Option<String>,
    pub personal_number: Option<String>,
    pub check_digits: CheckDigits,
    pub flags: ValidationFlags,
}

impl PassportRecord {
    pub(crate) fn assemble(parts: RecordParts, is_valid: bool) -> Self {
        PassportRecord {
            mrz_texts: parts.mrz_texts,
            mrz_type: parts.mrz_type,
            valid_score: parts.valid_score,
            document_type: parts.document_type,
            country_code: parts.country_code,
            passport_number: parts.passport_number,
            date_of_birth: parts.date_of_birth,
            expiration_date: parts.expiration_date,
            nationality: parts.nationality,
            sex: parts.sex,
            given_names: parts.given_names,
            surname: parts.surname,
            personal_number: parts.personal_number,
            check_digits: parts.check_digits,
            flags: parts.flags,
            is_valid,
        }
    }

    pub fn mrz_texts(&self) -> &[String] {
        &self.mrz_texts
    }

    pub fn mrz_type(&self) -> Option<&str> {
        self.mrz_type.as_deref()
    }

    pub fn valid_score(&self) -> Option<i64> {
        self.valid_score
    }

    pub fn document_type(&self) -> Option<&str> {
        self.document_type.as_deref()
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn passport_number(&self) -> Option<&str> {
        self.passport_number.as_deref()
    }

    /// Resolved `YYYY-MM-DD` birth date.
    pub fn date_of_birth(&self) -> Option<&str> {
        self.date_of_birth.as_deref()
    }

    /// Resolved `YYYY-MM-DD` expiration date.
    pub fn expiration_date(&self) -> Option<&str> {
        self.expiration_date.as_deref()
    }

    pub fn nationality(&self) -> Option<&str> {
        self.nationality.as_deref()
    }

    pub fn sex(&self) -> Option<&str> {
        self.sex.as_deref()
    }

    pub fn given_names(&self) -> Option<&str> {
        self.given_names.as_deref()
    }

    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    pub fn personal_number(&self) -> Option<&str> {
        self.personal_number.as_deref()
    }

    pub fn check_digits(&self) -> &CheckDigits {
        &self.check_digits
    }

    pub fn flags(&self) -> &ValidationFlags {
        &self.flags
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }
}

/// One MRZ text entry; detectors sometimes group lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MrzText {
    Line(String),
    Lines(Vec<String>),
}

/// Input document for the command line front end.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationRequest {
    pub mrz_texts: Vec<MrzText>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl ValidationRequest {
    /// MRZ lines in order with any grouping removed.
    pub fn flat_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for text in &self.mrz_texts {
            match text {
                MrzText::Line(line) => lines.push(line.clone()),
                MrzText::Lines(group) => lines.extend(group.iter().cloned()),
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_format_from_shape() {
        assert_eq!(DocumentFormat::from_shape(2, 44), Some(DocumentFormat::TD3));
        assert_eq!(DocumentFormat::from_shape(2, 36), Some(DocumentFormat::TD2));
        assert_eq!(DocumentFormat::from_shape(3, 30), Some(DocumentFormat::TD1));
        assert_eq!(DocumentFormat::from_shape(3, 44), None);
    }

    #[test]
    fn test_from_json_map_reports_unknown_keys() {
        let value = json!({
            "type": "P<",
            "country": "UTO",
            "number": "L898902C3",
            "valid_score": 100,
            "walltime": 0.12,
            "method": "direct"
        });
        let (fields, ignored) = RawMrzFields::from_json_map(value.as_object().unwrap());

        assert_eq!(fields.document_type.as_deref(), Some("P<"));
        assert_eq!(fields.country_code.as_deref(), Some("UTO"));
        assert_eq!(fields.passport_number.as_deref(), Some("L898902C3"));
        assert_eq!(fields.valid_score, Some(100));
        assert_eq!(ignored, vec!["method".to_string(), "walltime".to_string()]);
    }

    #[test]
    fn test_from_json_map_null_and_wrong_types_are_absent() {
        let value = json!({ "type": null, "sex": 1, "surname": "ERIKSSON" });
        let (fields, ignored) = RawMrzFields::from_json_map(value.as_object().unwrap());

        assert!(fields.document_type.is_none());
        assert!(fields.sex.is_none());
        assert_eq!(fields.surname.as_deref(), Some("ERIKSSON"));
        assert!(ignored.is_empty());
        assert!(!fields.is_empty());
    }

    #[test]
    fn test_deserialize_uses_parser_keys() {
        let fields: RawMrzFields = serde_json::from_value(json!({
            "type": "P",
            "names": "ANNA MARIA",
            "extra": "ignored"
        }))
        .unwrap();
        assert_eq!(fields.document_type.as_deref(), Some("P"));
        assert_eq!(fields.given_names.as_deref(), Some("ANNA MARIA"));
        assert!(RawMrzFields::default().is_empty());
    }

    #[test]
    fn test_request_flattens_grouped_lines() {
        let request: ValidationRequest = serde_json::from_value(json!({
            "mrz_texts": [["LINE1", "LINE2"], "LINE3"]
        }))
        .unwrap();
        assert_eq!(request.flat_lines(), vec!["LINE1", "LINE2", "LINE3"]);
        assert!(request.fields.is_empty());
    }
}
