use crate::models::{ValidationFlags, ValidationIssue, ValidationIssueType};
use crate::validation::checksum::verify_checksum;

/// Field values and check digits fed to the five ICAO checks.
///
/// Dates are the raw six-digit strings, not the resolved calendar dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckFields<'a> {
    pub passport_number: Option<&'a str>,
    pub check_number: Option<&'a str>,
    pub date_of_birth: Option<&'a str>,
    pub check_date_of_birth: Option<&'a str>,
    pub expiration_date: Option<&'a str>,
    pub check_expiration_date: Option<&'a str>,
    pub personal_number: Option<&'a str>,
    pub check_personal_number: Option<&'a str>,
    pub check_composite: Option<&'a str>,
}

impl<'a> CheckFields<'a> {
    /// Concatenation covered by the composite check digit. Missing parts
    /// contribute nothing but keep their place in the order.
    pub fn composite_field(&self) -> String {
        [
            self.passport_number,
            self.check_number,
            self.date_of_birth,
            self.check_date_of_birth,
            self.expiration_date,
            self.check_expiration_date,
            self.personal_number,
            self.check_personal_number,
        ]
        .iter()
        .map(|part| part.unwrap_or(""))
        .collect()
    }
}

pub struct MrzValidator;

impl MrzValidator {
    /// Run all five check-digit verifications.
    pub fn validate_fields(fields: &CheckFields<'_>) -> ValidationFlags {
        let composite = fields.composite_field();

        ValidationFlags {
            valid_number: Some(verify_checksum(fields.passport_number, fields.check_number)),
            valid_date_of_birth: Some(verify_checksum(
                fields.date_of_birth,
                fields.check_date_of_birth,
            )),
            valid_expiration_date: Some(verify_checksum(
                fields.expiration_date,
                fields.check_expiration_date,
            )),
            valid_composite: Some(verify_checksum(Some(composite.as_str()), fields.check_composite)),
            valid_personal_number: Some(verify_checksum(
                fields.personal_number,
                fields.check_personal_number,
            )),
        }
    }

    /// `true` only if at least one flag was evaluated and none of them failed.
    pub fn compute_overall_validity(flags: &ValidationFlags) -> bool {
        let evaluated: Vec<bool> = flags.as_array().into_iter().flatten().collect();
        !evaluated.is_empty() && evaluated.into_iter().all(|ok| ok)
    }

    /// One issue per failed check.
    pub fn issues(flags: &ValidationFlags) -> Vec<ValidationIssue> {
        let checks = [
            (flags.valid_number, "Document number check digit mismatch"),
            (flags.valid_date_of_birth, "Date of birth check digit mismatch"),
            (flags.valid_expiration_date, "Expiration date check digit mismatch"),
            (flags.valid_composite, "Composite check digit mismatch"),
            (flags.valid_personal_number, "Personal number check digit mismatch"),
        ];

        checks
            .iter()
            .filter(|(flag, _)| *flag == Some(false))
            .map(|(_, message)| ValidationIssue {
                issue_type: ValidationIssueType::Mrz,
                message: message.to_string(),
            })
            .collect()
    }
}
