pub mod data;
pub mod rules;

pub use data::{
    CheckDigits, DatePurpose, DocumentFormat, MrzText, PassportRecord, RawMrzFields,
    ValidationFlags, ValidationIssue, ValidationIssueType, ValidationRequest, RECOGNIZED_KEYS,
};
pub use rules::{CountryRule, CountryRules, FieldQuirk};

pub(crate) use data::RecordParts;
