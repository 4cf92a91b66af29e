use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::{DocumentFormat, ValidationIssue, ValidationIssueType};

const TD3_LINE_LENGTH: usize = 44;

/// Result of checking the shape of detected MRZ lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureReport {
    pub is_valid: bool,
    pub message: String,
    pub document_format: Option<DocumentFormat>,
    pub issues: Vec<ValidationIssue>,
}

fn mrz_charset() -> Option<&'static Regex> {
    static CHARSET: OnceLock<Option<Regex>> = OnceLock::new();
    CHARSET
        .get_or_init(|| Regex::new(r"^[A-Z0-9<]+$").ok())
        .as_ref()
}

pub struct FormatValidator;

impl FormatValidator {
    /// Check line count and, for two-line input, the TD3 line length.
    ///
    /// Entries may themselves contain several newline-separated lines;
    /// blank lines are ignored and surrounding whitespace is trimmed.
    pub fn validate_mrz_structure<S: AsRef<str>>(mrz_texts: &[S]) -> StructureReport {
        let lines: Vec<&str> = mrz_texts
            .iter()
            .flat_map(|text| text.as_ref().lines())
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let document_format = match lines.first() {
            Some(first) if lines.iter().all(|l| l.len() == first.len()) => {
                DocumentFormat::from_shape(lines.len(), first.len())
            }
            _ => None,
        };

        let mut issues = Vec::new();
        let mut format_issue = |message: String| {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Format,
                message,
            })
        };

        let message = if lines.is_empty() {
            "Empty MRZ text.".to_string()
        } else if lines.len() != 2 && lines.len() != 3 {
            format!("Invalid MRZ lines count ({}).", lines.len())
        } else if lines.len() == 2 && !lines.iter().all(|l| l.len() == TD3_LINE_LENGTH) {
            format!(
                "Invalid line length for TD3 MRZ. Expected {} chars per line.",
                TD3_LINE_LENGTH
            )
        } else {
            String::new()
        };
        let shape_ok = message.is_empty();
        if !shape_ok {
            format_issue(message.clone());
        }

        if let Some(charset) = mrz_charset() {
            for (index, line) in lines.iter().enumerate() {
                if !charset.is_match(line) {
                    format_issue(format!(
                        "Line {} contains characters outside A-Z, 0-9 and '<'.",
                        index + 1
                    ));
                }
            }
        }

        let is_valid = issues.is_empty();
        StructureReport {
            is_valid,
            message: if shape_ok {
                "Valid MRZ structure.".to_string()
            } else {
                message
            },
            document_format,
            issues,
        }
    }

    /// True iff `date_str` is a real calendar date written as `YYYY-MM-DD`.
    pub fn validate_date_format(date_str: Option<&str>) -> bool {
        match date_str {
            Some(s) if s.len() == 10 => NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE1: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<";
    const LINE2: &str = "L898902C36UTO7408122F1204159ZE184226B<<<<<10";

    #[test]
    fn test_valid_td3_structure() {
        let report = FormatValidator::validate_mrz_structure(&[LINE1, LINE2]);
        assert!(report.is_valid);
        assert_eq!(report.message, "Valid MRZ structure.");
        assert_eq!(report.document_format, Some(DocumentFormat::TD3));
    }

    #[test]
    fn test_lines_split_and_blank_lines_ignored() {
        let joined = format!("{}\n\n  {}  \n", LINE1, LINE2);
        let report = FormatValidator::validate_mrz_structure(&[joined]);
        assert!(report.is_valid);
    }

    #[test]
    fn test_bad_line_count_and_length() {
        let empty: [&str; 0] = [];
        let report = FormatValidator::validate_mrz_structure(&empty);
        assert!(!report.is_valid);
        assert_eq!(report.message, "Empty MRZ text.");

        let report = FormatValidator::validate_mrz_structure(&[LINE1]);
        assert_eq!(report.message, "Invalid MRZ lines count (1).");

        let report = FormatValidator::validate_mrz_structure(&[LINE1, &LINE2[..36]]);
        assert!(!report.is_valid);
        assert!(report.message.starts_with("Invalid line length for TD3 MRZ"));
        assert_eq!(report.document_format, None);
    }

    #[test]
    fn test_three_line_td1() {
        let lines = [
            "I<UTOD231458907<<<<<<<<<<<<<<<",
            "7408122F1204159UTO<<<<<<<<<<<6",
            "ERIKSSON<<ANNA<MARIA<<<<<<<<<<",
        ];
        let report = FormatValidator::validate_mrz_structure(&lines);
        assert!(report.is_valid);
        assert_eq!(report.document_format, Some(DocumentFormat::TD1));
    }

    #[test]
    fn test_lowercase_characters_flagged() {
        let lower = LINE1.to_lowercase();
        let report = FormatValidator::validate_mrz_structure(&[lower.as_str(), LINE2]);
        assert!(!report.is_valid);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].issue_type, ValidationIssueType::Format);
    }

    #[test]
    fn test_validate_date_format() {
        assert!(FormatValidator::validate_date_format(Some("1974-08-12")));
        assert!(!FormatValidator::validate_date_format(Some("1974-02-30")));
        assert!(!FormatValidator::validate_date_format(Some("740812")));
        assert!(!FormatValidator::validate_date_format(Some("1974-8-12")));
        assert!(!FormatValidator::validate_date_format(None));
    }
}
