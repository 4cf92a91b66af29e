use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, info, warn};

use crate::models::*;
use crate::processing::{resolve_date_with, NormalizedFields};
use crate::utils::{Clock, PassportError, SystemClock};
use crate::validation::*;

/// Builds validated passport records from parser output and MRZ lines.
///
/// Holds no per-request state; one validator can serve any number of
/// concurrent requests.
pub struct PassportValidator<C: Clock = SystemClock> {
    clock: C,
    rules: CountryRules,
}

impl PassportValidator<SystemClock> {
    pub fn new() -> Self {
        PassportValidator::with_clock(SystemClock)
    }
}

impl Default for PassportValidator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> PassportValidator<C> {
    pub fn with_clock(clock: C) -> Self {
        PassportValidator {
            clock,
            rules: CountryRules::new(),
        }
    }

    /// Main entry point: normalize, resolve dates, verify check digits and
    /// assemble the record.
    ///
    /// Malformed dates and failed checks are recorded in the result rather
    /// than returned as errors. Anything that prevents building a record is
    /// reported as [`PassportError::UnparseableDocument`].
    pub fn build_record(
        &self,
        raw_fields: &RawMrzFields,
        raw_lines: &[String],
    ) -> Result<PassportRecord, PassportError> {
        if raw_lines.iter().all(|line| line.trim().is_empty()) {
            warn!("Rejected request without MRZ lines");
            return Err(PassportError::InvalidInput("no MRZ lines supplied".to_string()));
        }
        if raw_fields.is_empty() {
            warn!("Rejected request with an empty MRZ field map");
            return Err(PassportError::InvalidInput("MRZ field map is empty".to_string()));
        }
        if raw_fields.document_type.is_none() {
            warn!("Parser produced no document type for MRZ {:?}", raw_lines);
            return Err(PassportError::not_a_passport());
        }

        match panic::catch_unwind(AssertUnwindSafe(|| self.assemble(raw_fields, raw_lines))) {
            Ok(Ok(record)) => Ok(record),
            Ok(Err(err)) => {
                warn!("Could not build passport record: {}", err);
                Err(PassportError::not_a_passport())
            }
            Err(_) => {
                error!("Internal fault while building passport record");
                Err(PassportError::not_a_passport())
            }
        }
    }

    fn assemble(
        &self,
        raw: &RawMrzFields,
        raw_lines: &[String],
    ) -> Result<PassportRecord, PassportError> {
        let structure = FormatValidator::validate_mrz_structure(raw_lines);
        if !structure.is_valid {
            for issue in &structure.issues {
                warn!("MRZ structure: {}", issue.message);
            }
        }

        // Step 1: Normalize textual fields
        let normalized = NormalizedFields::from_raw(raw);
        if normalized.document_type.as_deref().map_or(true, str::is_empty) {
            return Err(PassportError::UnparseableDocument(
                "document type is blank".to_string(),
            ));
        }

        // Step 2: Resolve dates
        let date_of_birth = raw
            .date_of_birth
            .as_deref()
            .and_then(|d| resolve_date_with(d, DatePurpose::BirthDate, &self.clock));
        let expiration_date = raw
            .expiration_date
            .as_deref()
            .and_then(|d| resolve_date_with(d, DatePurpose::ExpirationDate, &self.clock));

        // Step 3: Country quirks
        let personal_number = self.rules.apply_personal_number(
            normalized.country_code.as_deref(),
            normalized.personal_number.clone(),
        );

        // Step 4: Check digits, over the raw six-digit dates
        let flags = MrzValidator::validate_fields(&CheckFields {
            passport_number: normalized.passport_number.as_deref(),
            check_number: raw.check_number.as_deref(),
            date_of_birth: raw.date_of_birth.as_deref(),
            check_date_of_birth: raw.check_date_of_birth.as_deref(),
            expiration_date: raw.expiration_date.as_deref(),
            check_expiration_date: raw.check_expiration_date.as_deref(),
            personal_number: personal_number.as_deref(),
            check_personal_number: raw.check_personal_number.as_deref(),
            check_composite: raw.check_composite.as_deref(),
        });
        for issue in MrzValidator::issues(&flags) {
            debug!("{}", issue.message);
        }

        // Step 5: Overall verdict
        let is_valid = MrzValidator::compute_overall_validity(&flags);
        info!(
            "Built record for document {:?} ({:?}): {}",
            normalized.passport_number,
            normalized.country_code,
            if is_valid { "VALID" } else { "INVALID" }
        );

        let parts = RecordParts {
            mrz_texts: raw_lines.to_vec(),
            mrz_type: raw.mrz_type.clone(),
            valid_score: raw.valid_score,
            document_type: normalized.document_type,
            country_code: normalized.country_code,
            passport_number: normalized.passport_number,
            date_of_birth,
            expiration_date,
            nationality: normalized.nationality,
            sex: normalized.sex,
            given_names: normalized.given_names,
            surname: normalized.surname,
            personal_number,
            check_digits: CheckDigits {
                document_number: raw.check_number.clone(),
                date_of_birth: raw.check_date_of_birth.clone(),
                expiration_date: raw.check_expiration_date.clone(),
                composite: raw.check_composite.clone(),
                personal_number: raw.check_personal_number.clone(),
            },
            flags,
        };

        Ok(PassportRecord::assemble(parts, is_valid))
    }
}

/// Build a record with an explicit clock.
pub fn build_record<C: Clock>(
    raw_fields: &RawMrzFields,
    raw_lines: &[String],
    clock: C,
) -> Result<PassportRecord, PassportError> {
    PassportValidator::with_clock(clock).build_record(raw_fields, raw_lines)
}

/// Output of an MRZ line detector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    pub mrz_texts: Vec<String>,
    pub msg: String,
}

/// Finds and reads the MRZ lines of a document image.
pub trait MrzDetector {
    fn detect(&self, image: &[u8]) -> Result<Detection, PassportError>;
}

/// Splits MRZ lines into named raw fields.
pub trait MrzParser {
    fn parse(&self, mrz_texts: &[String]) -> Result<RawMrzFields, PassportError>;
}

/// Runs detection, parsing and record building for one image.
pub struct PassportService<D, P, C: Clock = SystemClock> {
    detector: D,
    parser: P,
    validator: PassportValidator<C>,
}

impl<D: MrzDetector, P: MrzParser, C: Clock> PassportService<D, P, C> {
    pub fn new(detector: D, parser: P, validator: PassportValidator<C>) -> Self {
        PassportService {
            detector,
            parser,
            validator,
        }
    }

    pub fn process_passport(&self, image: &[u8]) -> Result<PassportRecord, PassportError> {
        let detection = self.detector.detect(image)?;
        info!("Detected MRZ lines: {:?}", detection.mrz_texts);

        if detection.mrz_texts.is_empty() {
            return Err(PassportError::MrzDetectionError(format!(
                "No MRZ lines detected. Msg: {}",
                detection.msg
            )));
        }

        let raw_fields = self.parser.parse(&detection.mrz_texts).map_err(|err| {
            error!("Parsing failed: {}", err);
            PassportError::not_a_passport()
        })?;

        self.validator.build_record(&raw_fields, &detection.mrz_texts)
    }
}
