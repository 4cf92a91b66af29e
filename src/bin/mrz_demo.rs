use log::LevelFilter;
use passport_mrz::models::RawMrzFields;
use passport_mrz::utils::PassportError;
use passport_mrz::validation::{FormatValidator, MrzValidator};
use passport_mrz::PassportValidator;

// ICAO Doc 9303 TD3 specimen
const SPECIMEN: [&str; 2] = [
    "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
    "L898902C36UTO7408122F1204159ZE184226B<<<<<10",
];

fn specimen_fields() -> RawMrzFields {
    RawMrzFields {
        document_type: Some("P<".to_string()),
        country_code: Some("UTO".to_string()),
        passport_number: Some("L898902C3".to_string()),
        check_number: Some("6".to_string()),
        date_of_birth: Some("740812".to_string()),
        check_date_of_birth: Some("2".to_string()),
        expiration_date: Some("120415".to_string()),
        check_expiration_date: Some("9".to_string()),
        nationality: Some("UTO".to_string()),
        sex: Some("F".to_string()),
        given_names: Some("ANNA<MARIA".to_string()),
        surname: Some("ERIKSSON".to_string()),
        personal_number: Some("ZE184226B<<<<<".to_string()),
        check_personal_number: Some("1".to_string()),
        check_composite: Some("0".to_string()),
        mrz_type: Some("TD3".to_string()),
        valid_score: Some(100),
    }
}

fn main() -> Result<(), PassportError> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    println!("MRZ Validation Demo");
    println!("-------------------");

    let lines: Vec<String> = SPECIMEN.iter().map(|l| l.to_string()).collect();
    for line in &lines {
        println!("  {}", line);
    }

    println!("\nChecking MRZ structure...");
    let structure = FormatValidator::validate_mrz_structure(&lines);
    println!("  {} ({:?})", structure.message, structure.document_format);

    println!("Building record...");
    let record = PassportValidator::new().build_record(&specimen_fields(), &lines)?;

    println!("\nVALIDATION RESULT:");
    println!("  Document is {}", if record.is_valid() { "VALID" } else { "INVALID" });
    for issue in MrzValidator::issues(record.flags()) {
        println!("  - {}", issue.message);
    }
    if record.flags().valid_composite == Some(false) {
        println!("  Note: the composite digit is computed over the personal number with '<' filler removed,");
        println!("  so specimens with a padded personal number report a composite mismatch.");
    }
    println!("\n{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
