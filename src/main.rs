// Passport MRZ validation command line

use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

use passport_mrz::{
    models::{PassportRecord, RawMrzFields, ValidationIssueType, ValidationRequest},
    utils::{Clock, FixedClock, PassportError, SystemClock},
    validation::{compute_checksum, verify_checksum, FormatValidator, MrzValidator},
    PassportValidator,
};

#[derive(Parser)]
#[command(name = "passport-mrz", about = "Validate passport MRZ fields and check digits")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a validated record from MRZ lines and parsed fields (JSON)
    Validate {
        /// JSON file with `mrz_texts` and `fields`, or `-` for stdin
        #[arg(short, long)]
        input: PathBuf,
        /// Resolve dates as if today were this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_today)]
        today: Option<NaiveDate>,
        /// Pretty-print the JSON record
        #[arg(long)]
        pretty: bool,
        /// Print the human-readable report instead of JSON
        #[arg(long)]
        report: bool,
    },
    /// Compute the ICAO check digit of a field
    Checksum {
        field: String,
        /// Verify against this check digit
        #[arg(short, long)]
        digit: Option<String>,
    },
    /// Check the line structure of the MRZ in a request file
    Structure {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", value, e))
}

fn read_request(path: &PathBuf) -> Result<ValidationRequest, PassportError> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

fn status(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "PASSED",
        Some(false) => "FAILED",
        None => "NOT EVALUATED",
    }
}

// Function to print a detailed validation report
fn print_detailed_report(record: &PassportRecord) {
    let show = |value: Option<&str>| value.unwrap_or("-").to_string();

    println!("\n===============================================");
    println!("      PASSPORT MRZ VALIDATION REPORT");
    println!("===============================================\n");

    println!("PASSPORT INFORMATION:");
    println!("  Document Type: {}", show(record.document_type()));
    println!("  Issuing Country: {}", show(record.country_code()));
    println!("  Document Number: {}", show(record.passport_number()));
    println!("  Surname: {}", show(record.surname()));
    println!("  Given Names: {}", show(record.given_names()));
    println!("  Nationality: {}", show(record.nationality()));
    println!("  Date of Birth: {}", show(record.date_of_birth()));
    println!("  Sex: {}", show(record.sex()));
    println!("  Date of Expiry: {}", show(record.expiration_date()));
    println!("  Personal Number: {}", show(record.personal_number()));

    let flags = record.flags();
    println!("\nCHECK DIGITS:");
    println!("  1. Document Number: {}", status(flags.valid_number));
    println!("  2. Date of Birth: {}", status(flags.valid_date_of_birth));
    println!("  3. Date of Expiry: {}", status(flags.valid_expiration_date));
    println!("  4. Personal Number: {}", status(flags.valid_personal_number));
    println!("  5. Composite: {}", status(flags.valid_composite));

    let structure = FormatValidator::validate_mrz_structure(record.mrz_texts());
    let mut issues = MrzValidator::issues(flags);
    issues.extend(structure.issues);
    if !issues.is_empty() {
        println!("\nISSUES FOUND:");
        for issue in &issues {
            let kind = match issue.issue_type {
                ValidationIssueType::Mrz => "MRZ",
                ValidationIssueType::Format => "FORMAT",
            };
            println!("  - [{}] {}", kind, issue.message);
        }
    }

    println!(
        "\nPassport validation result: {}",
        if record.is_valid() { "VALID" } else { "INVALID" }
    );
}

fn validate<C: Clock>(
    validator: &PassportValidator<C>,
    request: &ValidationRequest,
) -> Result<PassportRecord, PassportError> {
    let (fields, ignored) = RawMrzFields::from_json_map(&request.fields);
    if !ignored.is_empty() {
        info!("Ignored {} unrecognized field(s)", ignored.len());
    }
    validator.build_record(&fields, &request.flat_lines())
}

fn run(cli: Cli) -> Result<(), PassportError> {
    match cli.command {
        Command::Validate {
            input,
            today,
            pretty,
            report,
        } => {
            let request = read_request(&input)?;
            let record = match today {
                Some(date) => validate(&PassportValidator::with_clock(FixedClock(date)), &request)?,
                None => validate(&PassportValidator::with_clock(SystemClock), &request)?,
            };

            if report {
                print_detailed_report(&record);
            } else if pretty {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{}", serde_json::to_string(&record)?);
            }
        }
        Command::Checksum { field, digit } => {
            println!("{}", compute_checksum(&field));
            if let Some(digit) = digit {
                let ok = verify_checksum(Some(field.as_str()), Some(digit.as_str()));
                println!("{}", if ok { "PASSED" } else { "FAILED" });
            }
        }
        Command::Structure { input } => {
            let request = read_request(&input)?;
            let structure = FormatValidator::validate_mrz_structure(&request.flat_lines());
            println!("{}", structure.message);
            if let Some(format) = structure.document_format {
                println!("Format: {:?}", format);
            }
            for issue in &structure.issues {
                println!("  - {}", issue.message);
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), PassportError> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    run(cli)
}
