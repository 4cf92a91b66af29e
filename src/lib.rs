pub mod models;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod passport_validator;

pub use passport_validator::{
    build_record, Detection, MrzDetector, MrzParser, PassportService, PassportValidator,
};
