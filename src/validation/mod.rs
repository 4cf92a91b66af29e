pub mod checksum;
pub mod format;
pub mod mrz;

pub use checksum::{char_value, compute_checksum, verify_checksum, WEIGHTS};
pub use format::{FormatValidator, StructureReport};
pub use mrz::{CheckFields, MrzValidator};
