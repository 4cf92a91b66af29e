pub mod dates;
pub mod normalize;

pub use dates::{resolve_date, resolve_date_with, MAX_AGE_YEARS};
pub use normalize::{normalize_field, NormalizedFields, FILLER};
