pub mod clock;
pub mod error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{PassportError, NOT_A_PASSPORT_MRZ};
