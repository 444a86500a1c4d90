//! Normalization helpers shared by transformations and validation checks.

mod date;
mod numeric;
mod text;

pub use date::{format_date, parse_date};
pub use numeric::{MAX_DECIMAL_PLACES, format_fixed, is_numeric, parse_leading_float, parse_number};
pub use text::capitalize_words;
