pub mod compute;
pub mod date_value;
pub mod error;


pub use compute::{age_in_years, days_between, weekday_of};
pub use date_value::{DateValue, parse_date, parse_iso_date};
pub use error::{DateMathError, DateMathResult};
