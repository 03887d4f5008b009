//! tally-core: transaction model, keyword vocabularies and time helpers

pub mod time;
pub mod transaction;
pub mod vocabulary;

pub use time::{localize, parse_local_datetime, parse_timezone, period_name};
pub use transaction::{ParsedTransaction, TransactionType};
pub use vocabulary::{
    CategoryKeywordTable, CategoryKeywords, ClockTime, DayOffset, RelativeDateTable,
    TimeOfDayTable, Vocabulary, OTHER_CATEGORY,
};
