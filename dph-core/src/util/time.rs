use time::{format_description::FormatItem, macros::format_description, Date, PrimitiveDateTime};

pub use time::error::Format as FormatError;

const CAPTURE_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

const BACKUP_TIMESTAMP: &[FormatItem<'static>] =
    format_description!("[year][month][day]-[hour][minute][second]");

/// The name of the directory that holds the raw captures of one day,
/// e.g. `2025-08-10`.
pub fn capture_date(date: Date) -> Result<String, FormatError> {
    date.format(CAPTURE_DATE)
}

/// The suffix that distinguishes the backups of the
/// canonical collection, e.g. `20250810-142301`.
pub fn backup_suffix(datetime: PrimitiveDateTime) -> Result<String, FormatError> {
    datetime.format(BACKUP_TIMESTAMP)
}
