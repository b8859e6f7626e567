use chrono::NaiveDate;

/// Parses the form's `MM/DD/YYYY` date text.
///
/// Anything that is not a real calendar date yields `None`; this field is
/// best-effort and never fails a submission.
pub fn parse_todays_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    let mut parts = raw.split('/').map(str::trim);
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    if year <= 0 {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}
