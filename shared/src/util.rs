use chrono::NaiveDate;

/// Current local calendar date (service dates are local to the restaurant)
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
