use chrono::NaiveDate;

/// Values accepted as invoice dates.
///
/// Calendar dates are formatted as "YYYY-MM-DD"; strings pass through
/// unchanged and are checked by the server.
pub trait IntoDateString {
    fn into_date_string(self) -> String;
}

impl IntoDateString for NaiveDate {
    fn into_date_string(self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl IntoDateString for &NaiveDate {
    fn into_date_string(self) -> String {
        (*self).into_date_string()
    }
}

impl IntoDateString for &str {
    fn into_date_string(self) -> String {
        self.to_string()
    }
}

impl IntoDateString for String {
    fn into_date_string(self) -> String {
        self
    }
}

impl IntoDateString for &String {
    fn into_date_string(self) -> String {
        self.clone()
    }
}
