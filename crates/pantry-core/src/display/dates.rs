//! Human-readable date headings.

use std::fmt;

use jiff::civil::Date;

/// Renders a calendar date as a heading, e.g. `Thu Mar 14, 2024`.
pub struct DayHeading(pub Date);

impl fmt::Display for DayHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%a %b %-d, %Y"))
    }
}
