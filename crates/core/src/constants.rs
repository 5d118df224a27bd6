/// Number of quarterly returns compounded into one annual return
pub const QUARTERS_PER_YEAR: usize = 4;

/// Calendar months that close a quarter
pub const QUARTER_END_MONTHS: [u32; 4] = [3, 6, 9, 12];

/// Calendar month that closes the year
pub const YEAR_END_MONTH: u32 = 12;

/// Date format used for canonical period keys
pub const PERIOD_KEY_FORMAT: &str = "%Y-%m-%d";
