/// Default message template for a birthday without a present note
pub const DEFAULT_PLAIN_TEMPLATE: &str = "{day}.{month} {dow} - {name}";

/// Default message template for a birthday with a present note
pub const DEFAULT_PRESENT_TEMPLATE: &str = "{day}.{month} {dow} - {name}, {present} maybe?";

/// Config file name, resolved relative to the user's home directory
pub const DEFAULT_CONFIG_FILENAME: &str = ".bdaybot_config";

/// Spreadsheet column holding the date of birth (day.month.year)
pub const COLUMN_DOB: &str = "DOB";

/// Spreadsheet column holding the person's name
pub const COLUMN_NAME: &str = "Who";

/// Spreadsheet column holding the present note (may be empty)
pub const COLUMN_PRESENT: &str = "Present";

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "bdaybot_rs=info";
