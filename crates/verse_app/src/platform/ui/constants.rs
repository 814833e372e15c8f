pub const APP_TITLE: &str = "Daily Peace";
pub const APP_SUBTITLE: &str = "Find your moment of tranquility";
pub const LOADING_TEXT: &str = "Loading...";
pub const DATE_FORMAT: &str = "%A, %B %-d, %Y";

pub const RETRY_KEYS: [&str; 2] = ["r", "retry"];
pub const REFRESH_KEYS: [&str; 2] = ["f", "refresh"];
pub const QUIT_KEYS: [&str; 2] = ["q", "quit"];
