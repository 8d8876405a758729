use derive_getters::Getters;
use rmcp::schemars;
use serde::Deserialize;

/// Lines returned when the request does not say
pub const DEFAULT_LINES: usize = 100;
pub const MIN_LINES: usize = 1;
pub const MAX_LINES: usize = 1000;

/// Request to read the end of the debug log
#[derive(Debug, Default, Deserialize, schemars::JsonSchema, Getters)]
pub struct ReadLogRequest {
    /// Number of lines to read from the end of the file (default: 100, max: 1000)
    #[serde(default)]
    #[schemars(range(min = 1, max = 1000))]
    lines: Option<i64>,
}

impl ReadLogRequest {
    pub fn new(lines: Option<i64>) -> Self {
        Self { lines }
    }

    /// Requested line count, clamped to `[MIN_LINES, MAX_LINES]`
    pub fn line_count(&self) -> usize {
        match self.lines {
            None => DEFAULT_LINES,
            Some(n) => n.clamp(MIN_LINES as i64, MAX_LINES as i64) as usize,
        }
    }
}

/// Request to truncate the debug log
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ClearLogRequest {}

/// Request to describe the debug log file
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct LogInfoRequest {}
