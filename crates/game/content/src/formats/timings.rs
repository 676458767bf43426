/// Animation pacing in whole milliseconds.
///
/// Every field is optional in the file; missing values fall back to
/// [`TimingsFile::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingsFile {
    pub step_ms: u64,
    pub corridor_pause_ms: u64,
    pub hurt_delay_ms: u64,
    pub blink_ms: u64,
    pub inter_step_pause_ms: u64,
    pub inter_round_pause_ms: u64,
    pub step_timeout_ms: Option<u64>,
}

impl Default for TimingsFile {
    fn default() -> Self {
        Self {
            step_ms: 400,
            corridor_pause_ms: 300,
            hurt_delay_ms: 200,
            blink_ms: 400,
            inter_step_pause_ms: 300,
            inter_round_pause_ms: 500,
            step_timeout_ms: None,
        }
    }
}
