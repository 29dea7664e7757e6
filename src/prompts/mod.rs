pub mod analysis;

pub use analysis::{ANALYSIS_SYSTEM_PROMPT, PROBE_USER_MESSAGE};
