#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Labels handed out to jump targets, in order.
    pub jump_labels: Vec<char>,
    /// Match the jump search character regardless of case.
    pub jump_ignore_case: bool,
    /// Copy writes to the unnamed register to an attached clipboard.
    pub mirror_unnamed_register: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            jump_labels: ('A'..='Z').collect(),
            jump_ignore_case: true,
            mirror_unnamed_register: true,
        }
    }
}
