use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Who initiated the renewal of a user plan: the user, the automated
/// renewal task, or some other external mechanism.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenewalTriggeredBy {
    Other,
    #[default]
    User,
    Task,
}

impl RenewalTriggeredBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenewalTriggeredBy::Other => "other",
            RenewalTriggeredBy::User => "user",
            RenewalTriggeredBy::Task => "task",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "other" => Some(RenewalTriggeredBy::Other),
            "user" => Some(RenewalTriggeredBy::User),
            "task" => Some(RenewalTriggeredBy::Task),
            _ => None,
        }
    }
}

impl Display for RenewalTriggeredBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
