use std::fmt;

use serde::Serialize;

/// The four sequential stages a construction bar is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Contract,
    Preparation,
    Construction,
    Completion,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Self::Contract,
        Self::Preparation,
        Self::Construction,
        Self::Completion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Preparation => "preparation",
            Self::Construction => "construction",
            Self::Completion => "completion",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
