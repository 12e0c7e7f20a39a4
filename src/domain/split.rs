use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Which side of the partition a view reads from.
///
/// Parsing is deliberately lenient: `"train"` selects the training
/// prefix and every other name selects the validation suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    #[default]
    Train,
    Validation,
}

impl Split {
    pub fn from_name(name: &str) -> Self {
        if name == "train" {
            Split::Train
        } else {
            Split::Validation
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train      => "train",
            Split::Validation => "validation",
        }
    }
}

impl FromStr for Split {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Split::from_name(s))
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
