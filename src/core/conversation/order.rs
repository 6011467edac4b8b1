use std::fmt;
use std::str::FromStr;

/// Where assistant replies land when several requests overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyOrder {
    /// Append each reply as soon as it arrives.
    #[default]
    Arrival,
    /// Hold early replies until every earlier request has resolved.
    Submission,
}

impl FromStr for ReplyOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrival" => Ok(ReplyOrder::Arrival),
            "submission" => Ok(ReplyOrder::Submission),
            other => Err(format!(
                "unknown reply order {:?} (expected arrival or submission)",
                other
            )),
        }
    }
}

impl fmt::Display for ReplyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyOrder::Arrival => write!(f, "arrival"),
            ReplyOrder::Submission => write!(f, "submission"),
        }
    }
}
