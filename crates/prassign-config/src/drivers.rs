use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("Invalid driver kind: {kind}")]
    InvalidDriverKind { kind: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseDriver {
    Memory,
    Postgres,
}

impl DatabaseDriver {
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "pg",
        }
    }
}

impl fmt::Display for DatabaseDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for DatabaseDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "memory" => Ok(Self::Memory),
            "pg" | "postgres" => Ok(Self::Postgres),
            _ => Err(DriverError::InvalidDriverKind { kind: s.into() }),
        }
    }
}
