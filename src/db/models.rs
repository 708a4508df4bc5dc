use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Which side of the marketplace a signup is interested in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Buyer,
    Seller,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Buyer => "buyer",
            UserType::Seller => "seller",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(UserType::Buyer),
            "seller" => Ok(UserType::Seller),
            other => Err(AppError::Internal(format!("Unknown user type: {}", other))),
        }
    }
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, alias = "userType")]
    pub user_type: UserType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reason: String,
}

/// The page sends `null` for an untouched optional field.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SignupDraft {
    /// Converts validated input into an insertable entry. An empty reason
    /// becomes `None`.
    pub fn to_new_signup(&self) -> NewSignup {
        NewSignup {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            user_type: self.user_type,
            reason: if self.reason.is_empty() {
                None
            } else {
                Some(self.reason.clone())
            },
        }
    }
}

/// Client-supplied part of a waitlist entry. `id` and `timestamp` are never
/// part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSignup {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    pub reason: Option<String>,
}

/// A stored waitlist entry. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupEntry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Row shape of the `waitlist` table.
#[derive(Debug, Clone, FromRow)]
pub struct SignupRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: String,
    pub reason: Option<String>,
    pub timestamp: i64, // Unix millis
}

impl TryFrom<SignupRow> for SignupEntry {
    type Error = AppError;

    fn try_from(row: SignupRow) -> Result<Self, Self::Error> {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(row.timestamp).ok_or_else(|| {
            AppError::Internal(format!("Invalid stored timestamp: {}", row.timestamp))
        })?;

        Ok(SignupEntry {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            user_type: row.user_type.parse()?,
            reason: row.reason,
            timestamp,
        })
    }
}
