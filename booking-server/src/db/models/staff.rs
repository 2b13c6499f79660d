//! Staff model — admin surface accounts with hashed PINs

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub const TABLE: &str = "staff";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(skip_serializing)]
    pub hashed_pin: String,
    /// Permission strings, e.g. "bookings:manage" or "all"
    pub permissions: Vec<String>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCreate {
    pub name: String,
    pub pin: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Staff {
    /// Verify PIN using argon2
    pub fn verify_pin(&self, pin: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hashed_pin)?;
        Ok(Argon2::default()
            .verify_password(pin.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash PIN using argon2
    pub fn hash_pin(pin: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2.hash_password(pin.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_hash_roundtrip() {
        let hash = Staff::hash_pin("1234").unwrap();
        let staff = Staff {
            id: None,
            name: "Ana".into(),
            hashed_pin: hash,
            permissions: vec!["all".into()],
            is_active: true,
            created_at: 0,
        };
        assert!(staff.verify_pin("1234").unwrap());
        assert!(!staff.verify_pin("9999").unwrap());
    }
}
