use serde::{Deserialize, Serialize};

/// A fully validated user held in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique key, 1000..=9999
    pub id: u16,
    pub login: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    pub credit_card: String,
    pub phone: String,
}

/// Flat shape of a user as written to the registry file.
///
/// Every field is stored in plain text, passwords and card numbers included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserRecord {
    pub id: u16,
    pub login: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    pub credit_card: String,
    pub phone: String,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            password: user.password.clone(),
            confirm_password: user.confirm_password.clone(),
            email: user.email.clone(),
            credit_card: user.credit_card.clone(),
            phone: user.phone.clone(),
        }
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            login: record.login,
            password: record.password,
            confirm_password: record.confirm_password,
            email: record.email,
            credit_card: record.credit_card,
            phone: record.phone,
        }
    }
}
