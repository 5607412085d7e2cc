use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub name: String,
    pub email: String,
    pub password_hash: String,

    // operator authority flag
    #[serde(default)]
    pub is_admin: bool,
}

/// Verified actor identity injected into request extensions by the auth
/// middleware. `is_admin` is the operator-authority flag.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for CurrentUser {
    fn from(u: User) -> Self {
        CurrentUser {
            id: u.id,
            name: u.name,
            email: u.email,
            is_admin: u.is_admin,
        }
    }
}
