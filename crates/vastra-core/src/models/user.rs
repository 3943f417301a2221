use serde::{Deserialize, Serialize};

/// A signed-in shopper profile. At most one of these exists at a time and
/// it is never checked against any external identity authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}
