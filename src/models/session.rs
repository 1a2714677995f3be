//! Identity provider session object.

use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the identity provider.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// `{ user: { name, email, image } }`. Absent (`None`) when signed out.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: SessionUser,
}

impl AuthSession {
    /// Key the viewer's workspace is stored under: email, falling back to name.
    pub fn viewer_key(&self) -> Option<String> {
        self.user
            .email
            .as_deref()
            .or(self.user.name.as_deref())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_lowercase)
    }
}
