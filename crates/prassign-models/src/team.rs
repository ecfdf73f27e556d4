use serde::{Deserialize, Serialize};

use crate::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl From<User> for TeamMember {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub team_name: String,
    pub members: Vec<TeamMember>,
}

impl Team {
    /// Members converted to users scoped to this team.
    pub fn users(&self) -> Vec<User> {
        self.members
            .iter()
            .cloned()
            .map(|m| User::from_member(&self.team_name, m))
            .collect()
    }
}
