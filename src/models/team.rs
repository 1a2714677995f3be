//! Team record as kept in the `teams` table, and the insert payload.

use crate::models::player::Player;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned team identifier.
pub type TeamId = i64;

/// A persisted team. `players` order is meaningful (reordering is persisted).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub team_name: String,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Players field of an insert request: clients send either a list of players
/// or a single player object. Missing or `null` means no players.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayersField {
    List(Vec<Player>),
    One(Player),
}

impl PlayersField {
    pub fn into_vec(self) -> Vec<Player> {
        match self {
            PlayersField::List(players) => players,
            PlayersField::One(player) => vec![player],
        }
    }
}

/// Row to insert into `teams` (id and `created_at` are assigned by the store).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTeam {
    pub team_name: String,
    #[serde(default, deserialize_with = "players_or_null")]
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl NewTeam {
    pub fn new(team_name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            team_name: team_name.into(),
            players,
            email: None,
        }
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }
}

fn players_or_null<'de, D>(deserializer: D) -> Result<Vec<Player>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let field: Option<PlayersField> = Option::deserialize(deserializer)?;
    Ok(field.map(PlayersField::into_vec).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_accepts_list_object_or_null() {
        let list: NewTeam = serde_json::from_str(
            r#"{"team_name":"Hawks","players":[{"id":"1","name":"Alice"},{"id":"2","name":"Bo"}]}"#,
        )
        .unwrap();
        assert_eq!(list.players.len(), 2);

        let one: NewTeam =
            serde_json::from_str(r#"{"team_name":"Hawks","players":{"id":"1","name":"Alice"}}"#).unwrap();
        assert_eq!(one.players, vec![Player::with_id("1", "Alice")]);

        let null: NewTeam = serde_json::from_str(r#"{"team_name":"Hawks","players":null}"#).unwrap();
        assert!(null.players.is_empty());

        let missing: NewTeam = serde_json::from_str(r#"{"team_name":"Hawks","email":"c@x.io"}"#).unwrap();
        assert!(missing.players.is_empty());
        assert_eq!(missing.email.as_deref(), Some("c@x.io"));
    }
}
