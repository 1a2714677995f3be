//! Top-level view: which screen to show for the current session and selection.

use crate::logic::gallery::TeamCard;
use crate::models::{AuthSession, RotationPhase, RotationState, SessionUser, Team, TeamId};
use serde::Serialize;

pub const APP_TITLE: &str = "Basketball Substitutions";

/// Identity providers offered on the sign-in screen.
pub const SIGN_IN_PROVIDERS: [&str; 2] = ["google", "github"];

pub const LIGHTNING_LOGO: &str = "/static/lightning-hoops.jpg";
pub const DEFAULT_TEAM_LOGO: &str = "/static/aztecs.jpg";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    SignIn,
    Gallery,
    Roster,
}

/// No session: sign in. Session without a team: gallery. Otherwise roster.
pub fn resolve_screen(session: Option<&AuthSession>, selected: Option<&Team>) -> Screen {
    match (session, selected) {
        (None, _) => Screen::SignIn,
        (Some(_), None) => Screen::Gallery,
        (Some(_), Some(_)) => Screen::Roster,
    }
}

/// Header line, e.g. "Basketball Substitutions - Teams".
pub fn header_title(screen: Screen) -> String {
    match screen {
        Screen::SignIn => APP_TITLE.to_string(),
        Screen::Gallery => format!("{} - Teams", APP_TITLE),
        Screen::Roster => format!("{} - Players", APP_TITLE),
    }
}

/// Header image: the user's avatar on the gallery, a team logo on a roster.
pub fn header_logo(session: &AuthSession, selected: Option<&Team>) -> Option<String> {
    match selected {
        None => session.user.image.clone(),
        Some(team) if team.team_name.to_lowercase().contains("lightning") => {
            Some(LIGHTNING_LOGO.to_string())
        }
        Some(_) => Some(DEFAULT_TEAM_LOGO.to_string()),
    }
}

/// One roster line: the player plus rotation markers.
#[derive(Clone, Debug, Serialize)]
pub struct PlayerRow {
    pub id: String,
    pub name: String,
    /// Flagged to sit out in the current batch.
    pub chosen: bool,
    /// Shown next to the name when above zero.
    pub sub_count: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct RosterView {
    pub team_id: TeamId,
    pub team_name: String,
    pub players: Vec<PlayerRow>,
    pub countdown: u32,
    pub phase: RotationPhase,
}

impl RosterView {
    pub fn new(team: &Team, rotation: &RotationState) -> Self {
        Self {
            team_id: team.id,
            team_name: team.team_name.clone(),
            players: team
                .players
                .iter()
                .map(|p| PlayerRow {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    chosen: rotation.is_chosen(&p.id),
                    sub_count: rotation.count_for(&p.id),
                })
                .collect(),
            countdown: rotation.countdown,
            phase: rotation.phase,
        }
    }
}

/// Everything the page needs to render the current screen.
#[derive(Clone, Debug, Serialize)]
pub struct ViewModel {
    pub screen: Screen,
    pub title: String,
    pub logo: Option<String>,
    pub user: Option<SessionUser>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<TeamCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster: Option<RosterView>,
}

impl ViewModel {
    pub fn sign_in() -> Self {
        Self {
            screen: Screen::SignIn,
            title: header_title(Screen::SignIn),
            logo: None,
            user: None,
            providers: SIGN_IN_PROVIDERS.to_vec(),
            teams: Vec::new(),
            roster: None,
        }
    }

    /// Gallery or roster screen for a signed-in user.
    pub fn signed_in(
        session: &AuthSession,
        cards: Vec<TeamCard>,
        selected: Option<&Team>,
        rotation: &RotationState,
    ) -> Self {
        let screen = resolve_screen(Some(session), selected);
        Self {
            screen,
            title: header_title(screen),
            logo: header_logo(session, selected),
            user: Some(session.user.clone()),
            providers: Vec::new(),
            teams: if selected.is_none() { cards } else { Vec::new() },
            roster: selected.map(|team| RosterView::new(team, rotation)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Player;
    use chrono::Utc;

    fn team(name: &str) -> Team {
        Team {
            id: 1,
            team_name: name.to_string(),
            players: Vec::new(),
            logo: None,
            email: None,
            created_at: Utc::now(),
        }
    }

    fn session() -> AuthSession {
        AuthSession {
            user: SessionUser {
                name: Some("Coach".into()),
                email: Some("coach@example.com".into()),
                image: Some("https://avatars.example/coach.png".into()),
            },
        }
    }

    #[test]
    fn screen_branches_on_session_and_selection() {
        let s = session();
        let t = team("Hawks");
        assert_eq!(resolve_screen(None, Some(&t)), Screen::SignIn);
        assert_eq!(resolve_screen(Some(&s), None), Screen::Gallery);
        assert_eq!(resolve_screen(Some(&s), Some(&t)), Screen::Roster);
    }

    #[test]
    fn header_shows_avatar_or_team_logo() {
        let s = session();
        assert_eq!(header_logo(&s, None), s.user.image);
        assert_eq!(
            header_logo(&s, Some(&team("Lightning Hoops"))).as_deref(),
            Some(LIGHTNING_LOGO)
        );
        assert_eq!(header_logo(&s, Some(&team("Hawks"))).as_deref(), Some(DEFAULT_TEAM_LOGO));
        assert_eq!(header_title(Screen::Roster), "Basketball Substitutions - Players");
    }

    #[test]
    fn roster_view_marks_chosen_players_and_counts() {
        let mut t = team("Hawks");
        t.players = vec![Player::with_id("a", "Ann"), Player::with_id("b", "Bo")];
        let mut rotation = RotationState::default();
        rotation.chosen_players.insert("b".to_string());
        rotation.sub_count.insert("b".to_string(), 2);

        let view = ViewModel::signed_in(&session(), Vec::new(), Some(&t), &rotation);
        assert_eq!(view.screen, Screen::Roster);
        let rows = view.roster.unwrap().players;
        assert!(!rows[0].chosen);
        assert_eq!(rows[0].sub_count, 0);
        assert!(rows[1].chosen);
        assert_eq!(rows[1].sub_count, 2);
    }
}
