//! Application logic: rotation controller, roster editor, team gallery, views.

mod clock;
mod gallery;
mod roster;
pub mod rotation;
pub mod view;
mod workspace;

pub use clock::RotationClock;
pub use gallery::{parse_player_list, random_card_color, TeamCard, TeamGallery, CARD_COLORS};
pub use roster::{RosterEditor, RosterError};
pub use view::{resolve_screen, RosterView, Screen, ViewModel};
pub use workspace::{Workspace, WorkspaceError};
