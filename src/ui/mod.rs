//! Terminal UI: the board under a movable cursor, both players' words and
//! the turn status, driven through a `GameSession`.

mod app;
pub mod board_widget;
mod game_view;
pub mod messages;
pub mod palette;

pub use app::App;
