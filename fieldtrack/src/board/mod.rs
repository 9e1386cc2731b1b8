//! Team Board - live last-known position of every team.
//!
//! Polls `GET {endpoint}/api/tracks_latest.php` and keeps one entry per team
//! that is moved in place on every refresh.
//!
//! ```ignore
//! let client = LatestTracksClient::new(transport, &endpoint);
//! let board = Arc::new(TeamBoard::new());
//! let handle = spawn_board_refresher(client, board.clone(), DEFAULT_REFRESH_INTERVAL, token);
//! ```

mod error;
mod feed;
mod refresher;
mod team_board;

pub use error::BoardError;
pub use feed::{parse_latest_tracks, LatestTracksClient, TeamPosition};
pub use refresher::{refresh, spawn_board_refresher, BoardConfig, DEFAULT_REFRESH_INTERVAL};
pub use team_board::{ApplySummary, TeamBoard};
