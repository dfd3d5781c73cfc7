//! Tournament organizer: REST API for tournaments, pools, teams and games, with standings.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod standings;
pub mod store;

pub use config::Config;
pub use models::{Game, PointConfig, Team, TeamId, Tournament, TournamentId};
pub use standings::{compute, group_into_clubs, rank, strip_age_category, Cascade, StandingsRow, View};
pub use store::{Store, StoreError};
