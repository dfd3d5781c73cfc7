//! Operations beyond plain CRUD: pool game generation, scheduling, authentication.

pub mod auth;
mod pool_games;
mod schedule;

pub use auth::{AuthError, SessionUser, Sessions};
pub use pool_games::generate_pool_games;
pub use schedule::{generate_schedule, schedule_view, Schedule, ScheduledGame, ScheduledTeam};
