//! Data records for tournaments and everything they own: phases, pools, teams, games, people.

mod game;
mod player;
mod pool;
mod referee;
mod team;
mod tournament;

pub use game::{Game, GameId, GamePatch, NewGame};
pub use player::{NewPlayer, Player, PlayerId, PlayerPatch};
pub use pool::{
    Category, CategoryId, CategoryPatch, NewCategory, NewPhase, NewPool, Phase, PhaseId, PhasePatch, Pool,
    PoolId, PoolPatch, DEFAULT_GAME_DURATION,
};
pub use referee::{Account, AccountId, NewReferee, Referee, RefereeId, RefereePatch};
pub use team::{LockerRoom, LockerRoomId, LockerRoomPatch, NewLockerRoom, NewTeam, Team, TeamId, TeamPatch};
pub use tournament::{NewTournament, PointConfig, Tournament, TournamentId, TournamentPatch, DEFAULT_BREAK_TIME};
