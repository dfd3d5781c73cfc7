//! Integration tests for the store and the operations built on it:
//! scoped queries, cascading deletes, pool game generation, scheduling and authentication.

use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_api::logic::auth::{self, AuthError, SessionUser, Sessions};
use tournament_api::logic::{generate_pool_games, generate_schedule, schedule_view};
use tournament_api::models::{
    CategoryPatch, GamePatch, NewCategory, NewGame, NewPhase, NewPlayer, NewPool, NewReferee, NewTeam,
    NewTournament, PoolId, TeamId, TournamentId, TournamentPatch,
};
use tournament_api::store::{Entity, Store, StoreError};
use std::time::Duration;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 18)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn new_tournament(name: &str) -> NewTournament {
    NewTournament {
        name: name.to_string(),
        description: None,
        start_date: start(),
        location: "Stadium".to_string(),
        break_time: None,
        points_win: None,
        points_draw: None,
        points_loss: None,
        account_id: None,
    }
}

fn new_team(name: &str) -> NewTeam {
    NewTeam {
        name: name.to_string(),
        logo: None,
        category_id: None,
        paid: false,
    }
}

fn new_game(pool_id: PoolId, team1_id: TeamId, team2_id: TeamId) -> NewGame {
    NewGame {
        start_time: None,
        team1_id,
        team2_id,
        team1_score: None,
        team2_score: None,
        is_completed: false,
        referee_id: None,
        pool_id,
    }
}

fn new_referee(last_name: &str, tournament_id: TournamentId) -> NewReferee {
    NewReferee {
        last_name: last_name.to_string(),
        first_name: "Sam".to_string(),
        tournament_id,
        password: None,
    }
}

/// Tournament with one phase, one category "U10" and one pool in it holding `teams`.
struct Fixture {
    store: Store,
    tournament: TournamentId,
    pool: PoolId,
    teams: Vec<TeamId>,
}

fn fixture(team_names: &[&str]) -> Fixture {
    let mut store = Store::new();
    let tournament = store.create_tournament(new_tournament("Spring Cup")).unwrap().id;
    let phase = store
        .create_phase(tournament, NewPhase { name: "Groups".into() })
        .unwrap()
        .id;
    let category = store
        .create_category(
            tournament,
            NewCategory {
                name: "U10".into(),
                age_min: None,
                age_max: Some(10),
                description: None,
                game_duration: Some(12),
            },
        )
        .unwrap()
        .id;
    let pool = store
        .create_pool(
            tournament,
            NewPool {
                name: "Pool A".into(),
                phase_id: phase,
                category_id: Some(category),
            },
        )
        .unwrap()
        .id;
    let mut teams = Vec::new();
    for name in team_names {
        let id = store.create_team(tournament, new_team(name)).unwrap().id;
        store.add_team_to_pool(tournament, pool, id).unwrap();
        teams.push(id);
    }
    Fixture {
        store,
        tournament,
        pool,
        teams,
    }
}

#[test]
fn tournament_defaults_and_partial_update() {
    let mut store = Store::new();
    let t = store.create_tournament(new_tournament("Cup")).unwrap().clone();
    assert_eq!(t.id, 1);
    assert_eq!(t.break_time, 5);
    assert_eq!((t.points_win, t.points_draw, t.points_loss), (3, 1, 0));

    let patch = TournamentPatch {
        points_win: Some(2),
        ..TournamentPatch::default()
    };
    let updated = store.update_tournament(t.id, patch).unwrap();
    assert_eq!(updated.points_win, 2);
    assert_eq!(updated.name, "Cup");
    assert_eq!(updated.location, "Stadium");
}

#[test]
fn required_fields_are_checked() {
    let mut store = Store::new();
    let mut blank = new_tournament("  ");
    assert_eq!(
        store.create_tournament(blank.clone()).unwrap_err(),
        StoreError::Required("name")
    );
    blank.name = "Cup".into();
    blank.location = String::new();
    assert_eq!(
        store.create_tournament(blank).unwrap_err(),
        StoreError::Required("location")
    );
}

#[test]
fn ids_are_never_reused() {
    let mut store = Store::new();
    let first = store.create_tournament(new_tournament("One")).unwrap().id;
    store.delete_tournament(first).unwrap();
    let second = store.create_tournament(new_tournament("Two")).unwrap().id;
    assert!(second > first);
}

#[test]
fn pool_references_must_belong_to_the_tournament() {
    let mut f = fixture(&[]);
    let other = f.store.create_tournament(new_tournament("Other")).unwrap().id;
    let foreign_phase = f
        .store
        .create_phase(other, NewPhase { name: "Finals".into() })
        .unwrap()
        .id;
    let err = f
        .store
        .create_pool(
            f.tournament,
            NewPool {
                name: "Pool B".into(),
                phase_id: foreign_phase,
                category_id: None,
            },
        )
        .unwrap_err();
    assert_eq!(err, StoreError::InvalidReference(Entity::Phase));

    let foreign_team = f.store.create_team(other, new_team("Visitors")).unwrap().id;
    assert_eq!(
        f.store.add_team_to_pool(f.tournament, f.pool, foreign_team),
        Err(StoreError::InvalidReference(Entity::Team))
    );
}

#[test]
fn pool_membership_is_a_set() {
    let mut f = fixture(&["Falcons U10"]);
    let team = f.teams[0];
    assert!(matches!(
        f.store.add_team_to_pool(f.tournament, f.pool, team),
        Err(StoreError::Rejected(_))
    ));
    f.store.remove_team_from_pool(f.tournament, f.pool, team).unwrap();
    assert_eq!(
        f.store.remove_team_from_pool(f.tournament, f.pool, team),
        Err(StoreError::NotFound(Entity::PoolMembership))
    );
    assert!(f.store.teams_in_pool(f.tournament, f.pool).is_empty());
}

#[test]
fn games_take_their_tournament_from_the_pool() {
    let mut f = fixture(&["A", "B"]);
    let game = f
        .store
        .create_game(new_game(f.pool, f.teams[0], f.teams[1]))
        .unwrap();
    assert_eq!(game.tournament_id, f.tournament);
    assert!(!game.is_completed);

    assert_eq!(
        f.store.create_game(new_game(999, f.teams[0], f.teams[1])).unwrap_err(),
        StoreError::InvalidReference(Entity::Pool)
    );
    assert_eq!(
        f.store.create_game(new_game(f.pool, f.teams[0], 999)).unwrap_err(),
        StoreError::InvalidReference(Entity::Team)
    );
    assert!(matches!(
        f.store.create_game(new_game(f.pool, f.teams[0], f.teams[0])),
        Err(StoreError::Rejected(_))
    ));
}

#[test]
fn entering_a_score_feeds_the_pool_snapshot() {
    let mut f = fixture(&["A", "B"]);
    let id = f
        .store
        .create_game(new_game(f.pool, f.teams[0], f.teams[1]))
        .unwrap()
        .id;
    let patch = GamePatch {
        team1_score: Some(2),
        team2_score: Some(1),
        is_completed: Some(true),
        ..GamePatch::default()
    };
    f.store.update_game(id, patch).unwrap();

    let snapshot = f.store.pool_snapshot(f.tournament, f.pool).unwrap();
    assert_eq!(snapshot.teams.len(), 2);
    assert_eq!(snapshot.games.len(), 1);
    assert!(snapshot.games[0].is_completed);
    assert_eq!(snapshot.points.win, 3);

    assert_eq!(
        f.store.pool_snapshot(f.tournament + 1, f.pool).unwrap_err(),
        StoreError::NotFound(Entity::Tournament)
    );
}

#[test]
fn category_snapshot_only_sees_its_pools() {
    let mut f = fixture(&["A", "B"]);
    let category = f.store.categories_of(f.tournament)[0].id;
    for &team in &f.teams {
        let patch = tournament_api::models::TeamPatch {
            category_id: Some(category),
            ..Default::default()
        };
        f.store.update_team(f.tournament, team, patch).unwrap();
    }
    let phase = f.store.phases_of(f.tournament)[0].id;
    let loose_pool = f
        .store
        .create_pool(
            f.tournament,
            NewPool {
                name: "Friendly".into(),
                phase_id: phase,
                category_id: None,
            },
        )
        .unwrap()
        .id;
    f.store
        .create_game(new_game(f.pool, f.teams[0], f.teams[1]))
        .unwrap();
    f.store
        .create_game(new_game(loose_pool, f.teams[1], f.teams[0]))
        .unwrap();

    let snapshot = f.store.category_snapshot(f.tournament, category).unwrap();
    assert_eq!(snapshot.teams.len(), 2);
    assert_eq!(snapshot.games.len(), 1);
    assert_eq!(snapshot.games[0].pool_id, f.pool);
}

#[test]
fn deleting_a_team_removes_its_games_roster_and_membership() {
    let mut f = fixture(&["A", "B", "C"]);
    f.store
        .create_game(new_game(f.pool, f.teams[0], f.teams[1]))
        .unwrap();
    f.store
        .create_game(new_game(f.pool, f.teams[1], f.teams[2]))
        .unwrap();
    f.store
        .create_player(
            f.teams[0],
            NewPlayer {
                first_name: "Ana".into(),
                last_name: "Silva".into(),
                number: Some(7),
                position: None,
            },
        )
        .unwrap();

    f.store.delete_team(f.tournament, f.teams[0]).unwrap();
    assert_eq!(f.store.games_of_pool(f.pool).unwrap().len(), 1);
    assert!(f.store.players_of(f.teams[0]).is_empty());
    assert_eq!(f.store.teams_in_pool(f.tournament, f.pool).len(), 2);
}

#[test]
fn deleting_a_tournament_cascades() {
    let mut f = fixture(&["A", "B"]);
    f.store
        .create_referee(new_referee("Martin", f.tournament), None)
        .unwrap();
    f.store
        .create_game(new_game(f.pool, f.teams[0], f.teams[1]))
        .unwrap();

    f.store.delete_tournament(f.tournament).unwrap();
    assert!(f.store.games().is_empty());
    assert!(f.store.referees().is_empty());
    assert!(f.store.teams_of(f.tournament).is_empty());
    assert_eq!(
        f.store.pool(f.pool).unwrap_err(),
        StoreError::NotFound(Entity::Pool)
    );
}

#[test]
fn deleting_a_referee_unassigns_its_games() {
    let mut f = fixture(&["A", "B"]);
    let referee = f
        .store
        .create_referee(new_referee("Martin", f.tournament), None)
        .unwrap()
        .id;
    let mut game = new_game(f.pool, f.teams[0], f.teams[1]);
    game.referee_id = Some(referee);
    let game = f.store.create_game(game).unwrap().id;

    f.store.delete_referee(referee).unwrap();
    assert_eq!(f.store.game(game).unwrap().referee_id, None);
}

#[test]
fn players_are_listed_by_number() {
    let mut f = fixture(&["A"]);
    for (name, number) in [("Cara", Some(9)), ("Noor", None), ("Ines", Some(4))] {
        f.store
            .create_player(
                f.teams[0],
                NewPlayer {
                    first_name: name.into(),
                    last_name: "Doe".into(),
                    number,
                    position: None,
                },
            )
            .unwrap();
    }
    let names: Vec<&str> = f
        .store
        .players_of(f.teams[0])
        .iter()
        .map(|p| p.first_name.as_str())
        .collect();
    assert_eq!(names, vec!["Ines", "Cara", "Noor"]);
}

#[test]
fn round_robin_covers_every_pair_once() {
    let mut f = fixture(&["A", "B", "C", "D"]);
    let referee = f
        .store
        .create_referee(new_referee("Martin", f.tournament), None)
        .unwrap()
        .id;
    f.store
        .create_game(new_game(f.pool, f.teams[1], f.teams[0]))
        .unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let created = generate_pool_games(&mut f.store, f.pool, &mut rng).unwrap();
    // 4 teams -> 6 pairs, one already played
    assert_eq!(created.len(), 5);
    assert!(created.iter().all(|g| g.referee_id == Some(referee)));
    assert_eq!(f.store.games_of_pool(f.pool).unwrap().len(), 6);

    let again = generate_pool_games(&mut f.store, f.pool, &mut rng).unwrap();
    assert!(again.is_empty());
}

#[test]
fn round_robin_needs_teams_and_a_referee() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut lonely = fixture(&["A"]);
    lonely
        .store
        .create_referee(new_referee("Martin", lonely.tournament), None)
        .unwrap();
    assert!(matches!(
        generate_pool_games(&mut lonely.store, lonely.pool, &mut rng),
        Err(StoreError::Rejected(_))
    ));

    let mut no_referee = fixture(&["A", "B"]);
    assert!(matches!(
        generate_pool_games(&mut no_referee.store, no_referee.pool, &mut rng),
        Err(StoreError::Rejected(_))
    ));
}

#[test]
fn schedule_assigns_consecutive_slots() {
    let mut f = fixture(&["A", "B", "C"]);
    let g1 = f
        .store
        .create_game(new_game(f.pool, f.teams[0], f.teams[1]))
        .unwrap()
        .id;
    let g2 = f
        .store
        .create_game(new_game(f.pool, f.teams[1], f.teams[2]))
        .unwrap()
        .id;

    assert_eq!(generate_schedule(&mut f.store, f.tournament).unwrap(), 2);
    // 12 minute games + 5 minute break
    assert_eq!(f.store.game(g1).unwrap().start_time, Some(start()));
    assert_eq!(
        f.store.game(g2).unwrap().start_time,
        Some(start() + chrono::Duration::minutes(17))
    );

    let view = schedule_view(&f.store, f.tournament).unwrap();
    assert_eq!(view.tournament_name, "Spring Cup");
    let pool_games = &view.schedule["Pool A"];
    assert_eq!(pool_games.len(), 2);
    assert_eq!(pool_games[0].game_id, g1);
    assert_eq!(pool_games[0].team1.name, "A");
}

#[test]
fn schedule_skips_pools_without_category() {
    let mut f = fixture(&["A", "B"]);
    let phase = f.store.phases_of(f.tournament)[0].id;
    let loose_pool = f
        .store
        .create_pool(
            f.tournament,
            NewPool {
                name: "Friendly".into(),
                phase_id: phase,
                category_id: None,
            },
        )
        .unwrap()
        .id;
    let game = f
        .store
        .create_game(new_game(loose_pool, f.teams[0], f.teams[1]))
        .unwrap()
        .id;
    assert_eq!(generate_schedule(&mut f.store, f.tournament).unwrap(), 0);
    assert_eq!(f.store.game(game).unwrap().start_time, None);
}

#[test]
fn schedule_treats_zero_duration_and_break_as_defaults() {
    let mut f = fixture(&["A", "B", "C"]);
    let category = f.store.categories_of(f.tournament)[0].id;
    f.store
        .update_category(
            f.tournament,
            category,
            CategoryPatch {
                game_duration: Some(0),
                ..CategoryPatch::default()
            },
        )
        .unwrap();
    f.store
        .update_tournament(
            f.tournament,
            TournamentPatch {
                break_time: Some(0),
                ..TournamentPatch::default()
            },
        )
        .unwrap();
    let g1 = f
        .store
        .create_game(new_game(f.pool, f.teams[0], f.teams[1]))
        .unwrap()
        .id;
    let g2 = f
        .store
        .create_game(new_game(f.pool, f.teams[1], f.teams[2]))
        .unwrap()
        .id;

    generate_schedule(&mut f.store, f.tournament).unwrap();
    // 10 minute default game + 5 minute default break
    assert_eq!(f.store.game(g1).unwrap().start_time, Some(start()));
    assert_eq!(
        f.store.game(g2).unwrap().start_time,
        Some(start() + chrono::Duration::minutes(15))
    );
}

#[test]
fn referee_logs_in_with_uuid_then_password() {
    let mut f = fixture(&[]);
    let referee = f
        .store
        .create_referee(new_referee("Martin", f.tournament), None)
        .unwrap()
        .clone();
    let uuid = referee.login_uuid.to_string();

    let user = auth::login(&f.store, "Martin", &uuid).unwrap();
    assert!(!user.is_admin);
    assert_eq!(user.id, referee.id);
    assert_eq!(
        auth::login(&f.store, "Martin", "guess").unwrap_err(),
        AuthError::WrongPassword
    );
    assert_eq!(
        auth::login(&f.store, "Nobody", "guess").unwrap_err(),
        AuthError::UnknownUser
    );

    auth::update_password(&mut f.store, referee.login_uuid, &uuid, "s3cret").unwrap();
    assert!(auth::login(&f.store, "Martin", "s3cret").is_ok());
    // The UUID keeps working as a login password
    assert!(auth::login(&f.store, "Martin", &uuid).is_ok());
    // But no longer as the current password
    assert_eq!(
        auth::update_password(&mut f.store, referee.login_uuid, &uuid, "other").unwrap_err(),
        AuthError::WrongPassword
    );
}

#[test]
fn referee_account_can_only_be_created_once() {
    let mut f = fixture(&[]);
    let id = f
        .store
        .create_referee(new_referee("Martin", f.tournament), None)
        .unwrap()
        .id;
    auth::create_referee_account(&mut f.store, id, "first").unwrap();
    assert_eq!(
        auth::create_referee_account(&mut f.store, id, "second").unwrap_err(),
        AuthError::PasswordAlreadySet
    );
    assert_eq!(
        auth::create_referee_account(&mut f.store, 999, "x").unwrap_err(),
        AuthError::Store(StoreError::NotFound(Entity::Referee))
    );
}

#[test]
fn admin_account_wins_over_referee_with_same_name() {
    let mut f = fixture(&[]);
    f.store
        .create_referee(new_referee("admin", f.tournament), None)
        .unwrap();
    let id = auth::seed_admin(&mut f.store, "admin", "hunter2").unwrap();
    assert_eq!(auth::seed_admin(&mut f.store, "admin", "ignored").unwrap(), id);

    let user = auth::login(&f.store, "admin", "hunter2").unwrap();
    assert!(user.is_admin);
    assert_eq!(user.id, id);
}

#[test]
fn password_hashes_verify() {
    let hash = auth::hash_password("correct horse").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(auth::verify_password("correct horse", &hash));
    assert!(!auth::verify_password("wrong", &hash));
    assert!(!auth::verify_password("correct horse", "not a hash"));
}

fn user() -> SessionUser {
    SessionUser {
        id: 1,
        username: "admin".into(),
        first_name: None,
        uuid: None,
        tournament_id: None,
        is_admin: true,
    }
}

#[test]
fn sessions_resolve_until_idle_too_long() {
    let mut sessions = Sessions::new(Duration::from_secs(3600));
    let token = sessions.issue(user());
    assert_eq!(sessions.touch(token).unwrap(), user());
    assert_eq!(sessions.purge_expired(), 0);
    assert!(sessions.revoke(token));
    assert_eq!(sessions.touch(token).unwrap_err(), AuthError::InvalidToken);

    let mut expiring = Sessions::new(Duration::ZERO);
    let token = expiring.issue(user());
    assert_eq!(expiring.touch(token).unwrap_err(), AuthError::InvalidToken);
    expiring.issue(user());
    assert_eq!(expiring.purge_expired(), 1);
    assert!(expiring.is_empty());
}
