//! Integration tests for standings: club grouping, aggregation and ranking.

use tournament_api::models::{Game, PointConfig, Team};
use tournament_api::standings::{aggregate, compute, group_into_clubs, rank, strip_age_category};
use tournament_api::standings::{Cascade, StandingsRow, TieBreak, View};

const T: u64 = 1;

fn teams(names: &[&str]) -> Vec<Team> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Team::new(i as u64 + 1, *name, T))
        .collect()
}

fn played(id: u64, team1: u64, team2: u64, s1: u32, s2: u32) -> Game {
    Game::new(id, team1, team2, 1, T).completed(s1, s2)
}

fn row<'a>(rows: &'a [StandingsRow], name: &str) -> &'a StandingsRow {
    rows.iter().find(|r| r.name == name).unwrap()
}

#[test]
fn strip_removes_age_suffix_and_trims() {
    assert_eq!(strip_age_category("Falcons U10"), "Falcons");
    assert_eq!(strip_age_category("  Falcons   U12"), "Falcons");
    assert_eq!(strip_age_category("Red Lions\tU9"), "Red Lions");
    assert_eq!(strip_age_category("Falcons"), "Falcons");
    assert_eq!(strip_age_category("  Falcons  "), "Falcons");
}

#[test]
fn strip_leaves_lookalike_suffixes_alone() {
    // No whitespace before the U, lowercase u, no digits, or trailing text after the digits
    assert_eq!(strip_age_category("FalconsU10"), "FalconsU10");
    assert_eq!(strip_age_category("Falcons u10"), "Falcons u10");
    assert_eq!(strip_age_category("Falcons U"), "Falcons U");
    assert_eq!(strip_age_category("Falcons U10 "), "Falcons U10");
    assert_eq!(strip_age_category("Falcons U10b"), "Falcons U10b");
    assert_eq!(strip_age_category("Team 42"), "Team 42");
}

#[test]
fn grouping_is_total_and_keeps_first_seen_order() {
    let mut ts = teams(&["Falcons U10", "Lions U10", "Falcons U12", "Eagles", "Lions U14"]);
    ts[0].logo = Some("/uploads/falcons.png".into());
    ts[2].logo = Some("/uploads/other.png".into());
    let clubs = group_into_clubs(&ts);

    let names: Vec<&str> = clubs.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Falcons", "Lions", "Eagles"]);
    assert_eq!(clubs[0].team_ids, vec![1, 3]);
    assert_eq!(clubs[1].team_ids, vec![2, 5]);
    assert_eq!(clubs[0].logo.as_deref(), Some("/uploads/falcons.png"));
    let total: usize = clubs.iter().map(|c| c.team_ids.len()).sum();
    assert_eq!(total, ts.len());

    assert!(group_into_clubs(&[]).is_empty());
}

#[test]
fn teams_of_one_club_meeting_count_one_match_and_nothing_else() {
    let ts = teams(&["Falcons U10", "Falcons U12"]);
    let games = vec![played(1, 1, 2, 3, 1)];
    let rows = compute(View::POOL, &ts, &games, PointConfig::default());

    assert_eq!(rows.len(), 1);
    let falcons = &rows[0];
    assert_eq!(falcons.name, "Falcons");
    assert_eq!(falcons.team_ids, vec![1, 2]);
    assert_eq!(falcons.matches_played, 1);
    assert_eq!((falcons.wins, falcons.draws, falcons.losses), (0, 0, 0));
    assert_eq!(falcons.points, 0);
    assert_eq!(falcons.rank, 1);
}

#[test]
fn draw_and_win_example() {
    let ts = teams(&["X", "Y", "Z"]);
    let games = vec![played(1, 1, 2, 2, 2), played(2, 1, 3, 1, 0)];
    let rows = compute(View::POOL, &ts, &games, PointConfig::default());

    let order: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["X", "Y", "Z"]);
    let x = row(&rows, "X");
    assert_eq!((x.points, x.matches_played, x.wins, x.draws), (4, 2, 1, 1));
    let y = row(&rows, "Y");
    assert_eq!((y.points, y.matches_played, y.draws), (1, 1, 1));
    let z = row(&rows, "Z");
    assert_eq!((z.points, z.matches_played, z.losses), (0, 1, 1));
    assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn fewer_matches_played_breaks_ties() {
    let p = StandingsRow {
        name: "P".into(),
        points: 6,
        wins: 2,
        matches_played: 2,
        ..StandingsRow::default()
    };
    let q = StandingsRow {
        name: "Q".into(),
        points: 6,
        wins: 2,
        matches_played: 3,
        ..StandingsRow::default()
    };
    let ranked = rank(vec![q, p], Cascade::Plain);
    assert_eq!(ranked[0].name, "P");
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[1].name, "Q");
    assert_eq!(ranked[1].rank, 2);
}

#[test]
fn incomplete_game_changes_nothing() {
    let ts = teams(&["A", "B"]);
    let mut game = Game::new(1, 1, 2, 1, T);
    game.team1_score = Some(5);
    game.team2_score = Some(0);
    let rows = compute(View::TOURNAMENT, &ts, &[game], PointConfig::default());

    for r in &rows {
        assert_eq!(r.matches_played, 0);
        assert_eq!(r.points, 0);
        assert_eq!(r.goals_for, Some(0));
        assert_eq!(r.goal_difference, Some(0));
    }
}

#[test]
fn custom_points_apply_to_win_loss_and_draw() {
    let config = PointConfig {
        win: 2,
        draw: 1,
        loss: 1,
    };
    let ts = teams(&["A", "B", "C"]);
    let games = vec![played(1, 1, 2, 4, 1), played(2, 2, 3, 0, 0)];
    let rows = compute(View::TOURNAMENT, &ts, &games, config);

    assert_eq!(row(&rows, "A").points, 2);
    assert_eq!(row(&rows, "B").points, 1 + 1);
    assert_eq!(row(&rows, "C").points, 1);
}

#[test]
fn goals_are_tracked_on_team_views_only() {
    let ts = teams(&["A", "B"]);
    let games = vec![played(1, 1, 2, 3, 1), played(2, 2, 1, 2, 2)];

    let team_rows = compute(View::TOURNAMENT, &ts, &games, PointConfig::default());
    let a = row(&team_rows, "A");
    assert_eq!((a.goals_for, a.goals_against, a.goal_difference), (Some(5), Some(3), Some(2)));
    let b = row(&team_rows, "B");
    assert_eq!(b.goal_difference, Some(-2));

    let club_rows = compute(View::POOL, &ts, &games, PointConfig::default());
    assert!(club_rows.iter().all(|r| r.goals_for.is_none() && r.goal_difference.is_none()));
}

#[test]
fn unknown_teams_are_skipped() {
    let ts = teams(&["A", "B"]);
    let games = vec![played(1, 1, 99, 3, 0), played(2, 1, 2, 1, 0)];
    let rows = compute(View::TOURNAMENT, &ts, &games, PointConfig::default());

    let a = row(&rows, "A");
    assert_eq!(a.matches_played, 1);
    assert_eq!(a.goals_for, Some(1));
}

#[test]
fn missing_scores_read_as_zero() {
    let ts = teams(&["A", "B"]);
    let mut game = Game::new(1, 1, 2, 1, T);
    game.is_completed = true;
    let rows = compute(View::TOURNAMENT, &ts, &[game], PointConfig::default());
    assert!(rows.iter().all(|r| r.draws == 1 && r.points == 1));
}

#[test]
fn goal_aware_cascade_orders_equal_points_by_goal_difference() {
    // Everyone wins once: A has GD +4, C has -1, B has -3
    let ts = teams(&["A", "B", "C"]);
    let games = vec![
        played(1, 1, 3, 5, 0),
        played(2, 1, 2, 0, 1),
        played(3, 2, 3, 0, 4),
    ];
    let rows = compute(View::TOURNAMENT, &ts, &games, PointConfig::default());
    assert!(rows.iter().all(|r| r.points == 3));
    let order: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["A", "C", "B"]);
}

#[test]
fn more_points_always_rank_first() {
    let leader = StandingsRow {
        name: "leader".into(),
        points: 4,
        matches_played: 9,
        ..StandingsRow::default()
    };
    let chaser = StandingsRow {
        name: "chaser".into(),
        points: 3,
        wins: 3,
        goals_for: Some(40),
        goal_difference: Some(30),
        ..StandingsRow::default()
    };
    for cascade in [Cascade::Plain, Cascade::GoalAware] {
        let ranked = rank(vec![chaser.clone(), leader.clone()], cascade);
        assert_eq!(ranked[0].name, "leader");
    }
    assert!(TieBreak::Points.compare(&leader, &chaser).is_lt());
}

#[test]
fn ranks_are_one_to_n_even_for_identical_rows() {
    let rows: Vec<StandingsRow> = (0..5)
        .map(|i| StandingsRow {
            name: format!("R{i}"),
            ..StandingsRow::default()
        })
        .collect();
    let ranked = rank(rows, Cascade::GoalAware);
    assert_eq!(ranked.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    // Stable: identical rows keep their input order
    assert_eq!(ranked[0].name, "R0");
    assert_eq!(ranked[4].name, "R4");

    assert!(rank(Vec::new(), Cascade::Plain).is_empty());
}

#[test]
fn aggregate_uses_resolver_indices() {
    let mut rows = vec![StandingsRow::default(), StandingsRow::default()];
    let games = vec![played(1, 10, 20, 1, 0)];
    aggregate(&mut rows, &games, PointConfig::default(), |id| match id {
        10 => Some(1),
        20 => Some(0),
        _ => None,
    });
    assert_eq!(rows[1].wins, 1);
    assert_eq!(rows[1].points, 3);
    assert_eq!(rows[0].losses, 1);
}

#[test]
fn club_table_sums_games_of_all_club_teams() {
    let ts = teams(&["Falcons U10", "Lions U10", "Falcons U12", "Lions U12"]);
    let games = vec![played(1, 1, 2, 2, 0), played(2, 3, 4, 1, 1)];
    let rows = compute(View::TOURNAMENT_CLUBS, &ts, &games, PointConfig::default());

    let falcons = row(&rows, "Falcons");
    assert_eq!((falcons.matches_played, falcons.wins, falcons.draws, falcons.points), (2, 1, 1, 4));
    assert_eq!(falcons.team_ids_string(), "1,3");
    let lions = row(&rows, "Lions");
    assert_eq!((lions.matches_played, lions.losses, lions.draws, lions.points), (2, 1, 1, 1));
    assert_eq!(rows[0].name, "Falcons");
}

#[test]
fn plain_cascade_prefers_wins_over_fewer_matches() {
    let winner = StandingsRow {
        name: "winner".into(),
        points: 6,
        wins: 2,
        losses: 5,
        matches_played: 7,
        ..StandingsRow::default()
    };
    let drawer = StandingsRow {
        name: "drawer".into(),
        points: 6,
        draws: 6,
        matches_played: 6,
        ..StandingsRow::default()
    };
    let ranked = rank(vec![drawer, winner], Cascade::Plain);
    assert_eq!(ranked[0].name, "winner");
    assert_eq!(ranked[1].name, "drawer");
}

fn with_goals(name: &str, points: u32, wins: u32, goals_for: u32, goals_against: u32) -> StandingsRow {
    StandingsRow {
        name: name.into(),
        points,
        wins,
        matches_played: 3,
        goals_for: Some(goals_for),
        goals_against: Some(goals_against),
        goal_difference: Some(i64::from(goals_for) - i64::from(goals_against)),
        ..StandingsRow::default()
    }
}

#[test]
fn goal_aware_cascade_uses_goals_for_before_wins() {
    // Same points and goal difference; the row with fewer wins scored more
    let scorer = with_goals("scorer", 3, 0, 5, 3);
    let winner = with_goals("winner", 3, 1, 3, 1);
    let ranked = rank(vec![winner, scorer], Cascade::GoalAware);
    assert_eq!(ranked[0].name, "scorer");
    assert_eq!(ranked[1].name, "winner");
}

#[test]
fn goal_aware_cascade_falls_back_to_wins() {
    let drawer = with_goals("drawer", 3, 0, 4, 4);
    let winner = with_goals("winner", 3, 1, 4, 4);
    let ranked = rank(vec![drawer, winner], Cascade::GoalAware);
    assert_eq!(ranked[0].name, "winner");
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[1].name, "drawer");
}

#[test]
fn huge_points_and_scores_saturate() {
    let ts = teams(&["A", "B", "C"]);
    let config = PointConfig {
        win: u32::MAX,
        draw: 1,
        loss: 0,
    };
    let games = vec![played(1, 1, 2, 1, 0), played(2, 1, 3, 1, 0)];
    let rows = compute(View::POOL, &ts, &games, config);
    assert_eq!(row(&rows, "A").points, u32::MAX);
    assert_eq!(row(&rows, "A").wins, 2);

    let games = vec![played(1, 1, 2, u32::MAX, 0), played(2, 1, 2, u32::MAX, 0)];
    let rows = compute(View::TOURNAMENT, &ts, &games, PointConfig::default());
    let a = row(&rows, "A");
    assert_eq!(a.goals_for, Some(u32::MAX));
    assert_eq!(a.goal_difference, Some(i64::from(u32::MAX)));
    assert_eq!(row(&rows, "B").goals_against, Some(u32::MAX));
    assert_eq!(rows[0].name, "A");
}
