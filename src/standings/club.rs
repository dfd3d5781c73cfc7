//! Grouping teams into clubs by their name without the age-category suffix.

use crate::models::{Team, TeamId};
use std::collections::HashMap;

/// A club: every team sharing the same base name ("Falcons U10" and "Falcons U12" are "Falcons").
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Club {
    pub name: String,
    /// Logo of the first team encountered for this club.
    pub logo: Option<String>,
    /// Never empty.
    pub team_ids: Vec<TeamId>,
}

/// Remove a trailing age category (whitespace, `U`, one or more digits, end of string) and trim.
///
/// Names without such a suffix come back trimmed but otherwise unchanged. Only the very end of
/// the raw name is considered: `"Falcons U10 "` keeps its suffix because of the trailing space.
pub fn strip_age_category(name: &str) -> &str {
    let without_digits = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() == name.len() {
        return name.trim();
    }
    let Some(before_u) = without_digits.strip_suffix('U') else {
        return name.trim();
    };
    let base = before_u.trim_end_matches(char::is_whitespace);
    if base.len() == before_u.len() {
        return name.trim();
    }
    base.trim()
}

/// Group teams into clubs, in order of first appearance. Every team lands in exactly one club.
pub fn group_into_clubs(teams: &[Team]) -> Vec<Club> {
    let mut clubs: Vec<Club> = Vec::new();
    let mut by_name: HashMap<&str, usize> = HashMap::new();
    for team in teams {
        let name = strip_age_category(&team.name);
        match by_name.get(name) {
            Some(&idx) => {
                log::debug!("Team {} joins club \"{}\"", team.id, name);
                clubs[idx].team_ids.push(team.id);
            }
            None => {
                log::debug!("New club \"{}\" starting with team {}", name, team.id);
                by_name.insert(name, clubs.len());
                clubs.push(Club {
                    name: name.to_string(),
                    logo: team.logo.clone(),
                    team_ids: vec![team.id],
                });
            }
        }
    }
    clubs
}
