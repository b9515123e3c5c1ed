use std::collections::BTreeSet;

use crate::error::{Result, TrackerError};

/// The fixed set of team names competitions may refer to.
///
/// An empty roster accepts every team name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRoster {
    teams: BTreeSet<String>,
}

impl TeamRoster {
    pub fn new<I, S>(teams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            teams: teams.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_comma_separated(teams_str: &str) -> Self {
        let teams = teams_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { teams }
    }

    pub fn is_open(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn contains(&self, team: &str) -> bool {
        self.is_open() || self.teams.contains(team)
    }

    pub fn check(&self, team: &str) -> Result<()> {
        if self.contains(team) {
            Ok(())
        } else {
            Err(TrackerError::UnknownTeam(team.to_string()))
        }
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(String::as_str)
    }
}
