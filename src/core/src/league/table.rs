use crate::league::{Competition, Sanction};
use crate::r#match::{Match, MatchStatus};
use itertools::Itertools;
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

pub const POINTS_FOR_DRAW: i32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub team_id: u32,
    pub played: u16,
    pub wins: u16,
    pub draws: u16,
    pub losses: u16,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: i32,
}

impl Standing {
    pub fn new(team_id: u32) -> Self {
        Standing {
            team_id,
            ..Default::default()
        }
    }

    fn record(&mut self, scored: u16, conceded: u16, points_for_win: u8) {
        self.played += 1;
        self.goals_for += u32::from(scored);
        self.goals_against += u32::from(conceded);

        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.wins += 1;
                self.points += i32::from(points_for_win);
            }
            Ordering::Less => {
                self.losses += 1;
            }
            Ordering::Equal => {
                self.draws += 1;
                self.points += POINTS_FOR_DRAW;
            }
        }

        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;
    }

    fn ranking(a: &Standing, b: &Standing) -> Ordering {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StandingsError {
    #[error("match {match_id} involves team {team_id} which is not part of competition {competition_id}")]
    UnknownTeam {
        competition_id: u32,
        match_id: String,
        team_id: u32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeagueTable {
    pub competition_id: u32,
    pub rows: Vec<Standing>,
}

impl LeagueTable {
    pub fn get(&self) -> &[Standing] {
        &self.rows
    }

    pub fn leader(&self) -> Option<&Standing> {
        self.rows.first()
    }

    /// 1-based table position.
    pub fn position_of(&self, team_id: u32) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.team_id == team_id)
            .map(|idx| idx + 1)
    }

    pub fn row(&self, team_id: u32) -> Option<&Standing> {
        self.rows.iter().find(|r| r.team_id == team_id)
    }

    /// Deducts points for team sanctions issued in this competition.
    pub fn apply_sanctions(&mut self, sanctions: &[Sanction]) {
        let competition_sanctions: Vec<&Sanction> = sanctions
            .iter()
            .filter(|s| s.competition_id == self.competition_id)
            .collect();

        if competition_sanctions.is_empty() {
            return;
        }

        for row in &mut self.rows {
            let deducted: i32 = competition_sanctions
                .iter()
                .map(|s| i32::from(s.deduction_for(row.team_id)))
                .sum();

            if deducted > 0 {
                debug!("team {} loses {} point(s) to sanctions", row.team_id, deducted);
                row.points -= deducted;
            }
        }

        self.sort();
    }

    fn sort(&mut self) {
        self.rows.sort_by(Standing::ranking);
    }
}

pub struct StandingsCalculator;

impl StandingsCalculator {
    /// Builds the table from finished matches. Match sides outside
    /// `competition.team_ids` are skipped.
    pub fn compute(competition: &Competition, matches: &[Match]) -> LeagueTable {
        let (table, skipped) = Self::aggregate(competition, matches);

        for error in skipped {
            warn!("{}, skipping", error);
        }

        table
    }

    /// Like [`StandingsCalculator::compute`], failing on the first match side
    /// that is not part of the competition.
    pub fn compute_strict(
        competition: &Competition,
        matches: &[Match],
    ) -> Result<LeagueTable, StandingsError> {
        let (table, skipped) = Self::aggregate(competition, matches);

        match skipped.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(table),
        }
    }

    /// One table per competition, computed in parallel, in input order.
    pub fn compute_many(competitions: &[Competition], matches: &[Match]) -> Vec<LeagueTable> {
        competitions
            .par_iter()
            .map(|competition| Self::compute(competition, matches))
            .collect()
    }

    /// The table over known teams, plus every match side that was left out.
    fn aggregate(
        competition: &Competition,
        matches: &[Match],
    ) -> (LeagueTable, Vec<StandingsError>) {
        let mut rows: Vec<Standing> = competition
            .team_ids
            .iter()
            .unique()
            .map(|&team_id| Standing::new(team_id))
            .collect();

        let index: HashMap<u32, usize> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (row.team_id, idx))
            .collect();

        let mut skipped = Vec::new();

        let finished = matches
            .iter()
            .filter(|m| m.competition_id == competition.id && m.status == MatchStatus::Finished);

        for fixture in finished {
            let sides = [
                (fixture.home_team_id, fixture.home_score, fixture.away_score),
                (fixture.away_team_id, fixture.away_score, fixture.home_score),
            ];

            for (team_id, scored, conceded) in sides {
                match index.get(&team_id) {
                    Some(&idx) => rows[idx].record(scored, conceded, competition.points_for_win),
                    None => skipped.push(StandingsError::UnknownTeam {
                        competition_id: competition.id,
                        match_id: fixture.id.clone(),
                        team_id,
                    }),
                }
            }
        }

        let mut table = LeagueTable {
            competition_id: competition.id,
            rows,
        };

        table.sort();

        (table, skipped)
    }
}

pub fn compute_standings(competition: &Competition, matches: &[Match]) -> Vec<Standing> {
    StandingsCalculator::compute(competition, matches).rows
}

pub fn compute_standings_strict(
    competition: &Competition,
    matches: &[Match],
) -> Result<Vec<Standing>, StandingsError> {
    StandingsCalculator::compute_strict(competition, matches).map(|table| table.rows)
}

pub fn compute_all_standings(competitions: &[Competition], matches: &[Match]) -> Vec<LeagueTable> {
    StandingsCalculator::compute_many(competitions, matches)
}
