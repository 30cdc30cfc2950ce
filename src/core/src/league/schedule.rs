use crate::league::Competition;
use crate::r#match::Match;
use crate::{Team, TeamCollection};
use chrono::{Days, NaiveDate};
use log::{debug, warn};
use serde::Serialize;

/// One side of a pairing. `Bye` pads an odd field so every tour is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Participant {
    Team(u32),
    Bye,
}

impl Participant {
    pub fn team_id(&self) -> Option<u32> {
        match self {
            Participant::Team(id) => Some(*id),
            Participant::Bye => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Participant::Bye)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pairing {
    pub home: Participant,
    pub away: Participant,
}

impl Pairing {
    pub fn new(home: Participant, away: Participant) -> Self {
        Pairing { home, away }
    }

    /// Home and away team ids, or `None` when either side is the bye.
    pub fn teams(&self) -> Option<(u32, u32)> {
        Some((self.home.team_id()?, self.away.team_id()?))
    }

    pub fn is_playable(&self) -> bool {
        self.teams().is_some()
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home.team_id() == Some(team_id) || self.away.team_id() == Some(team_id)
    }

    pub fn mirrored(&self) -> Self {
        Pairing::new(self.away, self.home)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleTour {
    pub num: u32,
    pub pairings: Vec<Pairing>,
}

impl ScheduleTour {
    pub fn new(num: u32, pairings: Vec<Pairing>) -> Self {
        ScheduleTour { num, pairings }
    }

    pub fn playable(&self) -> impl Iterator<Item = &Pairing> {
        self.pairings.iter().filter(|p| p.is_playable())
    }

    /// The team sitting this tour out, if any.
    pub fn bye_team(&self) -> Option<u32> {
        self.pairings.iter().find_map(|p| match (p.home, p.away) {
            (Participant::Team(id), Participant::Bye) | (Participant::Bye, Participant::Team(id)) => {
                Some(id)
            }
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub tours: Vec<ScheduleTour>,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn pairings(&self) -> impl Iterator<Item = &Pairing> {
        self.tours.iter().flat_map(|t| t.pairings.iter())
    }

    pub fn byes_for(&self, team_id: u32) -> usize {
        self.tours
            .iter()
            .filter(|t| t.bye_team() == Some(team_id))
            .count()
    }

    /// Tours in which `team_id` has an actual opponent.
    pub fn tours_for_team(&self, team_id: u32) -> Vec<&ScheduleTour> {
        self.tours
            .iter()
            .filter(|t| t.playable().any(|p| p.involves(team_id)))
            .collect()
    }

    /// Playable fixtures as not-started matches. Byes are dropped.
    pub fn to_matches(&self, competition_id: u32) -> Vec<Match> {
        self.build_matches(competition_id, |_| None)
    }

    /// Same as [`Schedule::to_matches`], dating tour N at
    /// `start_date + (N - 1) * days_between_tours`.
    pub fn to_dated_matches(
        &self,
        competition_id: u32,
        start_date: NaiveDate,
        days_between_tours: u16,
    ) -> Vec<Match> {
        self.build_matches(competition_id, |tour_num| {
            let offset = u64::from(tour_num.saturating_sub(1)) * u64::from(days_between_tours);
            start_date.checked_add_days(Days::new(offset))
        })
    }

    /// Fixtures for `competition`, dated from its `start_date` and
    /// `days_between_tours` when a start date is set.
    pub fn to_competition_matches(&self, competition: &Competition) -> Vec<Match> {
        match competition.start_date {
            Some(start_date) => {
                self.to_dated_matches(competition.id, start_date, competition.days_between_tours)
            }
            None => self.to_matches(competition.id),
        }
    }

    fn build_matches<F>(&self, competition_id: u32, date_of: F) -> Vec<Match>
    where
        F: Fn(u32) -> Option<NaiveDate>,
    {
        let mut matches = Vec::new();

        for tour in &self.tours {
            let date = date_of(tour.num);

            for (home, away) in tour.playable().filter_map(Pairing::teams) {
                let mut fixture = Match::new(
                    format!("{}-{}-{}-{}", competition_id, tour.num, home, away),
                    competition_id,
                    home,
                    away,
                )
                .with_stage(format!("Round {}", tour.num));

                fixture.date = date;
                matches.push(fixture);
            }
        }

        matches
    }
}

pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// Round-robin (circle method) over `teams` in the given order.
    pub fn generate(teams: &[Team], two_legged: bool) -> Schedule {
        if teams.len() < 2 {
            debug!("not enough teams for a schedule: {}", teams.len());
            return Schedule::default();
        }

        let mut participants: Vec<Participant> =
            teams.iter().map(|t| Participant::Team(t.id)).collect();

        if participants.len() % 2 != 0 {
            participants.push(Participant::Bye);
        }

        let half = participants.len() / 2;

        let Ok(rounds) = u32::try_from(participants.len() - 1) else {
            warn!("too many teams for a schedule: {}", teams.len());
            return Schedule::default();
        };

        let mut top: Vec<Participant> = participants[..half].to_vec();
        let mut bottom: Vec<Participant> = participants[half..].iter().rev().copied().collect();

        let mut tours = Vec::new();

        for round in 0..rounds {
            let pairings = top
                .iter()
                .zip(bottom.iter())
                .map(|(&first, &second)| {
                    if round % 2 == 0 {
                        Pairing::new(first, second)
                    } else {
                        Pairing::new(second, first)
                    }
                })
                .collect();

            tours.push(ScheduleTour::new(round + 1, pairings));

            Self::rotate(&mut top, &mut bottom);
        }

        if two_legged {
            let second_leg: Vec<ScheduleTour> = tours
                .iter()
                .map(|tour| {
                    ScheduleTour::new(
                        tour.num.saturating_add(rounds),
                        tour.pairings.iter().map(Pairing::mirrored).collect(),
                    )
                })
                .collect();

            tours.extend(second_leg);
        }

        debug!(
            "schedule generated: teams = {}, tours = {}, two_legged = {}",
            teams.len(),
            tours.len(),
            two_legged
        );

        Schedule { tours }
    }

    /// Schedules `competition` using its team order. Ids without a matching
    /// team are skipped.
    pub fn generate_for_competition(competition: &Competition, teams: &TeamCollection) -> Schedule {
        let ordered = teams.ordered(&competition.team_ids);

        if ordered.len() != competition.team_ids.len() {
            warn!(
                "competition {}: {} team id(s) have no team record and were left out of the schedule",
                competition.id,
                competition.team_ids.len() - ordered.len()
            );
        }

        Self::generate(&ordered, competition.two_legged)
    }

    // The circle reads `top` left to right, then `bottom` right to left.
    // Position 0 stays fixed; everyone else moves one seat clockwise.
    fn rotate(top: &mut Vec<Participant>, bottom: &mut Vec<Participant>) {
        if top.len() < 2 || bottom.is_empty() {
            return;
        }

        top.insert(1, bottom.remove(0));

        if let Some(last) = top.pop() {
            bottom.push(last);
        }
    }
}

pub fn generate_schedule(teams: &[Team], two_legged: bool) -> Schedule {
    ScheduleGenerator::generate(teams, two_legged)
}

pub fn generate_competition_schedule(competition: &Competition, teams: &TeamCollection) -> Schedule {
    ScheduleGenerator::generate_for_competition(competition, teams)
}
