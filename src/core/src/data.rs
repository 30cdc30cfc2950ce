use crate::club::{Player, Roster, TeamCollection};
use crate::league::{
    Competition, LeagueTable, Sanction, Schedule, StandingsCalculator,
    generate_competition_schedule,
};
use crate::r#match::Match;
use log::info;

/// Everything known about the loaded competitions.
pub struct CompetitionData {
    pub teams: TeamCollection,
    pub players: Vec<Player>,
    pub competitions: Vec<Competition>,
    pub matches: Vec<Match>,
    pub sanctions: Vec<Sanction>,
}

impl CompetitionData {
    pub fn new(
        teams: TeamCollection,
        players: Vec<Player>,
        competitions: Vec<Competition>,
        matches: Vec<Match>,
        sanctions: Vec<Sanction>,
    ) -> Self {
        CompetitionData {
            teams,
            players,
            competitions,
            matches,
            sanctions,
        }
    }

    pub fn competition(&self, id: u32) -> Option<&Competition> {
        self.competitions.iter().find(|c| c.id == id)
    }

    pub fn matches_of(&self, competition_id: u32) -> impl Iterator<Item = &Match> {
        self.matches
            .iter()
            .filter(move |m| m.competition_id == competition_id)
    }

    pub fn match_by_id(&self, match_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn roster(&self) -> Roster {
        Roster::from_players(&self.players)
    }

    pub fn schedule(&self, competition_id: u32) -> Option<Schedule> {
        self.competition(competition_id)
            .map(|competition| generate_competition_schedule(competition, &self.teams))
    }

    /// Scheduled fixtures of a competition, dated from its config.
    pub fn fixtures(&self, competition_id: u32) -> Option<Vec<Match>> {
        let competition = self.competition(competition_id)?;

        let schedule = generate_competition_schedule(competition, &self.teams);

        Some(schedule.to_competition_matches(competition))
    }

    /// Standings with sanctions applied.
    pub fn table(&self, competition_id: u32) -> Option<LeagueTable> {
        let competition = self.competition(competition_id)?;

        let mut table = StandingsCalculator::compute(competition, &self.matches);
        table.apply_sanctions(&self.sanctions);

        Some(table)
    }

    pub fn tables(&self) -> Vec<LeagueTable> {
        let mut tables = StandingsCalculator::compute_many(&self.competitions, &self.matches);

        for table in &mut tables {
            table.apply_sanctions(&self.sanctions);
        }

        info!("{} league tables computed", tables.len());

        tables
    }
}
