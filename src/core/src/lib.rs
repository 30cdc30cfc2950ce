pub mod club;
pub mod data;
pub mod league;
pub mod r#match;

pub mod utils;

pub use club::{Player, PlayerRoster, Roster, Team, TeamBuilder, TeamCollection};

pub use data::CompetitionData;

pub use league::{
    Competition, CompetitionBuilder, LeagueTable, Pairing, Participant, Sanction,
    SanctionTarget, Schedule, ScheduleGenerator, ScheduleTour, Standing, StandingsCalculator,
    StandingsError, compute_all_standings, compute_standings, compute_standings_strict,
    generate_competition_schedule, generate_schedule,
};

pub use r#match::{
    EventAction, LiveMatchEngine, LiveMatchRegistry, Match, MatchEngineError, MatchEvent,
    MatchEventType, MatchSide, MatchSnapshot, MatchStatus, NewMatchEvent, RegistryError,
};

pub use utils::*;
