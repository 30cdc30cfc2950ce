use chrono::NaiveDate;
use competition_core::{MatchEvent, MatchStatus};
use serde::Deserialize;

#[derive(Deserialize, Default)]
pub struct DatabaseEntity {
    #[serde(default)]
    pub teams: Vec<TeamEntity>,
    #[serde(default)]
    pub players: Vec<PlayerEntity>,
    #[serde(default)]
    pub competitions: Vec<CompetitionEntity>,
    #[serde(default)]
    pub matches: Vec<MatchEntity>,
    #[serde(default)]
    pub sanctions: Vec<SanctionEntity>,
}

#[derive(Deserialize)]
pub struct TeamEntity {
    pub id: u32,
    pub name: String,
    pub logo: Option<String>,
}

#[derive(Deserialize)]
pub struct PlayerEntity {
    pub id: u32,
    pub team_id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
pub struct CompetitionEntity {
    pub id: u32,
    pub name: String,
    pub team_ids: Vec<u32>,
    #[serde(default)]
    pub two_legged: bool,
    pub points_for_win: Option<u8>,
    pub points_for_tie_break_win: Option<u8>,
    pub start_date: Option<NaiveDate>,
    pub days_between_tours: Option<u16>,
}

#[derive(Deserialize)]
pub struct MatchEntity {
    pub id: String,
    pub competition_id: u32,
    pub home_team_id: u32,
    pub away_team_id: u32,
    #[serde(default)]
    pub home_score: u16,
    #[serde(default)]
    pub away_score: u16,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub elapsed_seconds: u32,
    #[serde(default)]
    pub events: Vec<MatchEvent>,
    pub stage: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Stored with two optional ids; exactly one must be set.
#[derive(Deserialize)]
pub struct SanctionEntity {
    pub id: u32,
    pub competition_id: u32,
    pub team_id: Option<u32>,
    pub player_id: Option<u32>,
    #[serde(default)]
    pub points_deducted: u16,
    #[serde(default)]
    pub reason: String,
}
