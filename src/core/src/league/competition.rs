use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub const DEFAULT_POINTS_FOR_WIN: u8 = 3;
pub const DEFAULT_POINTS_FOR_TIE_BREAK_WIN: u8 = 2;
pub const DEFAULT_DAYS_BETWEEN_TOURS: u16 = 7;

/// Read-only competition settings. `team_ids` order drives schedule
/// generation and breaks ties in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub team_ids: Vec<u32>,
    #[serde(default)]
    pub two_legged: bool,
    #[serde(default = "default_points_for_win")]
    pub points_for_win: u8,
    #[serde(default = "default_points_for_tie_break_win")]
    pub points_for_tie_break_win: u8,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "default_days_between_tours")]
    pub days_between_tours: u16,
}

fn default_points_for_win() -> u8 {
    DEFAULT_POINTS_FOR_WIN
}

fn default_points_for_tie_break_win() -> u8 {
    DEFAULT_POINTS_FOR_TIE_BREAK_WIN
}

fn default_days_between_tours() -> u16 {
    DEFAULT_DAYS_BETWEEN_TOURS
}

impl Competition {
    pub fn new(id: u32, name: String, team_ids: Vec<u32>) -> Self {
        Competition {
            id,
            name,
            team_ids,
            two_legged: false,
            points_for_win: DEFAULT_POINTS_FOR_WIN,
            points_for_tie_break_win: DEFAULT_POINTS_FOR_TIE_BREAK_WIN,
            start_date: None,
            days_between_tours: DEFAULT_DAYS_BETWEEN_TOURS,
        }
    }

    pub fn builder() -> CompetitionBuilder {
        CompetitionBuilder::new()
    }

    pub fn has_team(&self, team_id: u32) -> bool {
        self.team_ids.contains(&team_id)
    }
}

#[derive(Default)]
pub struct CompetitionBuilder {
    id: Option<u32>,
    name: Option<String>,
    team_ids: Option<Vec<u32>>,
    two_legged: Option<bool>,
    points_for_win: Option<u8>,
    points_for_tie_break_win: Option<u8>,
    start_date: Option<NaiveDate>,
    days_between_tours: Option<u16>,
}

impl CompetitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn team_ids(mut self, team_ids: Vec<u32>) -> Self {
        self.team_ids = Some(team_ids);
        self
    }

    pub fn two_legged(mut self, two_legged: bool) -> Self {
        self.two_legged = Some(two_legged);
        self
    }

    pub fn points_for_win(mut self, points: u8) -> Self {
        self.points_for_win = Some(points);
        self
    }

    pub fn points_for_tie_break_win(mut self, points: u8) -> Self {
        self.points_for_tie_break_win = Some(points);
        self
    }

    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn days_between_tours(mut self, days: u16) -> Self {
        self.days_between_tours = Some(days);
        self
    }

    pub fn build(self) -> Result<Competition, String> {
        let team_ids = self.team_ids.ok_or("team_ids is required")?;

        if let Some(duplicate) = team_ids.iter().duplicates().next() {
            return Err(format!("team {} is listed twice", duplicate));
        }

        Ok(Competition {
            id: self.id.ok_or("id is required")?,
            name: self.name.unwrap_or_default(),
            team_ids,
            two_legged: self.two_legged.unwrap_or(false),
            points_for_win: self.points_for_win.unwrap_or(DEFAULT_POINTS_FOR_WIN),
            points_for_tie_break_win: self
                .points_for_tie_break_win
                .unwrap_or(DEFAULT_POINTS_FOR_TIE_BREAK_WIN),
            start_date: self.start_date,
            days_between_tours: self
                .days_between_tours
                .unwrap_or(DEFAULT_DAYS_BETWEEN_TOURS),
        })
    }
}
