use crate::{CompetitionEntity, DatabaseEntity, LoaderError, MatchEntity, SanctionEntity};
use competition_core::{
    Competition, CompetitionData, Match, Player, Sanction, SanctionTarget, Team, TeamCollection,
};
use log::{info, warn};

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    pub fn generate(data: &DatabaseEntity) -> Result<CompetitionData, LoaderError> {
        let teams = data
            .teams
            .iter()
            .map(|team| {
                let mut builder = Team::builder().id(team.id).name(team.name.clone());

                if let Some(logo) = &team.logo {
                    builder = builder.logo(logo.clone());
                }

                builder.build().map_err(|reason| LoaderError::InvalidTeam {
                    id: team.id,
                    reason,
                })
            })
            .collect::<Result<Vec<Team>, LoaderError>>()?;

        let players = data
            .players
            .iter()
            .map(|player| Player::new(player.id, player.team_id, player.name.clone()))
            .collect();

        let competitions = data
            .competitions
            .iter()
            .map(Self::generate_competition)
            .collect::<Result<Vec<Competition>, LoaderError>>()?;

        let matches = data.matches.iter().map(Self::generate_match).collect();

        let sanctions = data
            .sanctions
            .iter()
            .map(Self::generate_sanction)
            .collect::<Result<Vec<Sanction>, LoaderError>>()?;

        let teams = TeamCollection::new(teams);

        for competition in &competitions {
            for team_id in competition.team_ids.iter().filter(|id| !teams.contains(**id)) {
                warn!(
                    "competition {} lists unknown team {}",
                    competition.id, team_id
                );
            }
        }

        info!(
            "generated {} competitions for {} teams",
            competitions.len(),
            teams.len()
        );

        Ok(CompetitionData::new(
            teams,
            players,
            competitions,
            matches,
            sanctions,
        ))
    }

    fn generate_competition(entity: &CompetitionEntity) -> Result<Competition, LoaderError> {
        let mut builder = Competition::builder()
            .id(entity.id)
            .name(entity.name.clone())
            .team_ids(entity.team_ids.clone())
            .two_legged(entity.two_legged);

        if let Some(points) = entity.points_for_win {
            builder = builder.points_for_win(points);
        }

        if let Some(points) = entity.points_for_tie_break_win {
            builder = builder.points_for_tie_break_win(points);
        }

        if let Some(start_date) = entity.start_date {
            builder = builder.start_date(start_date);
        }

        if let Some(days) = entity.days_between_tours {
            builder = builder.days_between_tours(days);
        }

        builder
            .build()
            .map_err(|reason| LoaderError::InvalidCompetition {
                id: entity.id,
                reason,
            })
    }

    fn generate_match(entity: &MatchEntity) -> Match {
        let mut fixture = Match::new(
            entity.id.clone(),
            entity.competition_id,
            entity.home_team_id,
            entity.away_team_id,
        );

        fixture.home_score = entity.home_score;
        fixture.away_score = entity.away_score;
        fixture.status = entity.status;
        fixture.elapsed_seconds = entity.elapsed_seconds;
        fixture.events = entity.events.clone();
        fixture.stage = entity.stage.clone();
        fixture.date = entity.date;

        fixture
    }

    fn generate_sanction(entity: &SanctionEntity) -> Result<Sanction, LoaderError> {
        let target = match (entity.team_id, entity.player_id) {
            (Some(team_id), None) => SanctionTarget::Team(team_id),
            (None, Some(player_id)) => SanctionTarget::Player(player_id),
            _ => return Err(LoaderError::InvalidSanction(entity.id)),
        };

        Ok(Sanction {
            id: entity.id,
            competition_id: entity.competition_id,
            target,
            points_deducted: entity.points_deducted,
            reason: entity.reason.clone(),
        })
    }
}
