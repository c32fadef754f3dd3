//! Turns football-data.org payloads into rows ready for storage.

use chrono::{DateTime, NaiveDate};
use storage::dto::league::{NewCompetition, NewPlayer, NewTeam, normalize_code};

use super::models::{Area, CompetitionRecord, SquadMember, TeamRecord};
use crate::{ImporterError, Result};

/// Squad role carried by actual players, as opposed to coaching staff.
pub const PLAYER_ROLE: &str = "PLAYER";

pub fn to_competition(record: &CompetitionRecord) -> Result<NewCompetition> {
    Ok(NewCompetition {
        name: record.name.clone(),
        code: normalize_code(&record.code),
        area_name: area_name(record.area.as_ref(), &record.name)?,
    })
}

pub fn to_teams(records: &[TeamRecord], competition: &NewCompetition) -> Result<Vec<NewTeam>> {
    records
        .iter()
        .map(|record| to_team(record, competition))
        .collect()
}

pub fn to_team(record: &TeamRecord, competition: &NewCompetition) -> Result<NewTeam> {
    let tla = record
        .tla
        .clone()
        .filter(|tla| !tla.trim().is_empty())
        .ok_or_else(|| {
            ImporterError::TransformationError(format!("Team '{}' has no tla", record.name))
        })?;

    Ok(NewTeam {
        competition_code: competition.code.clone(),
        name: record.name.clone(),
        tla,
        short_name: record.short_name.clone().unwrap_or_default(),
        area_name: area_name(record.area.as_ref(), &record.name)?,
        email: record.email.clone().filter(|email| !email.is_empty()),
    })
}

/// Keeps only squad members whose role is a player.
pub fn to_players(records: &[SquadMember], team: &NewTeam) -> Result<Vec<NewPlayer>> {
    records
        .iter()
        .filter(|member| is_player(member))
        .map(|member| -> Result<NewPlayer> {
            Ok(NewPlayer {
                team_tla: team.tla.clone(),
                name: member.name.clone(),
                position: member.position.clone(),
                date_of_birth: member
                    .date_of_birth
                    .as_deref()
                    .map(parse_birth_date)
                    .transpose()?,
                country_of_birth: member.country_of_birth.clone(),
                nationality: member.nationality.clone(),
            })
        })
        .collect()
}

fn is_player(member: &SquadMember) -> bool {
    member
        .role
        .as_deref()
        .is_some_and(|role| role.eq_ignore_ascii_case(PLAYER_ROLE))
}

fn area_name(area: Option<&Area>, owner: &str) -> Result<String> {
    area.map(|area| area.name.clone()).ok_or_else(|| {
        ImporterError::TransformationError(format!("'{}' has no area", owner))
    })
}

/// Accepts both `1995-03-02T00:00:00Z` and plain `1995-03-02`.
fn parse_birth_date(raw: &str) -> Result<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ImporterError::TransformationError(format!("Invalid date of birth: {}", raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competition() -> NewCompetition {
        NewCompetition {
            name: "Championship".to_string(),
            code: "ELC".to_string(),
            area_name: "England".to_string(),
        }
    }

    fn member(name: &str, role: &str) -> SquadMember {
        SquadMember {
            name: name.to_string(),
            position: Some("Defender".to_string()),
            date_of_birth: Some("1995-03-02T00:00:00Z".to_string()),
            country_of_birth: Some("England".to_string()),
            nationality: Some("England".to_string()),
            role: Some(role.to_string()),
        }
    }

    fn leeds() -> TeamRecord {
        TeamRecord {
            id: 341,
            name: "Leeds United FC".to_string(),
            tla: Some("LEE".to_string()),
            short_name: Some("Leeds United".to_string()),
            area: Some(Area {
                name: "England".to_string(),
            }),
            email: None,
        }
    }

    #[test]
    fn competition_takes_the_nested_area_name() {
        let record = CompetitionRecord {
            id: 2016,
            name: "Championship".to_string(),
            code: "ELC".to_string(),
            area: Some(Area {
                name: "England".to_string(),
            }),
        };

        assert_eq!(to_competition(&record).unwrap(), competition());
    }

    #[test]
    fn missing_area_is_an_error() {
        let record = CompetitionRecord {
            id: 2016,
            name: "Championship".to_string(),
            code: "ELC".to_string(),
            area: None,
        };

        assert!(matches!(
            to_competition(&record),
            Err(ImporterError::TransformationError(_))
        ));
    }

    #[test]
    fn teams_belong_to_the_given_competition() {
        let mut record = leeds();
        record.short_name = None;

        let teams = to_teams(&[record], &competition()).unwrap();

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].competition_code, "ELC");
        assert_eq!(teams[0].tla, "LEE");
        assert_eq!(teams[0].short_name, "");
        assert_eq!(teams[0].email, None);
    }

    #[test]
    fn team_without_tla_cannot_be_paired_with_its_squad() {
        let mut record = leeds();
        record.tla = None;

        assert!(to_teams(&[record], &competition()).is_err());
    }

    #[test]
    fn staff_are_left_out_of_the_players() {
        let team = to_team(&leeds(), &competition()).unwrap();
        let squad = vec![
            member("Illan Meslier", "PLAYER"),
            member("Marcelo Bielsa", "COACH"),
            member("Pablo Quiroga", "ASSISTANT_COACH"),
            member("Kalvin Phillips", "PLAYER"),
        ];

        let players = to_players(&squad, &team).unwrap();

        let names: Vec<_> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Illan Meslier", "Kalvin Phillips"]);
        assert!(players.iter().all(|p| p.team_tla == "LEE"));
        assert_eq!(
            players[0].date_of_birth,
            NaiveDate::from_ymd_opt(1995, 3, 2)
        );
    }

    #[test]
    fn optional_player_fields_map_to_none() {
        let team = to_team(&leeds(), &competition()).unwrap();
        let squad = vec![SquadMember {
            name: "Unknown".to_string(),
            position: None,
            date_of_birth: None,
            country_of_birth: None,
            nationality: None,
            role: Some("PLAYER".to_string()),
        }];

        let players = to_players(&squad, &team).unwrap();

        assert_eq!(players[0].position, None);
        assert_eq!(players[0].date_of_birth, None);
    }

    #[test]
    fn birth_dates_accept_plain_dates() {
        assert_eq!(
            parse_birth_date("2001-12-31").unwrap(),
            NaiveDate::from_ymd_opt(2001, 12, 31).unwrap()
        );
        assert!(parse_birth_date("31/12/2001").is_err());
    }
}
