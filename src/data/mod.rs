//! Core data models for pitchside
//!
//! This module contains the types used throughout the application for
//! representing competitions, standings, scorers, matches, teams, and
//! players as returned by the football-data.org v4 API. Unknown fields in
//! upstream payloads are ignored; fields the API omits on some plans or
//! endpoints are `Option`.

pub mod football;

pub use football::{FootballClient, FootballError};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::KeyBuilder;

/// A geographic area a competition or team belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: Option<u64>,
    pub name: String,
    pub code: Option<String>,
    pub flag: Option<String>,
}

/// A season within a competition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: Option<u64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub current_matchday: Option<u32>,
}

/// A competition (league or cup)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: u64,
    pub name: String,
    /// Short code such as "PL" or "CL"
    pub code: Option<String>,
    pub emblem: Option<String>,
    pub area: Option<Area>,
    pub current_season: Option<Season>,
}

/// Response payload listing available competitions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionList {
    pub count: Option<u32>,
    pub competitions: Vec<Competition>,
}

/// Abbreviated team reference embedded in standings, scorers, and matches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: u64,
    pub name: String,
    pub short_name: Option<String>,
    pub tla: Option<String>,
    pub crest: Option<String>,
}

/// One row of a league table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePosition {
    pub position: u32,
    pub team: TeamRef,
    pub played_games: u32,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub points: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
}

/// A standings table for one stage/group of a competition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsTable {
    pub stage: Option<String>,
    #[serde(rename = "type")]
    pub table_type: Option<String>,
    pub group: Option<String>,
    pub table: Vec<TablePosition>,
}

/// Response payload for competition standings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsResponse {
    pub competition: Option<Competition>,
    pub season: Option<Season>,
    pub standings: Vec<StandingsTable>,
}

/// A player, as returned by the persons endpoint and embedded in scorers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub position: Option<String>,
    pub shirt_number: Option<u32>,
    pub current_team: Option<TeamRef>,
}

/// One entry in a competition's top scorer list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorer {
    pub player: Person,
    pub team: TeamRef,
    pub played_matches: Option<u32>,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    pub penalties: Option<u32>,
}

/// Response payload for competition top scorers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorersResponse {
    pub competition: Option<Competition>,
    pub season: Option<Season>,
    pub scorers: Vec<Scorer>,
}

/// Lifecycle status of a match as reported upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Timed,
    InPlay,
    Paused,
    Finished,
    Postponed,
    Suspended,
    Cancelled,
    /// Any status value this client does not recognize
    #[serde(other)]
    Unknown,
}

impl MatchStatus {
    /// Parses a status from user input, case-insensitively
    ///
    /// Returns `None` for unrecognized input; the `Unknown` variant is
    /// reserved for upstream payloads and cannot be requested.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SCHEDULED" => Some(MatchStatus::Scheduled),
            "TIMED" => Some(MatchStatus::Timed),
            "IN_PLAY" => Some(MatchStatus::InPlay),
            "PAUSED" => Some(MatchStatus::Paused),
            "FINISHED" => Some(MatchStatus::Finished),
            "POSTPONED" => Some(MatchStatus::Postponed),
            "SUSPENDED" => Some(MatchStatus::Suspended),
            "CANCELLED" => Some(MatchStatus::Cancelled),
            _ => None,
        }
    }

    /// The upstream spelling, used in query parameters and cache keys
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Timed => "TIMED",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Suspended => "SUSPENDED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Goals for one side at a point in the match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePair {
    pub home: Option<i32>,
    pub away: Option<i32>,
}

/// Full score information for a match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub winner: Option<String>,
    pub full_time: Option<ScorePair>,
    pub half_time: Option<ScorePair>,
}

/// A single fixture or result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: u64,
    pub utc_date: DateTime<Utc>,
    pub status: MatchStatus,
    pub matchday: Option<u32>,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub score: Option<MatchScore>,
    pub competition: Option<Competition>,
}

/// Response payload listing matches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchList {
    pub matches: Vec<Match>,
}

/// A team's head coach
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub nationality: Option<String>,
}

/// A player entry in a team's squad
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadMember {
    pub id: u64,
    pub name: String,
    pub position: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
}

/// Full team details including squad
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub short_name: Option<String>,
    pub tla: Option<String>,
    pub crest: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub founded: Option<u32>,
    pub club_colors: Option<String>,
    pub venue: Option<String>,
    pub area: Option<Area>,
    pub coach: Option<Coach>,
    #[serde(default)]
    pub squad: Vec<SquadMember>,
}

/// Response payload listing the teams of a competition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamList {
    pub count: Option<u32>,
    pub competition: Option<Competition>,
    pub teams: Vec<Team>,
}

/// Query parameters that narrow a match listing
///
/// Every field affects the upstream response, so every set field
/// participates in cache key derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchFilter {
    pub status: Option<MatchStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl MatchFilter {
    /// Query parameters for the upstream request, in upstream spelling
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(date_from) = self.date_from {
            params.push(("dateFrom", date_from.to_string()));
        }
        if let Some(date_to) = self.date_to {
            params.push(("dateTo", date_to.to_string()));
        }
        params
    }

    /// Appends the set parameters to a cache key in a fixed order
    pub fn apply_key(&self, builder: KeyBuilder) -> KeyBuilder {
        builder
            .param("status", self.status.map(MatchStatus::as_str))
            .param("from", self.date_from)
            .param("to", self.date_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_status_from_str_accepts_any_case() {
        assert_eq!(MatchStatus::from_str("finished"), Some(MatchStatus::Finished));
        assert_eq!(MatchStatus::from_str("FINISHED"), Some(MatchStatus::Finished));
        assert_eq!(MatchStatus::from_str("in_play"), Some(MatchStatus::InPlay));
        assert_eq!(MatchStatus::from_str("Scheduled"), Some(MatchStatus::Scheduled));
    }

    #[test]
    fn test_match_status_from_str_rejects_unknown() {
        assert_eq!(MatchStatus::from_str("halftime"), None);
        assert_eq!(MatchStatus::from_str(""), None);
        assert_eq!(MatchStatus::from_str("unknown"), None);
    }

    #[test]
    fn test_match_status_upstream_spelling() {
        assert_eq!(MatchStatus::InPlay.as_str(), "IN_PLAY");
        assert_eq!(MatchStatus::Finished.as_str(), "FINISHED");
    }

    #[test]
    fn test_match_status_deserializes_upstream_values() {
        let status: MatchStatus = serde_json::from_str("\"IN_PLAY\"").unwrap();
        assert_eq!(status, MatchStatus::InPlay);

        // Values this client does not know collapse to Unknown
        let status: MatchStatus = serde_json::from_str("\"AWARDED\"").unwrap();
        assert_eq!(status, MatchStatus::Unknown);
    }

    #[test]
    fn test_empty_filter_has_no_params() {
        let filter = MatchFilter::default();
        assert!(filter.query_params().is_empty());
    }

    #[test]
    fn test_filter_params_use_upstream_names() {
        let filter = MatchFilter {
            status: Some(MatchStatus::Finished),
            date_from: NaiveDate::from_ymd_opt(2026, 8, 1),
            date_to: NaiveDate::from_ymd_opt(2026, 8, 31),
        };

        let params = filter.query_params();
        assert_eq!(
            params,
            vec![
                ("status", "FINISHED".to_string()),
                ("dateFrom", "2026-08-01".to_string()),
                ("dateTo", "2026-08-31".to_string()),
            ]
        );
    }

    #[test]
    fn test_filter_key_participation() {
        let base = MatchFilter::default()
            .apply_key(KeyBuilder::new("team").push(42).push("matches"))
            .build();
        assert_eq!(base, "team_42_matches");

        let filtered = MatchFilter {
            status: Some(MatchStatus::Scheduled),
            date_from: NaiveDate::from_ymd_opt(2026, 8, 1),
            date_to: None,
        }
        .apply_key(KeyBuilder::new("team").push(42).push("matches"))
        .build();
        assert_eq!(filtered, "team_42_matches_status_scheduled_from_2026-08-01");
    }

    #[test]
    fn test_competition_roundtrip() {
        let competition = Competition {
            id: 2021,
            name: "Premier League".to_string(),
            code: Some("PL".to_string()),
            emblem: None,
            area: Some(Area {
                id: Some(2072),
                name: "England".to_string(),
                code: Some("ENG".to_string()),
                flag: None,
            }),
            current_season: None,
        };

        let json = serde_json::to_string(&competition).expect("Failed to serialize Competition");
        let parsed: Competition = serde_json::from_str(&json).expect("Failed to deserialize Competition");

        assert_eq!(parsed.id, 2021);
        assert_eq!(parsed.code.as_deref(), Some("PL"));
        assert_eq!(parsed.area.unwrap().name, "England");
    }
}
