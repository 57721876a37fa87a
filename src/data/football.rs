//! football-data.org API client
//!
//! This module provides the client for the football-data.org v4 API. Every
//! request goes through the response cache: fresh entries are served without
//! touching the network, successful fetches refresh the cache with the TTL
//! of the resource's category, and upstream failures fall back to stale
//! entries when any exist.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::cache::{fetch_with_cache, KeyBuilder, ResourceCategory, ResponseCache};

use super::{
    CompetitionList, Competition, MatchFilter, MatchList, Person, ScorersResponse,
    SquadMember, StandingsResponse, Team, TeamList,
};

/// Base URL for the football-data.org v4 API
const FOOTBALL_DATA_BASE_URL: &str = "https://api.football-data.org/v4";

/// Header carrying the API token
const AUTH_HEADER: &str = "X-Auth-Token";

/// Errors that can occur when fetching football data
#[derive(Debug, Error)]
pub enum FootballError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for the football-data.org API with response caching
///
/// The client holds a handle to the shared [`ResponseCache`]; all lookups
/// follow the fetch-through protocol in [`crate::cache::policy`]. An API
/// token is optional — without one the request is sent unauthenticated and
/// the upstream rejection flows through the ordinary failure path, which
/// falls back to cached data when any exists.
#[derive(Debug, Clone)]
pub struct FootballClient {
    http_client: Client,
    cache: ResponseCache,
    base_url: String,
    api_token: Option<String>,
}

impl FootballClient {
    /// Creates a new client sharing the given cache
    pub fn new(cache: ResponseCache, api_token: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            base_url: FOOTBALL_DATA_BASE_URL.to_string(),
            api_token,
        }
    }

    /// Creates a client pointed at a custom base URL (for testing)
    #[cfg(test)]
    fn with_base_url(cache: ResponseCache, base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            base_url: base_url.into(),
            api_token: None,
        }
    }

    /// Lists all available competitions
    pub async fn competitions(&self) -> Result<CompetitionList, FootballError> {
        let key = KeyBuilder::new("leagues").build();
        self.cached(&key, ResourceCategory::Leagues, "/competitions", Vec::new()).await
    }

    /// Fetches one competition by id or code (e.g., "2021" or "PL")
    pub async fn competition(&self, id: &str) -> Result<Competition, FootballError> {
        let key = KeyBuilder::new("league").push(id).build();
        let path = format!("/competitions/{id}");
        self.cached(&key, ResourceCategory::Leagues, &path, Vec::new()).await
    }

    /// Fetches the current standings of a competition
    pub async fn standings(&self, id: &str) -> Result<StandingsResponse, FootballError> {
        let key = KeyBuilder::new("league").push(id).push("standings").build();
        let path = format!("/competitions/{id}/standings");
        self.cached(&key, ResourceCategory::Standings, &path, Vec::new()).await
    }

    /// Fetches a competition's top scorers
    ///
    /// `limit` is passed through to the API when set; it changes the
    /// response, so it participates in the cache key.
    pub async fn scorers(&self, id: &str, limit: Option<u32>) -> Result<ScorersResponse, FootballError> {
        let key = KeyBuilder::new("league")
            .push(id)
            .push("scorers")
            .param("limit", limit)
            .build();
        let path = format!("/competitions/{id}/scorers");
        let mut params = Vec::new();
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        self.cached(&key, ResourceCategory::Scorers, &path, params).await
    }

    /// Fetches a competition's matches, optionally narrowed by a filter
    pub async fn competition_matches(
        &self,
        id: &str,
        filter: &MatchFilter,
    ) -> Result<MatchList, FootballError> {
        let key = filter
            .apply_key(KeyBuilder::new("league").push(id).push("matches"))
            .build();
        let path = format!("/competitions/{id}/matches");
        self.cached(&key, ResourceCategory::Matches, &path, filter.query_params()).await
    }

    /// Lists the teams participating in a competition
    pub async fn teams(&self, id: &str) -> Result<TeamList, FootballError> {
        let key = KeyBuilder::new("league").push(id).push("teams").build();
        let path = format!("/competitions/{id}/teams");
        self.cached(&key, ResourceCategory::Teams, &path, Vec::new()).await
    }

    /// Fetches one team by id, including its squad
    pub async fn team(&self, id: u64) -> Result<Team, FootballError> {
        let key = KeyBuilder::new("team").push(id).build();
        let path = format!("/teams/{id}");
        self.cached(&key, ResourceCategory::Teams, &path, Vec::new()).await
    }

    /// Fetches a team's matches, optionally narrowed by a filter
    pub async fn team_matches(&self, id: u64, filter: &MatchFilter) -> Result<MatchList, FootballError> {
        let key = filter
            .apply_key(KeyBuilder::new("team").push(id).push("matches"))
            .build();
        let path = format!("/teams/{id}/matches");
        self.cached(&key, ResourceCategory::Matches, &path, filter.query_params()).await
    }

    /// Fetches one player by id
    pub async fn person(&self, id: u64) -> Result<Person, FootballError> {
        let key = KeyBuilder::new("player").push(id).build();
        let path = format!("/persons/{id}");
        self.cached(&key, ResourceCategory::Players, &path, Vec::new()).await
    }

    /// Lists the players of a team
    ///
    /// The upstream API has no squad endpoint; the squad is embedded in the
    /// team resource, so this shares the team's cache entry rather than
    /// creating a second one for the same upstream request.
    pub async fn squad(&self, team_id: u64) -> Result<Vec<SquadMember>, FootballError> {
        let team = self.team(team_id).await?;
        Ok(team.squad)
    }

    /// Runs one upstream request through the cache
    async fn cached<T>(
        &self,
        key: &str,
        category: ResourceCategory,
        path: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T, FootballError>
    where
        T: Serialize + DeserializeOwned,
    {
        fetch_with_cache(&self.cache, key, category.ttl(), || {
            self.fetch_json(path, params)
        })
        .await
    }

    /// Performs the actual API request
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T, FootballError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http_client.get(&url);
        if !params.is_empty() {
            request = request.query(&params);
        }
        if let Some(token) = &self.api_token {
            request = request.header(AUTH_HEADER, token.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FootballError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MatchStatus;
    use chrono::{Duration, NaiveDate};

    /// Base URL no server listens on; requests fail fast with a connect error
    const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:9/v4";

    /// Sample /competitions response
    const COMPETITIONS_RESPONSE: &str = r#"{
        "count": 2,
        "competitions": [
            {
                "id": 2021,
                "name": "Premier League",
                "code": "PL",
                "emblem": "https://crests.football-data.org/PL.png",
                "area": { "id": 2072, "name": "England", "code": "ENG", "flag": null },
                "currentSeason": {
                    "id": 1564,
                    "startDate": "2025-08-15",
                    "endDate": "2026-05-24",
                    "currentMatchday": 1
                }
            },
            {
                "id": 2014,
                "name": "Primera Division",
                "code": "PD",
                "emblem": null,
                "area": { "id": 2224, "name": "Spain", "code": "ESP", "flag": null },
                "currentSeason": null
            }
        ]
    }"#;

    /// Sample /competitions/{id}/standings response
    const STANDINGS_RESPONSE: &str = r#"{
        "competition": { "id": 2021, "name": "Premier League", "code": "PL", "emblem": null },
        "season": { "id": 1564, "startDate": "2025-08-15", "endDate": "2026-05-24", "currentMatchday": 1 },
        "standings": [
            {
                "stage": "REGULAR_SEASON",
                "type": "TOTAL",
                "group": null,
                "table": [
                    {
                        "position": 1,
                        "team": { "id": 57, "name": "Arsenal FC", "shortName": "Arsenal", "tla": "ARS", "crest": null },
                        "playedGames": 1,
                        "won": 1,
                        "draw": 0,
                        "lost": 0,
                        "points": 3,
                        "goalsFor": 2,
                        "goalsAgainst": 0,
                        "goalDifference": 2
                    }
                ]
            }
        ]
    }"#;

    /// Sample /competitions/{id}/scorers response
    const SCORERS_RESPONSE: &str = r#"{
        "competition": { "id": 2021, "name": "Premier League", "code": "PL", "emblem": null },
        "season": null,
        "scorers": [
            {
                "player": { "id": 129744, "name": "Erling Haaland", "nationality": "Norway", "position": "Centre-Forward" },
                "team": { "id": 65, "name": "Manchester City FC", "shortName": "Man City", "tla": "MCI", "crest": null },
                "playedMatches": 30,
                "goals": 27,
                "assists": 5,
                "penalties": 6
            }
        ]
    }"#;

    /// Sample /teams/{id} response
    const TEAM_RESPONSE: &str = r#"{
        "id": 57,
        "name": "Arsenal FC",
        "shortName": "Arsenal",
        "tla": "ARS",
        "crest": "https://crests.football-data.org/57.png",
        "address": "75 Drayton Park London N5 1BU",
        "website": "http://www.arsenal.com",
        "founded": 1886,
        "clubColors": "Red / White",
        "venue": "Emirates Stadium",
        "area": { "id": 2072, "name": "England", "code": "ENG", "flag": null },
        "coach": { "id": 11603, "name": "Mikel Arteta", "nationality": "Spain" },
        "squad": [
            { "id": 5530, "name": "David Raya", "position": "Goalkeeper", "dateOfBirth": "1995-09-15", "nationality": "Spain" },
            { "id": 7869, "name": "Martin Ødegaard", "position": "Attacking Midfield", "dateOfBirth": "1998-12-17", "nationality": "Norway" }
        ]
    }"#;

    /// Sample matches response
    const MATCHES_RESPONSE: &str = r#"{
        "matches": [
            {
                "id": 497568,
                "utcDate": "2026-08-07T19:00:00Z",
                "status": "FINISHED",
                "matchday": 1,
                "homeTeam": { "id": 57, "name": "Arsenal FC", "shortName": "Arsenal", "tla": "ARS", "crest": null },
                "awayTeam": { "id": 61, "name": "Chelsea FC", "shortName": "Chelsea", "tla": "CHE", "crest": null },
                "score": {
                    "winner": "HOME_TEAM",
                    "fullTime": { "home": 2, "away": 1 },
                    "halfTime": { "home": 1, "away": 0 }
                },
                "competition": { "id": 2021, "name": "Premier League", "code": "PL", "emblem": null }
            }
        ]
    }"#;

    #[test]
    fn test_parse_competitions_response() {
        let list: CompetitionList =
            serde_json::from_str(COMPETITIONS_RESPONSE).expect("Failed to parse competitions");

        assert_eq!(list.count, Some(2));
        assert_eq!(list.competitions.len(), 2);

        let premier_league = &list.competitions[0];
        assert_eq!(premier_league.id, 2021);
        assert_eq!(premier_league.code.as_deref(), Some("PL"));
        assert_eq!(premier_league.area.as_ref().unwrap().name, "England");

        let season = premier_league.current_season.as_ref().unwrap();
        assert_eq!(season.start_date, NaiveDate::from_ymd_opt(2025, 8, 15));
        assert_eq!(season.current_matchday, Some(1));

        assert!(list.competitions[1].current_season.is_none());
    }

    #[test]
    fn test_parse_standings_response() {
        let standings: StandingsResponse =
            serde_json::from_str(STANDINGS_RESPONSE).expect("Failed to parse standings");

        assert_eq!(standings.standings.len(), 1);
        let table = &standings.standings[0];
        assert_eq!(table.table_type.as_deref(), Some("TOTAL"));

        let leader = &table.table[0];
        assert_eq!(leader.position, 1);
        assert_eq!(leader.team.name, "Arsenal FC");
        assert_eq!(leader.points, 3);
        assert_eq!(leader.goal_difference, 2);
    }

    #[test]
    fn test_parse_scorers_response() {
        let scorers: ScorersResponse =
            serde_json::from_str(SCORERS_RESPONSE).expect("Failed to parse scorers");

        assert_eq!(scorers.scorers.len(), 1);
        let top = &scorers.scorers[0];
        assert_eq!(top.player.name, "Erling Haaland");
        assert_eq!(top.team.tla.as_deref(), Some("MCI"));
        assert_eq!(top.goals, Some(27));
        assert_eq!(top.penalties, Some(6));
    }

    #[test]
    fn test_parse_team_response_with_squad() {
        let team: Team = serde_json::from_str(TEAM_RESPONSE).expect("Failed to parse team");

        assert_eq!(team.id, 57);
        assert_eq!(team.founded, Some(1886));
        assert_eq!(team.venue.as_deref(), Some("Emirates Stadium"));
        assert_eq!(team.coach.as_ref().unwrap().name.as_deref(), Some("Mikel Arteta"));

        assert_eq!(team.squad.len(), 2);
        assert_eq!(team.squad[0].name, "David Raya");
        assert_eq!(team.squad[0].position.as_deref(), Some("Goalkeeper"));
        assert_eq!(
            team.squad[1].date_of_birth,
            NaiveDate::from_ymd_opt(1998, 12, 17)
        );
    }

    #[test]
    fn test_team_without_squad_field_parses_empty() {
        let team: Team = serde_json::from_str(r#"{ "id": 90, "name": "Real Betis" }"#)
            .expect("Failed to parse minimal team");
        assert!(team.squad.is_empty());
    }

    #[test]
    fn test_parse_matches_response() {
        let matches: MatchList =
            serde_json::from_str(MATCHES_RESPONSE).expect("Failed to parse matches");

        assert_eq!(matches.matches.len(), 1);
        let m = &matches.matches[0];
        assert_eq!(m.status, MatchStatus::Finished);
        assert_eq!(m.home_team.name, "Arsenal FC");

        let score = m.score.as_ref().unwrap();
        assert_eq!(score.winner.as_deref(), Some("HOME_TEAM"));
        assert_eq!(score.full_time.as_ref().unwrap().home, Some(2));
    }

    #[test]
    fn test_parse_malformed_json_fails() {
        let result: Result<CompetitionList, _> = serde_json::from_str("{ invalid json }");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fresh_cache_hit_skips_network() {
        let cache = ResponseCache::new();
        let list: CompetitionList = serde_json::from_str(COMPETITIONS_RESPONSE).unwrap();
        cache.write("leagues", &list, Duration::hours(24)).unwrap();

        // The base URL is unreachable, so any network attempt would error
        let client = FootballClient::with_base_url(cache, UNREACHABLE_BASE_URL);
        let result = client.competitions().await.expect("Fresh hit should not touch the network");

        assert_eq!(result.competitions.len(), 2);
    }

    #[tokio::test]
    async fn test_stale_fallback_on_upstream_failure() {
        let cache = ResponseCache::new();
        let team: Team = serde_json::from_str(TEAM_RESPONSE).unwrap();

        // Expired entry under the team's key
        cache.write("team_57", &team, Duration::seconds(-60)).unwrap();

        let client = FootballClient::with_base_url(cache, UNREACHABLE_BASE_URL);
        let result = client.team(57).await.expect("Stale entry should be served on upstream failure");

        assert_eq!(result.name, "Arsenal FC");
    }

    #[tokio::test]
    async fn test_total_miss_propagates_upstream_error() {
        let cache = ResponseCache::new();
        let client = FootballClient::with_base_url(cache, UNREACHABLE_BASE_URL);

        let result = client.team(57).await;

        assert!(matches!(result, Err(FootballError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_squad_shares_team_cache_entry() {
        let cache = ResponseCache::new();
        let team: Team = serde_json::from_str(TEAM_RESPONSE).unwrap();
        cache.write("team_57", &team, Duration::hours(24)).unwrap();

        let client = FootballClient::with_base_url(cache.clone(), UNREACHABLE_BASE_URL);
        let squad = client.squad(57).await.expect("Squad should come from the team entry");

        assert_eq!(squad.len(), 2);
        assert_eq!(squad[1].name, "Martin Ødegaard");

        // No second entry was created for the squad lookup
        assert_eq!(cache.stats().total_items, 1);
    }

    #[tokio::test]
    async fn test_distinct_filters_use_distinct_entries() {
        let cache = ResponseCache::new();
        let matches: MatchList = serde_json::from_str(MATCHES_RESPONSE).unwrap();

        let finished = MatchFilter {
            status: Some(MatchStatus::Finished),
            ..Default::default()
        };
        let key = finished
            .apply_key(KeyBuilder::new("team").push(57).push("matches"))
            .build();
        cache.write(&key, &matches, Duration::hours(1)).unwrap();

        let client = FootballClient::with_base_url(cache, UNREACHABLE_BASE_URL);

        // The cached FINISHED listing is served without network access
        let hit = client.team_matches(57, &finished).await.unwrap();
        assert_eq!(hit.matches.len(), 1);

        // A different filter is a different request identity: total miss
        let scheduled = MatchFilter {
            status: Some(MatchStatus::Scheduled),
            ..Default::default()
        };
        let miss = client.team_matches(57, &scheduled).await;
        assert!(matches!(miss, Err(FootballError::RequestFailed(_))));
    }
}
