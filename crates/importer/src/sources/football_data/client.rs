use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{CompetitionRecord, SquadMember, SquadResponse, TeamRecord, TeamsResponse};
use crate::error::{ImporterError, Result};
use crate::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v2";
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Client for the three football-data.org resources an import needs.
///
/// It holds no credential: every call takes the caller's token and sends it
/// as the `X-Auth-Token` header.
pub struct FootballDataClient {
    base_url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl FootballDataClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .user_agent(concat!("league-importer/", env!("CARGO_PKG_VERSION")))
                .build()?,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn fetch_competition(
        &self,
        code: &str,
        token: Option<&str>,
    ) -> Result<CompetitionRecord> {
        let url = format!("{}/competitions/{}", self.base_url, code);
        let response = self.get(&url, token).await?;

        match response.status() {
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                Err(ImporterError::CompetitionNotFound(code.to_string()))
            }
            status if !status.is_success() => Err(ImporterError::UpstreamStatus { url, status }),
            _ => decode(response).await,
        }
    }

    /// Takes the numeric competition id; the teams endpoint rejects codes.
    pub async fn fetch_teams(
        &self,
        competition_id: i64,
        token: Option<&str>,
    ) -> Result<Vec<TeamRecord>> {
        let url = format!("{}/competitions/{}/teams", self.base_url, competition_id);
        let response = self.get(&url, token).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImporterError::TeamsFetchError {
                competition_id,
                status,
            });
        }

        let teams: TeamsResponse = decode(response).await?;
        Ok(teams.teams)
    }

    pub async fn fetch_squad(&self, team_id: i64, token: Option<&str>) -> Result<Vec<SquadMember>> {
        let url = format!("{}/teams/{}", self.base_url, team_id);
        let response = self.get(&url, token).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImporterError::TeamFetchError { team_id, status });
        }

        let team: SquadResponse = decode(response).await?;
        Ok(team.squad)
    }

    async fn get(&self, url: &str, token: Option<&str>) -> Result<reqwest::Response> {
        debug!("GET {}", url);
        self.retry
            .run(move || async move {
                let mut request = self.client.get(url).header(ACCEPT, "application/json");
                if let Some(token) = token {
                    request = request.header(AUTH_HEADER, token);
                }
                request.send().await.map_err(ImporterError::from)
            })
            .await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> FootballDataClient {
        FootballDataClient::with_base_url(server.uri())
            .unwrap()
            .with_retry_policy(RetryPolicy::new(5, Duration::ZERO))
    }

    #[tokio::test]
    async fn sends_the_callers_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/competitions/ELC"))
            .and(header(AUTH_HEADER, "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 2016,
                "name": "Championship",
                "code": "ELC",
                "area": { "name": "England" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let competition = client_for(&server)
            .fetch_competition("ELC", Some("secret"))
            .await
            .unwrap();

        assert_eq!(competition.id, 2016);
        assert_eq!(competition.area.unwrap().name, "England");
    }

    #[tokio::test]
    async fn bad_request_and_not_found_mean_unknown_competition() {
        let server = MockServer::start().await;
        Mock::given(path("/competitions/SOMEBADCODE"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;
        Mock::given(path("/competitions/GONE"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);

        assert!(matches!(
            client.fetch_competition("SOMEBADCODE", None).await,
            Err(ImporterError::CompetitionNotFound(code)) if code == "SOMEBADCODE"
        ));
        assert!(matches!(
            client.fetch_competition("GONE", None).await,
            Err(ImporterError::CompetitionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn other_competition_failures_are_generic() {
        let server = MockServer::start().await;
        Mock::given(path("/competitions/ELC"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_competition("ELC", None)
            .await
            .unwrap_err();

        assert!(matches!(
            &err,
            ImporterError::UpstreamStatus { status, .. } if *status == StatusCode::FORBIDDEN
        ));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn retries_through_four_rate_limits() {
        let server = MockServer::start().await;
        Mock::given(path("/competitions/2016/teams"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(4)
            .expect(4)
            .mount(&server)
            .await;
        Mock::given(path("/competitions/2016/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "teams": [{ "id": 1, "name": "Leeds United FC", "tla": "LEE" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let teams = client_for(&server).fetch_teams(2016, None).await.unwrap();

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].tla.as_deref(), Some("LEE"));
    }

    #[tokio::test]
    async fn teams_failures_carry_the_competition_id() {
        let server = MockServer::start().await;
        Mock::given(path("/competitions/2016/teams"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_teams(2016, None).await.unwrap_err();

        assert!(matches!(
            &err,
            ImporterError::TeamsFetchError { competition_id: 2016, status }
                if *status == StatusCode::FORBIDDEN
        ));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn five_rate_limits_exhaust_the_retries() {
        let server = MockServer::start().await;
        Mock::given(path("/teams/7"))
            .respond_with(ResponseTemplate::new(429))
            .expect(5)
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_squad(7, None).await.unwrap_err();

        assert!(matches!(err, ImporterError::RetryExhausted { attempts: 5 }));
    }

    #[tokio::test]
    async fn squad_failures_carry_the_team_id() {
        let server = MockServer::start().await;
        Mock::given(path("/teams/42"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_squad(42, None).await.unwrap_err();

        assert!(matches!(err, ImporterError::TeamFetchError { team_id: 42, .. }));
    }
}
