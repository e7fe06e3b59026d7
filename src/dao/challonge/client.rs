use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::dao::{
    bracket::{BracketClient, RemoteResult},
    models::{MatchId, Participant, ParticipantId, RawMatch},
};

use super::{
    config::ChallongeConfig,
    error::{ChallongeError, ChallongeResult},
    models::{ErrorsResponse, MatchEnvelope, MatchUpdate, MatchUpdateRequest, ParticipantEnvelope},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Challonge v1 REST client scoped to a single tournament.
#[derive(Clone)]
pub struct ChallongeClient {
    client: Client,
    base_url: Arc<str>,
    tournament: Arc<str>,
    auth: (Arc<str>, Arc<str>),
}

impl ChallongeClient {
    /// Build a client; no request is sent until the first operation.
    pub fn new(config: ChallongeConfig) -> ChallongeResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ChallongeError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            tournament: Arc::from(config.tournament),
            auth: (Arc::from(config.username), Arc::from(config.api_key)),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/tournaments/{}/{}", self.base_url, self.tournament, path);
        let (user, key) = &self.auth;
        self.client
            .request(method, url)
            .basic_auth(user.as_ref(), Some(key.as_ref()))
    }

    async fn get_list<T>(&self, path: &str) -> ChallongeResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(|source| ChallongeError::RequestSend {
                path: path.to_string(),
                source,
            })?;

        let response = check_status(path, response).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|source| ChallongeError::DecodeResponse {
                path: path.to_string(),
                source,
            })
    }

    async fn fetch_participants(&self) -> ChallongeResult<Vec<Participant>> {
        let envelopes = self
            .get_list::<ParticipantEnvelope>("participants.json")
            .await?;
        Ok(envelopes
            .into_iter()
            .map(|envelope| envelope.participant.into())
            .collect())
    }

    async fn fetch_matches(&self) -> ChallongeResult<Vec<RawMatch>> {
        let envelopes = self.get_list::<MatchEnvelope>("matches.json").await?;
        Ok(envelopes
            .into_iter()
            .map(|envelope| envelope.body.into())
            .collect())
    }

    async fn update_match(
        &self,
        match_id: MatchId,
        scores_csv: String,
        winner_id: ParticipantId,
    ) -> ChallongeResult<()> {
        let path = format!("matches/{match_id}.json");
        let body = MatchUpdateRequest {
            body: MatchUpdate {
                scores_csv,
                winner_id: winner_id.0,
            },
        };

        let response = self
            .request(Method::PUT, &path)
            .json(&body)
            .send()
            .await
            .map_err(|source| ChallongeError::RequestSend {
                path: path.clone(),
                source,
            })?;

        check_status(&path, response).await?;
        debug!(%match_id, %winner_id, "match result accepted by Challonge");
        Ok(())
    }
}

/// Turn a non-success response into a typed error, reading Challonge's
/// `errors` list when the request itself was refused.
async fn check_status(path: &str, response: Response) -> ChallongeResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let messages = if is_rejection(status) {
        response
            .json::<ErrorsResponse>()
            .await
            .unwrap_or_default()
            .errors
    } else {
        Vec::new()
    };
    Err(status_error(path, status, messages))
}

fn is_rejection(status: StatusCode) -> bool {
    status.is_client_error() && !matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Credentials and server faults are transport problems, every other client
/// error is a rejection of the request itself.
fn status_error(path: &str, status: StatusCode, messages: Vec<String>) -> ChallongeError {
    let path = path.to_string();
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        ChallongeError::Unauthorized { path, status }
    } else if is_rejection(status) {
        ChallongeError::Rejected {
            path,
            status,
            messages,
        }
    } else {
        ChallongeError::RequestStatus { path, status }
    }
}

impl BracketClient for ChallongeClient {
    fn list_participants(&self) -> BoxFuture<'static, RemoteResult<Vec<Participant>>> {
        let client = self.clone();
        Box::pin(async move { client.fetch_participants().await.map_err(Into::into) })
    }

    fn list_matches(&self) -> BoxFuture<'static, RemoteResult<Vec<RawMatch>>> {
        let client = self.clone();
        Box::pin(async move { client.fetch_matches().await.map_err(Into::into) })
    }

    fn submit_result(
        &self,
        match_id: MatchId,
        scores_csv: String,
        winner_id: ParticipantId,
    ) -> BoxFuture<'static, RemoteResult<()>> {
        let client = self.clone();
        Box::pin(async move {
            client
                .update_match(match_id, scores_csv, winner_id)
                .await
                .map_err(Into::into)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::bracket::RemoteError;

    fn remote(status: StatusCode) -> RemoteError {
        status_error("matches/7.json", status, vec!["Score is invalid".into()]).into()
    }

    #[test]
    fn credential_failures_are_transport_errors() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            assert!(matches!(
                status_error("matches.json", status, Vec::new()),
                ChallongeError::Unauthorized { .. }
            ));
            assert!(matches!(remote(status), RemoteError::Transport { .. }), "{status}");
        }
    }

    #[test]
    fn server_faults_are_transport_errors() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            assert!(matches!(remote(status), RemoteError::Transport { .. }), "{status}");
        }
    }

    #[test]
    fn other_client_errors_are_rejections_with_messages() {
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::UNPROCESSABLE_ENTITY,
            StatusCode::BAD_REQUEST,
        ] {
            let RemoteError::Rejected { message } = remote(status) else {
                panic!("{status} should be a rejection");
            };
            assert!(message.contains("Score is invalid"), "{message}");
            assert!(message.contains("matches/7.json"), "{message}");
        }
    }

    #[test]
    fn redirects_are_unexpected_statuses() {
        assert!(matches!(
            status_error("matches.json", StatusCode::FOUND, Vec::new()),
            ChallongeError::RequestStatus { .. }
        ));
    }
}
