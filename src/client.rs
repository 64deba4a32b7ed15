use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{FolioError, Result};
use crate::session::Session;

/// Row ordering for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
}

impl Order {
    pub const NEWEST_FIRST: Order = Order {
        column: "created_at",
        ascending: false,
    };

    fn as_query(&self) -> String {
        let dir = if self.ascending { "asc" } else { "desc" };
        format!("{}.{dir}", self.column)
    }
}

/// Table and storage operations the dashboard needs from the hosted backend.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn select<T: DeserializeOwned>(&self, table: &str, order: Order) -> Result<Vec<T>>;

    async fn insert(&self, table: &str, record: &Value) -> Result<()>;

    async fn update(&self, table: &str, id: i64, record: &Value) -> Result<()>;

    async fn delete(&self, table: &str, id: i64) -> Result<()>;

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;

    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Supabase REST client: PostgREST for tables, Storage for buckets, GoTrue for login.
pub struct SupabaseClient {
    http: Client,
    base: String,
    anon_key: String,
    access_token: Option<String>,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    message: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
    user: Option<TokenUser>,
}

#[derive(Deserialize)]
struct TokenUser {
    email: Option<String>,
}

impl SupabaseClient {
    pub fn new(url: Url, anon_key: String, access_token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base: url.as_str().trim_end_matches('/').to_string(),
            anon_key,
            access_token,
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    /// Exchange email and password for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .http
            .post(format!("{}/auth/v1/token", self.base))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let message = error_message(response).await;
            return Err(FolioError::LoginFailed(message));
        }

        let token: TokenResponse = response.json().await?;
        let email = token
            .user
            .and_then(|u| u.email)
            .unwrap_or_else(|| email.to_string());

        Ok(Session::new(token.access_token, email, token.expires_in))
    }

    /// Mutations ask for the affected rows back so a missing id can be reported.
    async fn expect_rows(response: Response, table: &str, id: i64) -> Result<()> {
        let response = check(response).await?;
        let rows: Vec<Value> = response.json().await?;
        if rows.is_empty() {
            return Err(FolioError::NotFound {
                what: format!("Row in {table}"),
                id,
            });
        }
        Ok(())
    }
}

impl Backend for SupabaseClient {
    async fn select<T: DeserializeOwned>(&self, table: &str, order: Order) -> Result<Vec<T>> {
        tracing::debug!(table, order = %order.as_query(), "select");

        let response = self
            .authed(self.http.get(self.rest_url(table)))
            .query(&[("select", "*".to_string()), ("order", order.as_query())])
            .send()
            .await?;

        let response = check(response).await?;
        Ok(response.json().await?)
    }

    async fn insert(&self, table: &str, record: &Value) -> Result<()> {
        tracing::debug!(table, "insert");

        let response = self
            .authed(self.http.post(self.rest_url(table)))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        check(response).await.map(|_| ())
    }

    async fn update(&self, table: &str, id: i64, record: &Value) -> Result<()> {
        tracing::debug!(table, id, "update");

        let response = self
            .authed(self.http.patch(self.rest_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        Self::expect_rows(response, table, id).await
    }

    async fn delete(&self, table: &str, id: i64) -> Result<()> {
        tracing::debug!(table, id, "delete");

        let response = self
            .authed(self.http.delete(self.rest_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .send()
            .await?;

        Self::expect_rows(response, table, id).await
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        tracing::debug!(bucket, path, size = bytes.len(), "upload");

        let response = self
            .authed(
                self.http
                    .post(format!("{}/storage/v1/object/{bucket}/{path}", self.base)),
            )
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        check(response).await.map(|_| ())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base)
    }
}

async fn check(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let message = error_message(response).await;
    tracing::warn!(status, %message, "backend request failed");
    Err(FolioError::ApiError { status, message })
}

async fn error_message(response: Response) -> String {
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read response body>".to_string());
    parse_error_message(&body)
}

/// Pick the human-readable part of a PostgREST, Storage or GoTrue error body.
fn parse_error_message(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .or(parsed.error_description)
        .or(parsed.msg)
        .or(parsed.error)
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new(
            Url::parse("https://abcd.supabase.co/").unwrap(),
            "anon".into(),
            None,
        )
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            client().public_url("logo", "1700000000000-a.png"),
            "https://abcd.supabase.co/storage/v1/object/public/logo/1700000000000-a.png"
        );
    }

    #[test]
    fn test_rest_url() {
        assert_eq!(
            client().rest_url("projects"),
            "https://abcd.supabase.co/rest/v1/projects"
        );
    }

    #[test]
    fn test_order_query() {
        assert_eq!(Order::NEWEST_FIRST.as_query(), "created_at.desc");
        let by_title = Order {
            column: "title",
            ascending: true,
        };
        assert_eq!(by_title.as_query(), "title.asc");
    }

    #[test]
    fn test_parse_postgrest_error() {
        let body = r#"{"code":"23502","details":null,"hint":null,"message":"null value in column \"title\""}"#;
        assert_eq!(parse_error_message(body), "null value in column \"title\"");
    }

    #[test]
    fn test_parse_auth_errors() {
        assert_eq!(
            parse_error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            parse_error_message(r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
    }

    #[test]
    fn test_parse_non_json_error() {
        assert_eq!(parse_error_message("  Bad Gateway\n"), "Bad Gateway");
    }
}
