//! Client for the GitHub contents API.
//!
//! Treats `waitlist/waitlist.json` in the configured repository as a tiny
//! document store: load the whole array, append, write the whole array back.
//! Updating an existing file requires sending its current blob sha; omitting
//! the sha tells the API to create the file.

use base64::Engine;
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::GithubConfig;
use crate::error::{Result, ServiceError};
use crate::models::WaitlistEntry;

/// Repo-relative path of the waitlist file
const WAITLIST_PATH: &str = "waitlist/waitlist.json";

/// Timestamp format for `submitted_at`
pub const SUBMITTED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Client for reading and writing the waitlist file in a GitHub repository
pub struct GithubService {
    token: String,
    base_url: String,
    http_client: Client,
}

/// File metadata and content as returned by the contents API
#[derive(Debug, Deserialize)]
struct ContentsFile {
    content: String,
    sha: String,
}

impl GithubService {
    pub fn new(config: &GithubConfig) -> Self {
        Self {
            token: config.token.clone(),
            base_url: format!(
                "https://api.github.com/repos/{}/{}/contents",
                config.repo_owner, config.repo_name
            ),
            http_client: Client::new(),
        }
    }

    fn waitlist_url(&self) -> String {
        format!("{}/{}", self.base_url, WAITLIST_PATH)
    }

    /// The API rejects requests without a User-Agent, so every request
    /// carries one alongside the auth and accept headers.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header(
                "User-Agent",
                concat!("launchlist/", env!("CARGO_PKG_VERSION")),
            )
    }

    /// Fetch a contents URL. `None` on 404; any other non-success status is
    /// an error carrying the status code and response body.
    async fn get_file(&self, url: &str) -> Result<Option<ContentsFile>> {
        let response = self.request(Method::GET, url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::GitHubApi { status, body });
        }

        Ok(Some(response.json().await?))
    }

    /// Load the waitlist. A missing file is an empty waitlist, not an error.
    pub async fn load_waitlist(&self) -> Result<Vec<WaitlistEntry>> {
        let file = match self.get_file(&self.waitlist_url()).await? {
            Some(file) => file,
            None => {
                debug!("{} does not exist yet, starting empty", WAITLIST_PATH);
                return Ok(Vec::new());
            }
        };

        decode_entries(&file.content)
    }

    /// Overwrite the remote file with the full entry list.
    ///
    /// Fetches the current sha first, tolerating 404 (no sha means the PUT
    /// creates the file).
    pub async fn save_waitlist(&self, entries: &[WaitlistEntry]) -> Result<()> {
        let url = self.waitlist_url();
        let sha = self.get_file(&url).await?.map(|file| file.sha);

        let mut payload = json!({
            "message": "Update waitlist.json",
            "content": encode_entries(entries)?,
        });
        if let Some(sha) = sha {
            payload["sha"] = json!(sha);
        }

        let response = self.request(Method::PUT, &url).json(&payload).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::GitHubApi { status, body });
        }

        Ok(())
    }

    /// Append one entry, stamping its submission time.
    ///
    /// Load-modify-save without locking: two racing appends can both read
    /// the same prior state and the later save wins, dropping the earlier
    /// entry. Accepted at this traffic level; a 409 on sha mismatch is
    /// surfaced to the caller, not retried.
    pub async fn add_waitlist_entry(&self, mut entry: WaitlistEntry) -> Result<()> {
        let mut entries = self.load_waitlist().await?;

        entry.submitted_at = Utc::now().format(SUBMITTED_AT_FORMAT).to_string();
        entries.push(entry);

        self.save_waitlist(&entries).await?;
        info!("Waitlist now has {} entries", entries.len());
        Ok(())
    }
}

/// Decode a contents API payload into entries. The API line-wraps the
/// base64 it returns, so whitespace is stripped before decoding.
fn decode_entries(content: &str) -> Result<Vec<WaitlistEntry>> {
    let stripped: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(stripped)
        .map_err(|source| ServiceError::ContentDecode { source })?;

    Ok(serde_json::from_slice(&bytes)?)
}

/// Pretty-print the entries and base64-encode them for the PUT payload
fn encode_entries(entries: &[WaitlistEntry]) -> Result<String> {
    let serialized = serde_json::to_string_pretty(entries)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(serialized))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(email: &str) -> WaitlistEntry {
        WaitlistEntry {
            name: String::new(),
            email: email.to_string(),
            plan: String::new(),
            problem: String::new(),
            urgency: String::new(),
            current_tool: String::new(),
            willing_to_pay: String::new(),
            commitments: Vec::new(),
            note: String::new(),
            submitted_at: String::new(),
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let entries = vec![entry("a@b.com"), entry("c@d.com")];

        let encoded = encode_entries(&entries).unwrap();
        let decoded = decode_entries(&encoded).unwrap();

        assert_eq!(decoded, entries);
    }

    #[test]
    fn test_decode_handles_line_wrapped_base64() {
        // The contents API returns base64 broken into 60-character lines
        let encoded = encode_entries(&[entry("a@b.com")]).unwrap();
        let wrapped: String = encoded
            .as_bytes()
            .chunks(60)
            .map(|chunk| std::str::from_utf8(chunk).unwrap())
            .collect::<Vec<_>>()
            .join("\n");

        let decoded = decode_entries(&wrapped).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].email, "a@b.com");
    }

    #[test]
    fn test_decode_empty_array() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("[]");
        let decoded = decode_entries(&encoded).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let result = decode_entries("not base64!!!");
        assert!(matches!(result, Err(ServiceError::ContentDecode { .. })));
    }

    #[test]
    fn test_decode_rejects_non_json_content() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("not json");
        let result = decode_entries(&encoded);
        assert!(matches!(result, Err(ServiceError::Json { .. })));
    }

    #[test]
    fn test_encoded_content_is_pretty_printed() {
        let encoded = encode_entries(&[entry("a@b.com")]).unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        // 2-space indentation, one field per line
        assert!(text.starts_with("[\n  {\n"));
        assert!(text.contains("    \"email\": \"a@b.com\""));
    }

    #[test]
    fn test_submitted_at_format() {
        let stamp = Utc::now().format(SUBMITTED_AT_FORMAT).to_string();

        assert_eq!(stamp.len(), 20);
        assert!(stamp.ends_with('Z'));
        assert!(
            chrono::NaiveDateTime::parse_from_str(&stamp, SUBMITTED_AT_FORMAT).is_ok(),
            "stamp {stamp} should parse back with the same format"
        );
    }

    #[test]
    fn test_service_urls() {
        let service = GithubService::new(&GithubConfig {
            token: "t".to_string(),
            repo_owner: "acme".to_string(),
            repo_name: "site".to_string(),
        });

        assert_eq!(
            service.waitlist_url(),
            "https://api.github.com/repos/acme/site/contents/waitlist/waitlist.json"
        );
    }
}
