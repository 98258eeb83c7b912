//! Backend profiles: legacy key-based API vs token-based MCP endpoint.
//!
//! The two profiles are interchangeable from the client's point of view;
//! they differ in base URL, credential header, and the search route name.
//! Each front end selects its profile explicitly, never both.

use reqwest::RequestBuilder;

/// How the credential is attached to outbound requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// Legacy API: `X-API-KEY: <key>`.
    ApiKey(String),
    /// MCP endpoint: `Authorization: Bearer <token>`.
    Bearer(String),
}

/// A marketplace backend: base URL, credential scheme, and route spelling.
#[derive(Debug, Clone)]
pub struct MarketProfile {
    base: String,
    auth: AuthScheme,
    search_path: &'static str,
}

impl MarketProfile {
    /// Legacy key-based API profile. Search lives at `/assets`.
    pub fn legacy(base: &str, api_key: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            auth: AuthScheme::ApiKey(api_key.to_string()),
            search_path: "/assets",
        }
    }

    /// Token-based MCP profile. The base template's `{token}` placeholder is
    /// filled with the access token (the MCP URL embeds it as a path
    /// segment); search lives at `/search`.
    pub fn mcp(base_template: &str, access_token: &str) -> Self {
        let base = base_template.replace("{token}", access_token);
        Self {
            base: base.trim_end_matches('/').to_string(),
            auth: AuthScheme::Bearer(access_token.to_string()),
            search_path: "/search",
        }
    }

    pub fn collection_url(&self, slug: &str) -> String {
        format!("{}/collection/{}", self.base, slug)
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base, self.search_path)
    }

    pub fn wallet_url(&self, address: &str) -> String {
        format!("{}/wallet/{}", self.base, address)
    }

    pub fn trending_url(&self) -> String {
        format!("{}/trending", self.base)
    }

    pub fn auth(&self) -> &AuthScheme {
        &self.auth
    }

    /// Attach this profile's credential header to a request.
    pub(crate) fn apply_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            AuthScheme::ApiKey(key) => req.header("X-API-KEY", key),
            AuthScheme::Bearer(token) => req.bearer_auth(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_urls() {
        let p = MarketProfile::legacy("https://api.opensea.io/api/v1", "key123");
        assert_eq!(
            p.collection_url("azuki"),
            "https://api.opensea.io/api/v1/collection/azuki"
        );
        assert_eq!(p.search_url(), "https://api.opensea.io/api/v1/assets");
        assert_eq!(
            p.wallet_url("0xabc"),
            "https://api.opensea.io/api/v1/wallet/0xabc"
        );
        assert_eq!(p.trending_url(), "https://api.opensea.io/api/v1/trending");
        assert_eq!(p.auth(), &AuthScheme::ApiKey("key123".to_string()));
    }

    #[test]
    fn test_mcp_base_embeds_token() {
        let p = MarketProfile::mcp("https://mcp.opensea.io/{token}/mcp", "tok-42");
        assert_eq!(
            p.trending_url(),
            "https://mcp.opensea.io/tok-42/mcp/trending"
        );
        assert_eq!(p.search_url(), "https://mcp.opensea.io/tok-42/mcp/search");
        assert_eq!(p.auth(), &AuthScheme::Bearer("tok-42".to_string()));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let p = MarketProfile::legacy("https://example.test/v1/", "k");
        assert_eq!(p.trending_url(), "https://example.test/v1/trending");
    }

    #[test]
    fn test_search_route_differs_per_profile() {
        let legacy = MarketProfile::legacy("https://a.test", "k");
        let mcp = MarketProfile::mcp("https://b.test/{token}", "t");
        assert!(legacy.search_url().ends_with("/assets"));
        assert!(mcp.search_url().ends_with("/search"));
    }
}
