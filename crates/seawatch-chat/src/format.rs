//! Per-intent response formatting over marketplace JSON payloads.
//!
//! Every formatter is a pure, total function: fields are read through a
//! small [`View`] wrapper so missing or mistyped values degrade to "N/A"
//! (or a list default) in one declared place, and a payload whose root is
//! not a JSON object degrades to pretty-printed raw JSON under a labeled
//! heading. Formatting never fails.

use serde_json::Value;

use crate::types::Intent;

/// Marketplace site used for canonical collection URLs and asset links.
const MARKET_SITE: &str = "https://opensea.io";

/// Max description length before truncation.
const DESCRIPTION_LIMIT: usize = 200;

/// Canned help message rendered for [`Intent::Unknown`].
pub fn help_message() -> &'static str {
    "I can help you with NFT marketplace queries! Here are some examples:\n\n\
     - \"What's the floor price of Bored Ape Yacht Club?\"\n\
     - \"Search for CryptoPunks NFTs\"\n\
     - \"Show me wallet 0x1234...\"\n\
     - \"What are the trending collections?\"\n\n\
     What would you like to know about?"
}

/// Render the marketplace payload for the given intent as display text.
pub fn format_response(intent: &Intent, data: &Value) -> String {
    match intent {
        Intent::CollectionInfo { slug } => format_collection_info(data, slug),
        Intent::Search { terms, .. } => format_search_results(data, terms),
        Intent::WalletLookup { address } => format_wallet_info(data, address),
        Intent::Trending => format_trending(data),
        Intent::Unknown => help_message().to_string(),
    }
}

// =============================================================================
// View: defensive field access
// =============================================================================

/// A nil-propagating view over a JSON payload.
///
/// `get` on an absent key or non-object yields an absent view; terminal
/// accessors declare the default once for all formatters.
#[derive(Clone, Copy)]
struct View<'a>(Option<&'a Value>);

impl<'a> View<'a> {
    fn root(value: &'a Value) -> Self {
        View(Some(value))
    }

    fn get(self, key: &str) -> View<'a> {
        View(self.0.and_then(|v| v.get(key)))
    }

    /// String value, or the given default when absent or not a string.
    fn str_or(self, default: &'a str) -> &'a str {
        self.0.and_then(Value::as_str).unwrap_or(default)
    }

    /// Display form of a scalar, or the literal "N/A" when absent.
    fn display_or_na(self) -> String {
        match self.0 {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => "N/A".to_string(),
        }
    }

    /// Array items, or empty when absent or not an array.
    fn items(self) -> &'a [Value] {
        self.0
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Unsigned integer, or the given default.
    fn u64_or(self, default: u64) -> u64 {
        self.0.and_then(Value::as_u64).unwrap_or(default)
    }
}

/// Pretty-print the raw payload under a labeled heading. Used when the
/// payload root is not the JSON object shape the templates expect.
fn raw_fallback(heading: &str, data: &Value) -> String {
    let pretty = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    format!("**{}**\n\n```json\n{}\n```", heading, pretty)
}

/// Truncate a description to [`DESCRIPTION_LIMIT`] characters, appending an
/// ellipsis when text was dropped. Operates on chars, not bytes.
fn truncate_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_LIMIT {
        let mut out: String = text.chars().take(DESCRIPTION_LIMIT).collect();
        out.push_str("...");
        out
    } else {
        text.to_string()
    }
}

// =============================================================================
// Formatters
// =============================================================================

/// Collection stats: name, description, floor, supply, volume, owners, URL.
pub fn format_collection_info(data: &Value, slug: &str) -> String {
    if !data.is_object() {
        return raw_fallback("Collection Data", data);
    }

    let collection = View::root(data).get("collection");
    let stats = collection.get("stats");

    let name = collection.get("name").str_or(slug);
    let description = collection
        .get("description")
        .str_or("No description available");

    let mut out = format!("**{}**\n\n", name);
    if !description.is_empty() {
        out.push_str(&format!(
            "**Description:** {}\n\n",
            truncate_description(description)
        ));
    }
    out.push_str(&format!(
        "**Floor Price:** {} ETH\n",
        stats.get("floor_price").display_or_na()
    ));
    out.push_str(&format!(
        "**Total Supply:** {}\n",
        stats.get("total_supply").display_or_na()
    ));
    out.push_str(&format!(
        "**Total Volume:** {} ETH\n",
        stats.get("total_volume").display_or_na()
    ));
    out.push_str(&format!(
        "**Unique Owners:** {}\n",
        stats.get("num_owners").display_or_na()
    ));
    out.push_str(&format!(
        "**OpenSea:** {}/collection/{}\n",
        MARKET_SITE, slug
    ));
    out
}

/// Asset search results: header with query and count, first 5 items.
pub fn format_search_results(data: &Value, query: &str) -> String {
    if !data.is_object() {
        return raw_fallback("Search Results", data);
    }

    let assets = View::root(data).get("assets").items();

    if assets.is_empty() {
        return format!(
            "**Search Results for: {}**\n\nNo NFTs found matching your search criteria.",
            query
        );
    }

    let mut out = format!("**Search Results for: {}**\n\n", query);
    out.push_str(&format!("Found {} NFTs:\n\n", assets.len()));

    for (i, asset) in assets.iter().take(5).enumerate() {
        let asset = View::root(asset);
        let name = asset.get("name").str_or("Unnamed NFT");
        let token_id = asset.get("token_id").display_or_na();
        let collection = asset
            .get("collection")
            .get("name")
            .str_or("Unknown Collection");
        let permalink = asset.get("permalink").str_or("");

        out.push_str(&format!("**{}. {}**\n", i + 1, name));
        out.push_str(&format!("Token ID: {}\n", token_id));
        out.push_str(&format!("Collection: {}\n", collection));
        if !permalink.is_empty() {
            out.push_str(&format!("[View on OpenSea]({})\n", permalink));
        }
        out.push('\n');
    }

    if assets.len() > 5 {
        out.push_str(&format!(
            "... and {} more NFTs available.\n",
            assets.len() - 5
        ));
    }

    out
}

/// Wallet holdings: NFT count with 3 samples, collection count with 3 samples.
pub fn format_wallet_info(data: &Value, address: &str) -> String {
    if !data.is_object() {
        return raw_fallback("Wallet Data", data);
    }

    let root = View::root(data);
    let nfts = root.get("nfts").items();
    let collections = root.get("collections").items();

    let mut out = format!("**Wallet Analysis: {}**\n\n", address);

    if !nfts.is_empty() {
        out.push_str(&format!("**NFTs Owned:** {}\n", nfts.len()));
        for (i, nft) in nfts.iter().take(3).enumerate() {
            let nft = View::root(nft);
            let name = nft.get("name").str_or("Unnamed NFT");
            let collection = nft.get("collection").get("name").str_or("Unknown Collection");
            out.push_str(&format!("  {}. {} ({})\n", i + 1, name, collection));
        }
        if nfts.len() > 3 {
            out.push_str(&format!("  ... and {} more\n", nfts.len() - 3));
        }
        out.push('\n');
    }

    if !collections.is_empty() {
        out.push_str(&format!("**Collections:** {}\n", collections.len()));
        for (i, collection) in collections.iter().take(3).enumerate() {
            let collection = View::root(collection);
            let name = collection.get("name").str_or("Unknown Collection");
            let count = collection.get("count").u64_or(0);
            out.push_str(&format!("  {}. {} ({} items)\n", i + 1, name, count));
        }
        if collections.len() > 3 {
            out.push_str(&format!("  ... and {} more\n", collections.len() - 3));
        }
    }

    out
}

/// Trending collections: up to 5 ranked entries with floor, volume, URL.
pub fn format_trending(data: &Value) -> String {
    if !data.is_object() {
        return raw_fallback("Trending Data", data);
    }

    let collections = View::root(data).get("collections").items();

    if collections.is_empty() {
        return "**Trending Collections**\n\nNo trending collections data available.".to_string();
    }

    let mut out = "**Trending Collections on OpenSea**\n\n".to_string();

    for (i, collection) in collections.iter().take(5).enumerate() {
        let collection = View::root(collection);
        let name = collection.get("name").str_or("Unknown Collection");
        let stats = collection.get("stats");
        let slug = collection.get("slug").str_or("N/A");

        out.push_str(&format!("**{}. {}**\n", i + 1, name));
        out.push_str(&format!(
            "Floor Price: {} ETH\n",
            stats.get("floor_price").display_or_na()
        ));
        out.push_str(&format!(
            "Total Volume: {} ETH\n",
            stats.get("total_volume").display_or_na()
        ));
        out.push_str(&format!("{}/collection/{}\n\n", MARKET_SITE, slug));
    }

    if collections.len() > 5 {
        out.push_str(&format!(
            "... and {} more trending collections.\n",
            collections.len() - 5
        ));
    }

    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ---- Collection info ----

    #[test]
    fn test_collection_full_payload_renders_values_verbatim() {
        let data = json!({
            "collection": {
                "name": "Bored Ape Yacht Club",
                "stats": {
                    "floor_price": 12.5,
                    "total_supply": 10000,
                    "total_volume": 900000,
                    "num_owners": 5000
                }
            }
        });
        let out = format_collection_info(&data, "boredapeyachtclub");
        assert!(out.contains("Bored Ape Yacht Club"));
        assert!(out.contains("12.5 ETH"));
        assert!(out.contains("10000"));
        assert!(out.contains("900000 ETH"));
        assert!(out.contains("5000"));
        assert!(out.contains("https://opensea.io/collection/boredapeyachtclub"));
    }

    #[test]
    fn test_collection_empty_payload_renders_na() {
        let out = format_collection_info(&json!({}), "azuki");
        assert!(out.contains("**azuki**"));
        assert!(out.contains("Floor Price:** N/A ETH"));
        assert!(out.contains("Total Supply:** N/A"));
        assert!(out.contains("Total Volume:** N/A ETH"));
        assert!(out.contains("Unique Owners:** N/A"));
        assert!(out.contains("No description available"));
    }

    #[test]
    fn test_collection_description_truncated_at_200_chars() {
        let long = "x".repeat(250);
        let data = json!({"collection": {"name": "Long", "description": long}});
        let out = format_collection_info(&data, "long");
        assert!(out.contains(&format!("{}...", "x".repeat(200))));
        assert!(!out.contains(&"x".repeat(201)));
    }

    #[test]
    fn test_collection_short_description_not_truncated() {
        let data = json!({"collection": {"description": "short"}});
        let out = format_collection_info(&data, "s");
        assert!(out.contains("**Description:** short\n"));
        assert!(!out.contains("short..."));
    }

    #[test]
    fn test_collection_empty_description_skipped() {
        let data = json!({"collection": {"description": ""}});
        let out = format_collection_info(&data, "s");
        assert!(!out.contains("Description"));
    }

    #[test]
    fn test_collection_non_object_payload_falls_back_to_raw_json() {
        let data = json!([1, 2, 3]);
        let out = format_collection_info(&data, "s");
        assert!(out.starts_with("**Collection Data**"));
        assert!(out.contains("```json"));
    }

    #[test]
    fn test_collection_string_floor_price_rendered_as_is() {
        let data = json!({"collection": {"stats": {"floor_price": "12.5"}}});
        let out = format_collection_info(&data, "s");
        assert!(out.contains("Floor Price:** 12.5 ETH"));
    }

    // ---- Search ----

    fn asset(name: &str) -> Value {
        json!({
            "name": name,
            "token_id": "42",
            "collection": {"name": "Test Collection"},
            "permalink": "https://opensea.io/assets/42"
        })
    }

    #[test]
    fn test_search_seven_results_lists_five_plus_two_more() {
        let assets: Vec<Value> = (1..=7).map(|i| asset(&format!("Ape #{}", i))).collect();
        let data = json!({ "assets": assets });
        let out = format_search_results(&data, "apes");

        assert!(out.contains("Found 7 NFTs"));
        assert!(out.contains("Ape #5"));
        assert!(!out.contains("Ape #6"));
        assert!(out.contains("2 more"));
    }

    #[test]
    fn test_search_zero_results_message_interpolates_query() {
        let out = format_search_results(&json!({"assets": []}), "rare apes");
        assert!(out.contains("Search Results for: rare apes"));
        assert!(out.contains("No NFTs found matching your search criteria."));
    }

    #[test]
    fn test_search_exactly_five_has_no_more_line() {
        let assets: Vec<Value> = (1..=5).map(|i| asset(&format!("Ape #{}", i))).collect();
        let out = format_search_results(&json!({ "assets": assets }), "apes");
        assert!(!out.contains("more NFTs available"));
    }

    #[test]
    fn test_search_item_defaults() {
        let data = json!({"assets": [{}]});
        let out = format_search_results(&data, "q");
        assert!(out.contains("Unnamed NFT"));
        assert!(out.contains("Token ID: N/A"));
        assert!(out.contains("Unknown Collection"));
        assert!(!out.contains("View on OpenSea"));
    }

    #[test]
    fn test_search_permalink_renders_link() {
        let data = json!({"assets": [asset("Ape #1")]});
        let out = format_search_results(&data, "q");
        assert!(out.contains("[View on OpenSea](https://opensea.io/assets/42)"));
    }

    // ---- Wallet ----

    #[test]
    fn test_wallet_counts_and_samples() {
        let data = json!({
            "nfts": [
                {"name": "A", "collection": {"name": "CA"}},
                {"name": "B", "collection": {"name": "CB"}},
                {"name": "C", "collection": {"name": "CC"}},
                {"name": "D", "collection": {"name": "CD"}}
            ],
            "collections": [
                {"name": "CA", "count": 2},
                {"name": "CB", "count": 1}
            ]
        });
        let out = format_wallet_info(&data, "0xabc");
        assert!(out.contains("Wallet Analysis: 0xabc"));
        assert!(out.contains("NFTs Owned:** 4"));
        assert!(out.contains("1. A (CA)"));
        assert!(out.contains("3. C (CC)"));
        assert!(!out.contains("D (CD)"));
        assert!(out.contains("... and 1 more"));
        assert!(out.contains("Collections:** 2"));
        assert!(out.contains("CA (2 items)"));
    }

    #[test]
    fn test_wallet_empty_payload_is_just_heading() {
        let out = format_wallet_info(&json!({}), "0xabc");
        assert_eq!(out, "**Wallet Analysis: 0xabc**\n\n");
    }

    // ---- Trending ----

    fn trending_entry(name: &str, slug: &str) -> Value {
        json!({
            "name": name,
            "slug": slug,
            "stats": {"floor_price": 1.2, "total_volume": 999}
        })
    }

    #[test]
    fn test_trending_lists_up_to_five() {
        let entries: Vec<Value> = (1..=6)
            .map(|i| trending_entry(&format!("C{}", i), &format!("c{}", i)))
            .collect();
        let out = format_trending(&json!({ "collections": entries }));
        assert!(out.contains("**1. C1**"));
        assert!(out.contains("**5. C5**"));
        assert!(!out.contains("**6. C6**"));
        assert!(out.contains("... and 1 more trending collections."));
        assert!(out.contains("Floor Price: 1.2 ETH"));
        assert!(out.contains("https://opensea.io/collection/c1"));
    }

    #[test]
    fn test_trending_empty_renders_no_data_message() {
        let out = format_trending(&json!({"collections": []}));
        assert!(out.contains("No trending collections data available."));
    }

    #[test]
    fn test_trending_non_object_falls_back() {
        let out = format_trending(&json!("oops"));
        assert!(out.starts_with("**Trending Data**"));
    }

    // ---- Dispatch ----

    #[test]
    fn test_format_response_unknown_is_help() {
        let out = format_response(&Intent::Unknown, &json!({}));
        assert_eq!(out, help_message());
        assert!(out.contains("floor price of Bored Ape Yacht Club"));
    }

    #[test]
    fn test_format_response_dispatches_by_intent() {
        let intent = Intent::WalletLookup {
            address: "0xdead".to_string(),
        };
        let out = format_response(&intent, &json!({}));
        assert!(out.contains("Wallet Analysis: 0xdead"));
    }
}
