//! Provider catalog filtering and example query suggestions.

use std::collections::BTreeMap;

use apiconn_config::constants::POPULAR_PROVIDER_KEYS;

use crate::models::Provider;

/// Providers whose name or description contains `search` (ignoring case),
/// restricted to `category` when one is given.
pub fn filter_providers<'a>(
    providers: &'a [Provider],
    search: &str,
    category: Option<&str>,
) -> Vec<&'a Provider> {
    let search = search.trim().to_lowercase();
    providers
        .iter()
        .filter(|p| {
            search.is_empty()
                || p.name.to_lowercase().contains(&search)
                || p.description.to_lowercase().contains(&search)
        })
        .filter(|p| category.is_none_or(|c| p.category.as_deref() == Some(c)))
        .collect()
}

/// Group providers by category; providers without one go under `Other`.
pub fn group_by_category(providers: &[Provider]) -> BTreeMap<String, Vec<&Provider>> {
    let mut groups: BTreeMap<String, Vec<&Provider>> = BTreeMap::new();
    for provider in providers {
        let category = provider
            .category
            .clone()
            .unwrap_or_else(|| "Other".to_string());
        groups.entry(category).or_default().push(provider);
    }
    groups
}

/// The well-known providers offered as templates, in catalog order.
pub fn popular_providers(providers: &[Provider]) -> Vec<&Provider> {
    providers
        .iter()
        .filter(|p| POPULAR_PROVIDER_KEYS.contains(&p.key.as_str()))
        .collect()
}

fn domain_of(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.split('/').next().unwrap_or("")
}

/// Remove `{placeholder}` segments such as `{site}` from a template domain.
fn strip_placeholders(domain: &str) -> String {
    let mut out = String::with_capacity(domain.len());
    let mut depth = 0usize;
    for c in domain.chars() {
        match c {
            '{' => depth += 1,
            '}' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

const GITHUB_EXAMPLES: &[&str] = &[
    "Get my repositories",
    "Show the last 10 commits from my main repository",
    "Get user information",
    "List all issues in my repository",
    "Show recent pull requests",
];

const WORDPRESS_EXAMPLES: &[&str] = &[
    "Get all posts",
    "Search for posts containing \"AI\"",
    "Get the latest 5 posts",
    "Show all published pages",
    "Get comments from recent posts",
];

const WEATHER_EXAMPLES: &[&str] = &[
    "Get weather for New York",
    "Show temperature in London",
    "Weather forecast for tomorrow",
    "Current conditions in Tokyo",
    "Weekly forecast for San Francisco",
];

const TWITTER_EXAMPLES: &[&str] = &[
    "Get recent tweets",
    "Search for tweets about AI",
    "Get my profile information",
    "Find tweets by username",
];

const SPOTIFY_EXAMPLES: &[&str] = &[
    "Search for artists named Drake",
    "Find albums by The Beatles",
    "Search for tracks about love",
    "Get my playlists",
];

const YOUTUBE_EXAMPLES: &[&str] = &[
    "Search for videos about programming",
    "Find channels about cooking",
    "Search for tutorials on React",
    "Get trending videos",
];

const GENERIC_EXAMPLES: &[&str] = &[
    "Get all data",
    "Show recent items",
    "List available endpoints",
    "Get user data",
    "Fetch latest updates",
];

/// Suggested queries for a connection's base URL.
///
/// The first catalog provider whose domain (placeholders removed) appears in
/// the connection's domain, or whose key appears in the connection URL, wins.
/// Otherwise built-in suggestions are chosen by URL keyword.
pub fn example_queries_for(connection_base_url: &str, providers: &[Provider]) -> Vec<String> {
    let base_url = connection_base_url.to_lowercase();
    let connection_domain = domain_of(&base_url);

    for provider in providers {
        let provider_url = provider.base_url.to_lowercase();
        let provider_domain = strip_placeholders(domain_of(&provider_url));
        let domain_match = !provider_domain.is_empty() && connection_domain.contains(&provider_domain);
        let key_match = !provider.key.is_empty() && base_url.contains(&provider.key.to_lowercase());
        if domain_match || key_match {
            return provider.example_queries.clone();
        }
    }

    let fallback = if base_url.contains("github") {
        GITHUB_EXAMPLES
    } else if base_url.contains("wp-json") || base_url.contains("wordpress") {
        WORDPRESS_EXAMPLES
    } else if base_url.contains("weather") {
        WEATHER_EXAMPLES
    } else if base_url.contains("twitter") {
        TWITTER_EXAMPLES
    } else if base_url.contains("spotify") {
        SPOTIFY_EXAMPLES
    } else if base_url.contains("youtube") {
        YOUTUBE_EXAMPLES
    } else {
        GENERIC_EXAMPLES
    };
    fallback.iter().map(|s| s.to_string()).collect()
}
