//! VastraVaani Scrape — clients for the search and scraping services the
//! feature routes pull live data from.
//!
//! - [`SerpApiClient`]: Google Shopping, site-restricted Google search and
//!   Google Images through SerpAPI.
//! - [`ApifyClient`]: synchronous Apify actor runs for Instagram hashtags
//!   and Pinterest keywords, normalized into [`SocialPost`]s.
//! - [`download`]: plain image fetches with a browser user agent.

pub mod apify;
pub mod download;
pub mod serpapi;
pub mod text;
pub mod types;

pub use apify::{ApifyClient, INSTAGRAM_ACTOR, PINTEREST_ACTOR};
pub use download::{download, download_limited, BROWSER_USER_AGENT, MAX_DOWNLOAD_BYTES};
pub use serpapi::SerpApiClient;
pub use text::{extract_hashtags, find_inr_price, parse_inr_price};
pub use types::*;
