use std::env;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

pub fn build_client() -> Result<Client> {
    // OPINIONS_UA overrides the default user agent (courts block generic ones)
    let ua = env::var("OPINIONS_UA")
        .unwrap_or_else(|_| concat!("opinion-scraper/", env!("CARGO_PKG_VERSION")).to_string());
    let client = Client::builder()
        .timeout(Duration::from_secs(20))
        .user_agent(ua)
        .build()?;
    Ok(client)
}

pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let text = client.get(url).send().await?.text().await?;
    Ok(text)
}
