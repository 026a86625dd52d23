//! Health alerts from a news search API (NewsAPI wire format).

use serde::Deserialize;
use serde_json::Value;

use super::resilient::SourceStrategy;
use crate::domain::foundation::Timestamp;
use crate::domain::profile::City;
use crate::domain::provenance::SourceKind;
use crate::domain::statistics::HealthAlert;
use crate::ports::SourceError;

const MAX_ALERTS: usize = 5;

#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: Option<String>,
    source: Option<ArticleSource>,
    published_at: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// Recent health news: `GET /everything?q={city} health`.
pub struct HealthAlertSource;

impl SourceStrategy for HealthAlertSource {
    type Params = City;
    type Output = Vec<HealthAlert>;

    fn kind(&self) -> SourceKind {
        SourceKind::HealthAlerts
    }

    fn cache_params(&self, city: &City) -> Vec<(&'static str, String)> {
        vec![("city", city.slug().to_string())]
    }

    fn path(&self, _city: &City) -> String {
        "/everything".to_string()
    }

    fn query(&self, city: &City) -> Vec<(String, String)> {
        vec![
            ("q".to_string(), format!("{} health", city.display_name())),
            ("sortBy".to_string(), "publishedAt".to_string()),
            ("language".to_string(), "en".to_string()),
            ("pageSize".to_string(), MAX_ALERTS.to_string()),
        ]
    }

    fn parse(&self, body: Value, _city: &City) -> Result<Vec<HealthAlert>, SourceError> {
        let response: NewsResponse = serde_json::from_value(body)
            .map_err(|e| SourceError::Parse(format!("health_alerts: {}", e)))?;
        if response.status != "ok" {
            return Err(SourceError::Rejected {
                status: 200,
                message: response.message.unwrap_or(response.status),
            });
        }

        Ok(response
            .articles
            .into_iter()
            .filter_map(|article| {
                let title = article.title?.trim().to_string();
                if title.is_empty() || title == "[Removed]" {
                    return None;
                }
                Some(HealthAlert {
                    title,
                    source: article
                        .source
                        .and_then(|s| s.name)
                        .unwrap_or_else(|| "Unknown".to_string()),
                    published_at: article
                        .published_at
                        .as_deref()
                        .and_then(Timestamp::parse_rfc3339),
                    url: article.url,
                })
            })
            .take(MAX_ALERTS)
            .collect())
    }

    fn fallback(&self, _city: &City) -> Vec<HealthAlert> {
        Vec::new()
    }
}
