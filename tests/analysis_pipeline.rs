//! End-to-end analysis through mocked external sources.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use health_risk_advisor::adapters::cache::InMemoryCache;
use health_risk_advisor::adapters::narrative::MockNarrativeProvider;
use health_risk_advisor::adapters::profile::InMemoryProfileStore;
use health_risk_advisor::adapters::sources::{
    LiveHealthDataSources, MockTransport, ResilientFetcher, SourceSettings,
};
use health_risk_advisor::application::{AnalysisResult, AnalyzeProfileHandler, DataAggregator};
use health_risk_advisor::domain::profile::RawProfile;
use health_risk_advisor::domain::provenance::{Provenance, SourceKind};
use health_risk_advisor::domain::risk::{FactorCategory, RiskLevel};
use health_risk_advisor::domain::statistics::{CollectionMode, QualityGrade};
use health_risk_advisor::ports::SourceError;

// ─────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────

fn settings(kind: SourceKind, ttl: Duration) -> SourceSettings {
    SourceSettings::new(kind)
        .with_base_url(format!("http://{}.test", kind))
        .with_retries(0, Duration::ZERO)
        .with_timeout(Duration::from_millis(500))
        .with_cache_ttl(ttl)
}

fn handler_with(transport: MockTransport, cache: InMemoryCache, ttl: Duration) -> AnalyzeProfileHandler {
    let fetcher = ResilientFetcher::new(Arc::new(transport), Arc::new(cache));
    let sources = SourceKind::all()
        .iter()
        .fold(LiveHealthDataSources::new(fetcher), |sources, kind| {
            sources.with_source(settings(*kind, ttl))
        });
    AnalyzeProfileHandler::new(
        DataAggregator::new(Arc::new(sources)),
        Arc::new(InMemoryProfileStore::new()),
    )
}

fn handler(transport: MockTransport) -> AnalyzeProfileHandler {
    handler_with(transport, InMemoryCache::new(), Duration::from_secs(60))
}

fn city_sources(aqi: u32, temperature: f64, humidity: f64, crime_rate: f64) -> MockTransport {
    MockTransport::new()
        .with_json(
            SourceKind::Weather,
            json!({"main": {"temp": temperature, "humidity": humidity}, "weather": [{"main": "Haze"}]}),
        )
        .with_json(SourceKind::AirQuality, json!({"status": "ok", "data": {"aqi": aqi}}))
        .with_json(
            SourceKind::DeathRate,
            json!({"death_rate": 5.8, "age_adjusted_death_rate": 1.5}),
        )
        .with_json(SourceKind::Occupation, json!({"death_rate_per_100k": 9.0}))
        .with_json(SourceKind::Crime, json!({"crime_rate": crime_rate}))
        .with_json(
            SourceKind::HealthAlerts,
            json!({"status": "ok", "articles": [
                {"title": "Air quality alert issued", "source": {"name": "Local News"},
                 "publishedAt": "2024-11-02T05:00:00Z", "url": "https://example.com/a"}
            ]}),
        )
}

fn raw(value: Value) -> RawProfile {
    serde_json::from_value(value).unwrap()
}

fn delhi_worker() -> RawProfile {
    raw(json!({
        "occupation": "Factory Worker",
        "city": "Delhi",
        "age": 65,
        "healthCondition": "Diabetes",
        "addictions": "None",
        "pastSurgery": "None",
        "workShift": "Night",
        "monthlyIncome": 40000
    }))
}

fn bangalore_student() -> RawProfile {
    raw(json!({
        "occupation": "Student",
        "city": "Bangalore",
        "age": 22,
        "healthCondition": "None",
        "addictions": "None",
        "pastSurgery": "None",
        "workShift": "Day",
        "monthlyIncome": 15000
    }))
}

fn structured(result: &AnalysisResult) -> Value {
    json!({
        "assessment": result.assessment,
        "financialPlan": result.financial_plan,
        "environment": {
            "aqi": result.collected.environment.aqi,
            "climateRisk": result.collected.environment.climate_risk,
        },
        "statistics": result.collected.statistics,
        "dataQuality": result.collected.data_quality,
    })
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn high_risk_delhi_profile() {
    let result = handler(city_sources(220, 41.0, 30.0, 1586.1))
        .handle(delhi_worker())
        .await
        .unwrap();

    assert!(result.assessment.score >= 80);
    assert_eq!(result.assessment.level, RiskLevel::Critical);
    assert_eq!(
        result.financial_plan.insurance_plan.name,
        "Premium Health Shield"
    );
    assert_eq!(result.financial_plan.alternative_plans.len(), 2);
    assert_eq!(result.assessment.factors[0].category, FactorCategory::AirQuality);
    assert_eq!(result.assessment.factors[0].impact, 25);
    assert_eq!(result.collected.mode, CollectionMode::Full);
    assert_eq!(result.collected.data_quality.overall, QualityGrade::Excellent);
    assert_eq!(result.collected.health_alerts.len(), 1);
}

#[tokio::test]
async fn low_risk_bangalore_profile() {
    let result = handler(city_sources(95, 24.0, 60.0, 456.0))
        .handle(bangalore_student())
        .await
        .unwrap();

    assert!(result.assessment.score < 40);
    assert_eq!(result.assessment.level, RiskLevel::Low);
    assert_eq!(
        result.financial_plan.insurance_plan.name,
        "Essential Health Cover"
    );
    assert!(result.collected.environment.seasonal_risks.is_empty());
}

#[tokio::test]
async fn every_source_failing_still_yields_result() {
    let transport = MockTransport::new().failing_all(SourceError::Network("unreachable".into()));
    let result = handler(transport.clone())
        .handle(delhi_worker())
        .await
        .unwrap();

    let quality = &result.collected.data_quality;
    assert_eq!(quality.overall, QualityGrade::Poor);
    assert_eq!(quality.real_time_data_percentage.value(), 0);
    assert_eq!(result.collected.environment.aqi, 150);
    assert_eq!(result.collected.environment.temperature, 30.0);
    assert_eq!(
        result.collected.environment.provenance.get("aqi"),
        Some(&Provenance::Fallback(SourceKind::AirQuality))
    );
    assert!(result.collected.health_alerts.is_empty());
    assert!(result.assessment.score <= 100);
    assert_eq!(transport.total_calls(), SourceKind::all().len());
}

#[tokio::test]
async fn hung_source_keeps_other_live_results() {
    let transport = city_sources(220, 41.0, 30.0, 1586.1)
        .with_delay_for(SourceKind::Weather, Duration::from_secs(30));
    let fetcher = ResilientFetcher::new(Arc::new(transport), Arc::new(InMemoryCache::new()));
    let sources = SourceKind::all()
        .iter()
        .fold(LiveHealthDataSources::new(fetcher), |sources, kind| {
            sources.with_source(
                SourceSettings::new(*kind)
                    .with_base_url(format!("http://{}.test", kind))
                    .with_retries(2, Duration::from_millis(5))
                    .with_timeout(Duration::from_millis(50)),
            )
        });
    let handler = AnalyzeProfileHandler::new(
        DataAggregator::new(Arc::new(sources)).with_timeout(Duration::from_millis(150)),
        Arc::new(InMemoryProfileStore::new()),
    );

    let result = handler.handle(delhi_worker()).await.unwrap();

    let collected = &result.collected;
    assert_eq!(collected.mode, CollectionMode::Full);
    assert_eq!(collected.environment.aqi, 220);
    assert_eq!(collected.environment.temperature, 30.0);
    assert_eq!(
        collected.environment.provenance.get("temperature"),
        Some(&Provenance::Fallback(SourceKind::Weather))
    );
    assert_eq!(collected.data_quality.real_time_data_percentage.value(), 83);
    assert_eq!(collected.data_quality.overall, QualityGrade::Excellent);
}

#[tokio::test]
async fn identical_inputs_give_identical_structured_results() {
    let first = handler(city_sources(180, 36.0, 85.0, 734.8))
        .handle(delhi_worker())
        .await
        .unwrap();
    let second = handler(city_sources(180, 36.0, 85.0, 734.8))
        .handle(delhi_worker())
        .await
        .unwrap();

    assert_eq!(structured(&first), structured(&second));
}

#[tokio::test]
async fn live_responses_are_served_from_cache() {
    let transport = city_sources(120, 30.0, 50.0, 300.0);
    let handler = handler(transport.clone());

    handler.handle(bangalore_student()).await.unwrap();
    handler.handle(bangalore_student()).await.unwrap();

    for kind in SourceKind::all() {
        assert_eq!(transport.call_count(*kind), 1, "{} fetched twice", kind);
    }
}

#[tokio::test]
async fn fallbacks_are_not_cached() {
    let transport = city_sources(120, 30.0, 50.0, 300.0)
        .then_error(SourceKind::AirQuality, SourceError::ServerError { status: 503 });
    let handler = handler(transport.clone());

    let first = handler.handle(bangalore_student()).await.unwrap();
    assert_eq!(first.collected.environment.aqi, 150);

    let second = handler.handle(bangalore_student()).await.unwrap();
    assert_eq!(second.collected.environment.aqi, 120);
    assert_eq!(transport.call_count(SourceKind::AirQuality), 2);
}

#[tokio::test]
async fn cached_entries_expire_after_ttl() {
    let transport = city_sources(120, 30.0, 50.0, 300.0);
    let handler = handler_with(transport.clone(), InMemoryCache::new(), Duration::from_secs(1));

    handler.handle(bangalore_student()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;
    handler.handle(bangalore_student()).await.unwrap();

    assert_eq!(transport.call_count(SourceKind::Weather), 2);
}

#[tokio::test]
async fn narrative_is_additive() {
    let narrator = MockNarrativeProvider::new().with_response("Limit outdoor exposure.");
    let plain = handler(city_sources(220, 41.0, 30.0, 1586.1))
        .handle(delhi_worker())
        .await
        .unwrap();
    let narrated = handler(city_sources(220, 41.0, 30.0, 1586.1))
        .with_narrator(Arc::new(narrator.clone()))
        .handle(delhi_worker())
        .await
        .unwrap();

    assert_eq!(structured(&plain), structured(&narrated));
    assert_eq!(narrated.narrative.text, "Limit outdoor exposure.");
    assert_eq!(narrator.get_calls()[0].assessment, narrated.assessment);
}

#[tokio::test]
async fn result_serializes_to_camel_case() {
    let result = handler(city_sources(95, 24.0, 60.0, 456.0))
        .handle(bangalore_student())
        .await
        .unwrap();
    let body = serde_json::to_value(&result).unwrap();

    assert!(body["financialPlan"]["monthlySavings"].is_u64());
    assert!(body["financialPlan"]["emergencyFundTarget"].is_u64());
    assert!(body["collected"]["dataQuality"]["realTimeDataPercentage"].is_u64());
    assert_eq!(body["collected"]["environment"]["provenance"]["aqi"], "live:air_quality");
    assert_eq!(body["collected"]["mode"], "full");
}
