//! End-to-end pipeline tests against the scripted mock provider, driven
//! through the same types the CLI uses.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use sitesmith::{pipeline_settings, AppConfig, BuildRecord, RefinementService, VersionStore};
use sitesmith_agents::{Agent, AgentRole};
use sitesmith_core::{StageCallback, StageStatus};
use sitesmith_llm::mock::MockProvider;
use sitesmith_llm::LlmError;
use sitesmith_pipeline::{artifacts, AgentSet, BuildPipeline, PipelineSettings};

const DESIGN_JSON: &str = r##"{"primary_color": "#0f766e", "secondary_color": "#134e4a", "background_color": "#fafaf9", "text_color": "#1c1917", "accent_color": "#f59e0b", "heading_font": "Fraunces", "body_font": "Inter"}"##;

const REVIEW_FAIL: &str = r#"{"score": 58, "pass": false, "issues": [
    {"severity": "critical", "category": "seo",
     "description": "Missing meta description", "fix_suggestion": "Add a meta description"}
], "summary": "Not ready"}"#;

const REVIEW_PASS: &str = r#"{"score": 91, "pass": true, "issues": [], "summary": "Ready"}"#;

fn valid_html(marker: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head>\
         <script src=\"https://cdn.tailwindcss.com\"></script>\
         <title>{marker}</title>\
         <meta name=\"description\" content=\"{marker}\">\
         </head><body><main>{marker}</main></body></html>"
    )
}

fn agent(role: AgentRole, mock: MockProvider) -> Agent {
    Agent::new(role, Arc::new(mock))
        .with_max_attempts(2)
        .with_backoff_unit(Duration::ZERO)
}

fn full_agent_set() -> AgentSet {
    AgentSet {
        strategist: agent(
            AgentRole::Strategist,
            MockProvider::always_text("strategist", "Target audience: home cooks."),
        ),
        copywriter: agent(
            AgentRole::Copywriter,
            MockProvider::always_text("copywriter", "H1: Fresh pasta, delivered."),
        ),
        art_director: agent(
            AgentRole::ArtDirector,
            MockProvider::always_text("art_director", DESIGN_JSON),
        ),
        developer: agent(
            AgentRole::Developer,
            MockProvider::new("developer")
                .push_text(valid_html("draft"))
                .push_text(valid_html("fixed")),
        ),
        reviewer: agent(
            AgentRole::Reviewer,
            MockProvider::new("reviewer")
                .push_text(REVIEW_FAIL)
                .push_text(REVIEW_PASS),
        ),
        seo_optimizer: agent(
            AgentRole::SeoOptimizer,
            MockProvider::always_text("seo", valid_html("optimized")),
        ),
    }
}

#[tokio::test]
async fn full_build_with_one_fix_round_produces_persistable_outcome() {
    let events: Arc<Mutex<Vec<(String, StageStatus)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let callback: StageCallback = Arc::new(move |stage, status| {
        sink.lock().unwrap().push((stage.to_string(), status));
    });

    let pipeline = BuildPipeline::new(full_agent_set(), PipelineSettings::default())
        .with_stage_callback(callback);
    let outcome = pipeline
        .run("An artisanal pasta delivery service in Bologna")
        .await;

    assert!(outcome.success, "error: {:?}", outcome.error);
    assert_eq!(outcome.fix_iterations, 1);
    assert!(outcome.html.contains("optimized"));
    assert!(outcome.artifacts[artifacts::DOCUMENT]
        .as_str()
        .unwrap()
        .contains("fixed"));
    assert_eq!(
        outcome.review_report.as_ref().unwrap()["pass"],
        Value::Bool(true)
    );

    // Every stage reported Running before its terminal status.
    let events = events.lock().unwrap();
    let strategist: Vec<_> = events.iter().filter(|(s, _)| s == "Strategist").collect();
    assert_eq!(strategist[0].1, StageStatus::Running);
    assert_eq!(strategist[1].1, StageStatus::Done);
    assert!(events.iter().any(|(s, _)| s == "Developer (fix 1)"));

    // The outcome converts into a persisted record and a stored version.
    let dir = tempfile::tempdir().unwrap();
    let record = BuildRecord::from_outcome("pasta delivery", &outcome);
    record.save(dir.path()).unwrap();

    let store = VersionStore::new(dir.path().join("versions"));
    let version = store
        .save_version(
            "pasta",
            outcome.html.clone(),
            "Initial build".to_string(),
            outcome.totals.tokens,
            outcome.totals.cost_usd,
        )
        .unwrap();
    let restored = store.get_version("pasta", &version.version_id).unwrap();
    assert_eq!(restored.html_code, outcome.html);
}

#[tokio::test]
async fn halted_build_still_reports_partial_artifacts_and_totals() {
    let mut agents = full_agent_set();
    agents.developer = agent(
        AgentRole::Developer,
        MockProvider::always_err(
            "developer",
            LlmError::RateLimited {
                message: "quota exceeded".to_string(),
                retry_after: Some(30),
            },
        ),
    );

    let outcome = BuildPipeline::new(agents, PipelineSettings::default())
        .run("A bakery")
        .await;

    assert!(!outcome.success);
    assert!(outcome.error.as_deref().unwrap().contains("Developer"));
    assert!(outcome.artifacts.contains_key(artifacts::STRATEGY));
    assert!(outcome.artifacts.contains_key(artifacts::COPY));
    assert!(outcome.artifacts.contains_key(artifacts::DESIGN));
    assert!(outcome.html.is_empty());
    // Three successful stages billed usage even though the run failed.
    assert!(outcome.totals.tokens > 0);
}

#[tokio::test]
async fn settings_from_config_drive_the_pipeline() {
    let mut config = AppConfig::default();
    config.pipeline.template = "restaurant".to_string();
    config.pipeline.language = "it".to_string();
    config.pipeline.auto_fix = false;
    let settings = pipeline_settings(&config);
    assert_eq!(settings.template.name, "restaurant");
    assert_eq!(settings.language, "Italian");

    let strategist_mock = Arc::new(MockProvider::always_text("strategist", "brief"));
    let mut agents = full_agent_set();
    agents.strategist = Agent::new(AgentRole::Strategist, strategist_mock.clone())
        .with_backoff_unit(Duration::ZERO);

    let outcome = BuildPipeline::new(agents, settings).run("Trattoria").await;
    assert!(outcome.success);
    // Auto-fix disabled: the first developer document goes straight through.
    assert_eq!(outcome.fix_iterations, 0);

    let prompt = &strategist_mock.calls()[0].user_prompt;
    assert!(prompt.contains("restaurant"));
    assert!(prompt.contains("menu-highlights"));
    assert!(prompt.contains("in Italian"));
}

#[tokio::test]
async fn refinement_service_round_trip() {
    let refined_html = valid_html("refined");
    let service = RefinementService::new(
        agent(
            AgentRole::Refinement,
            MockProvider::always_text("refinement", refined_html.clone()),
        ),
        agent(
            AgentRole::AbVariant,
            MockProvider::always_text(
                "variant",
                r#"{"variants": {"headline": {"A": "Fresh pasta", "B": "Pasta tonight", "C": "Order now"}}, "rationale": "urgency vs comfort"}"#,
            ),
        ),
    );

    let refined = service
        .refine(&valid_html("original"), "Make the hero darker")
        .await;
    assert!(refined.success);
    assert_eq!(refined.output.unwrap().as_str().unwrap(), refined_html);

    let variants = service.ab_variants("H1: Fresh pasta, delivered.").await;
    assert!(variants.success);
    assert_eq!(
        variants.output.unwrap()["variants"]["headline"]["C"],
        "Order now"
    );
}
