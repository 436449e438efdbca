//! Build Pipeline
//!
//! Fixed-topology orchestrator: Strategist, then Copywriter and Art Director
//! in parallel, then Developer, then a bounded Reviewer/Developer corrective
//! loop, then a best-effort SEO pass. Artifacts are owned by the
//! orchestrator from the moment an agent returns them; usage totals are
//! aggregated here after each stage (including after the fan-out join), so
//! no agent ever touches shared run state.

use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures_util::FutureExt;
use serde_json::Value;
use tracing::{error, info, warn};

use sitesmith_agents::{keys, Agent, AgentContext, AgentOutcome, FixRequest, ReviewReport};
use sitesmith_core::{StageCallback, StageStatus};

use crate::result::{artifacts, BuildOutcome};
use crate::stage::StageRecord;

/// Section layout and styling hints for one site template.
#[derive(Debug, Clone)]
pub struct TemplateSpec {
    pub name: String,
    pub sections: Vec<String>,
    pub style_hints: String,
}

impl Default for TemplateSpec {
    fn default() -> Self {
        Self {
            name: "landing".to_string(),
            sections: vec![
                "hero".to_string(),
                "features".to_string(),
                "testimonials".to_string(),
                "faq".to_string(),
                "cta".to_string(),
                "footer".to_string(),
            ],
            style_hints: "Clean, conversion-focused, generous whitespace".to_string(),
        }
    }
}

/// Pipeline-level knobs; per-role settings live on each [`Agent`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub template: TemplateSpec,
    pub auto_fix_enabled: bool,
    pub max_fix_iterations: u32,
    pub language: String,
    /// True when `language` reads right-to-left.
    pub rtl: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            template: TemplateSpec::default(),
            auto_fix_enabled: true,
            max_fix_iterations: 3,
            language: "English".to_string(),
            rtl: false,
        }
    }
}

/// The six agents a build needs, one per stage.
pub struct AgentSet {
    pub strategist: Agent,
    pub copywriter: Agent,
    pub art_director: Agent,
    pub developer: Agent,
    pub reviewer: Agent,
    pub seo_optimizer: Agent,
}

pub struct BuildPipeline {
    agents: AgentSet,
    settings: PipelineSettings,
    on_stage_update: Option<StageCallback>,
}

impl BuildPipeline {
    pub fn new(agents: AgentSet, settings: PipelineSettings) -> Self {
        Self {
            agents,
            settings,
            on_stage_update: None,
        }
    }

    pub fn with_stage_callback(mut self, callback: StageCallback) -> Self {
        self.on_stage_update = Some(callback);
        self
    }

    /// Run the full build. Always returns an outcome; stage failures and
    /// internal faults are captured, never propagated.
    pub async fn run(&self, business_description: &str) -> BuildOutcome {
        let mut outcome = BuildOutcome::empty();
        let guarded =
            AssertUnwindSafe(self.execute_stages(business_description, &mut outcome)).catch_unwind();
        if guarded.await.is_err() {
            error!("pipeline panicked");
            outcome.success = false;
            outcome.error = Some("Unexpected internal fault during build".to_string());
        }
        outcome
    }

    async fn execute_stages(&self, business_description: &str, outcome: &mut BuildOutcome) {
        let mut ctx = self.base_context(business_description);

        // Stage 1: strategy brief.
        let strategy = self
            .run_stage("Strategist", &self.agents.strategist, business_description, &ctx, outcome)
            .await;
        if !strategy.success {
            self.halt(outcome, &strategy);
            return;
        }
        let strategy_value = strategy.output.unwrap_or(Value::Null);
        ctx.insert(keys::STRATEGY, strategy_value.clone());
        outcome
            .artifacts
            .insert(artifacts::STRATEGY.to_string(), strategy_value);

        // Stage 2: copy and design, fanned out. Both usage totals count even
        // when one side fails, but a failed fan-out attaches neither artifact.
        let (copy, design) = self.run_fan_out(&ctx, outcome).await;
        if !copy.success {
            self.halt(outcome, &copy);
            return;
        }
        if !design.success {
            self.halt(outcome, &design);
            return;
        }
        let copy_value = copy.output.unwrap_or(Value::Null);
        let design_value = design.output.unwrap_or(Value::Null);
        ctx.insert(keys::COPY, copy_value.clone());
        ctx.insert(keys::DESIGN, design_value.clone());
        outcome
            .artifacts
            .insert(artifacts::COPY.to_string(), copy_value);
        outcome
            .artifacts
            .insert(artifacts::DESIGN.to_string(), design_value);

        // Stage 3: initial document.
        let developer = self
            .run_stage("Developer", &self.agents.developer, "", &ctx, outcome)
            .await;
        if !developer.success {
            self.halt(outcome, &developer);
            return;
        }
        let mut html = developer
            .output
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        // Stage 4: corrective loop.
        if self.settings.auto_fix_enabled {
            html = self.run_corrective_loop(html, &mut ctx, outcome).await;
        }
        outcome
            .artifacts
            .insert(artifacts::DOCUMENT.to_string(), Value::String(html.clone()));

        // Stage 5: best-effort SEO pass. Failure keeps the current document.
        ctx.insert(keys::HTML, Value::String(html.clone()));
        let seo = self
            .run_stage("SEO Optimizer", &self.agents.seo_optimizer, "", &ctx, outcome)
            .await;
        if seo.success {
            if let Some(optimized) = seo.output.as_ref().and_then(Value::as_str) {
                html = optimized.to_string();
            }
        } else {
            warn!(
                error = seo.error.as_deref().unwrap_or("unknown"),
                "SEO pass failed, keeping unoptimized document"
            );
        }

        outcome.success = true;
        outcome.html = html;
        info!(
            fix_iterations = outcome.fix_iterations,
            tokens = outcome.totals.tokens,
            "build complete"
        );
    }

    /// Reviewer/Developer feedback cycle, bounded by `max_fix_iterations`.
    /// Counts Developer re-invocations, not Reviewer runs. A checker that
    /// cannot execute ends the loop without failing the run.
    async fn run_corrective_loop(
        &self,
        mut html: String,
        ctx: &mut AgentContext,
        outcome: &mut BuildOutcome,
    ) -> String {
        for iteration in 0..self.settings.max_fix_iterations {
            ctx.insert(keys::HTML, Value::String(html.clone()));
            let review = self
                .run_stage("Reviewer", &self.agents.reviewer, "", ctx, outcome)
                .await;
            if !review.success {
                warn!(
                    error = review.error.as_deref().unwrap_or("unknown"),
                    "reviewer failed to execute, keeping current document"
                );
                break;
            }

            let verdict = review.output.unwrap_or(Value::Null);
            outcome.review_report = Some(verdict.clone());
            let report = match ReviewReport::from_value(&verdict) {
                Some(report) => report,
                None => break,
            };
            if report.passed {
                info!(score = report.score, "review passed");
                break;
            }
            let issues = report.actionable_issues();
            if issues.is_empty() {
                break;
            }

            info!(
                iteration = iteration + 1,
                issues = issues.len(),
                score = report.score,
                "review failed, requesting fixes"
            );
            let request = FixRequest {
                issues,
                current_html: html.clone(),
            };
            let label = format!("Developer (fix {})", iteration + 1);
            let fix = self
                .run_stage(&label, &self.agents.developer, &request.to_prompt(), ctx, outcome)
                .await;
            outcome.fix_iterations += 1;
            if fix.success {
                if let Some(fixed) = fix.output.as_ref().and_then(Value::as_str) {
                    html = fixed.to_string();
                }
            } else {
                warn!(
                    error = fix.error.as_deref().unwrap_or("unknown"),
                    "fix attempt failed, keeping prior document"
                );
            }
        }
        html
    }

    /// Copywriter and Art Director run concurrently against the same brief;
    /// the join blocks until both return, then totals and records are
    /// aggregated here in stage order.
    async fn run_fan_out(
        &self,
        ctx: &AgentContext,
        outcome: &mut BuildOutcome,
    ) -> (AgentOutcome, AgentOutcome) {
        self.notify("Copywriter", StageStatus::Running);
        self.notify("Art Director", StageStatus::Running);

        let (copy, design) = tokio::join!(
            self.agents.copywriter.execute("", ctx),
            self.agents.art_director.execute("", ctx),
        );

        for (name, result) in [("Copywriter", &copy), ("Art Director", &design)] {
            let status = if result.success {
                StageStatus::Done
            } else {
                StageStatus::Error
            };
            outcome.totals.add(result);
            // Each record carries its own agent's cumulative model latency;
            // the join's wall time belongs to neither stage alone.
            outcome.stages.push(StageRecord {
                name: name.to_string(),
                role: result.role.clone(),
                status,
                attempts: result.attempts,
                duration_ms: result.latency_ms,
            });
            self.notify(name, status);
        }
        (copy, design)
    }

    async fn run_stage(
        &self,
        label: &str,
        agent: &Agent,
        input: &str,
        ctx: &AgentContext,
        outcome: &mut BuildOutcome,
    ) -> AgentOutcome {
        self.notify(label, StageStatus::Running);
        let started = Instant::now();
        let result = agent.execute(input, ctx).await;
        let status = if result.success {
            StageStatus::Done
        } else {
            StageStatus::Error
        };

        outcome.totals.add(&result);
        outcome.stages.push(StageRecord {
            name: label.to_string(),
            role: result.role.clone(),
            status,
            attempts: result.attempts,
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        });
        self.notify(label, status);
        result
    }

    fn halt(&self, outcome: &mut BuildOutcome, failed: &AgentOutcome) {
        let reason = failed.error.as_deref().unwrap_or("unknown error");
        error!(role = failed.role.as_str(), reason, "pipeline halted");
        outcome.success = false;
        outcome.error = Some(format!("{} failed: {}", failed.role, reason));
    }

    fn base_context(&self, business_description: &str) -> AgentContext {
        let template = &self.settings.template;
        AgentContext::new()
            .with(keys::BUSINESS_DESCRIPTION, business_description)
            .with(keys::SECTIONS, template.sections.join(", "))
            .with(
                keys::SECTIONS_HINT,
                format!(
                    "The website uses the \"{}\" template with these sections: {}.",
                    template.name,
                    template.sections.join(", ")
                ),
            )
            .with(keys::TEMPLATE_HINT, template.style_hints.clone())
            .with(keys::LANGUAGE, self.settings.language.clone())
            .with(
                keys::TEXT_DIRECTION,
                if self.settings.rtl { "rtl" } else { "ltr" },
            )
    }

    fn notify(&self, stage: &str, status: StageStatus) {
        if let Some(callback) = &self.on_stage_update {
            callback(stage, status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use sitesmith_agents::AgentRole;
    use sitesmith_llm::mock::{CallLog, MockProvider};
    use sitesmith_llm::LlmError;

    const DESIGN_JSON: &str = r##"{"primary_color": "#2563eb", "secondary_color": "#1e40af", "background_color": "#ffffff", "text_color": "#111827", "accent_color": "#f59e0b", "heading_font": "Lora", "body_font": "Inter"}"##;

    const REVIEW_PASS: &str =
        r#"{"score": 92, "pass": true, "issues": [], "summary": "Solid page"}"#;

    const REVIEW_FAIL: &str = r#"{"score": 55, "pass": false, "issues": [
        {"severity": "critical", "category": "accessibility",
         "description": "Images missing alt text", "fix_suggestion": "Add alt attributes"}
    ], "summary": "Needs fixes"}"#;

    const REVIEW_FAIL_INFO_ONLY: &str = r#"{"score": 68, "pass": false, "issues": [
        {"severity": "info", "category": "quality",
         "description": "Could use more whitespace", "fix_suggestion": "Add padding"}
    ], "summary": "Minor nits"}"#;

    fn valid_html(marker: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head>\
             <script src=\"https://cdn.tailwindcss.com\"></script>\
             <title>{marker}</title>\
             <meta name=\"description\" content=\"{marker}\">\
             </head><body>{marker}</body></html>"
        )
    }

    fn agent(role: AgentRole, mock: MockProvider) -> Agent {
        Agent::new(role, Arc::new(mock))
            .with_max_attempts(2)
            .with_backoff_unit(Duration::ZERO)
    }

    struct Mocks {
        strategist: MockProvider,
        copywriter: MockProvider,
        art_director: MockProvider,
        developer: MockProvider,
        reviewer: MockProvider,
        seo_optimizer: MockProvider,
    }

    impl Default for Mocks {
        fn default() -> Self {
            Self {
                strategist: MockProvider::always_text("strategist", "brief"),
                copywriter: MockProvider::always_text("copywriter", "copy"),
                art_director: MockProvider::always_text("art_director", DESIGN_JSON),
                developer: MockProvider::always_text("developer", valid_html("v1")),
                reviewer: MockProvider::always_text("reviewer", REVIEW_PASS),
                seo_optimizer: MockProvider::always_text("seo", valid_html("seo")),
            }
        }
    }

    fn pipeline(mocks: Mocks, settings: PipelineSettings) -> BuildPipeline {
        let agents = AgentSet {
            strategist: agent(AgentRole::Strategist, mocks.strategist),
            copywriter: agent(AgentRole::Copywriter, mocks.copywriter),
            art_director: agent(AgentRole::ArtDirector, mocks.art_director),
            developer: agent(AgentRole::Developer, mocks.developer),
            reviewer: agent(AgentRole::Reviewer, mocks.reviewer),
            seo_optimizer: agent(AgentRole::SeoOptimizer, mocks.seo_optimizer),
        };
        BuildPipeline::new(agents, settings)
    }

    #[tokio::test]
    async fn test_happy_path_passes_review_first_try() {
        let outcome = pipeline(Mocks::default(), PipelineSettings::default())
            .run("A specialty coffee roastery in Lisbon")
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.fix_iterations, 0);
        assert!(outcome.html.contains("seo"));
        assert_eq!(outcome.artifacts[artifacts::STRATEGY], "brief");
        assert_eq!(outcome.artifacts[artifacts::COPY], "copy");
        assert_eq!(outcome.artifacts[artifacts::DESIGN]["heading_font"], "Lora");
        assert!(outcome.artifacts[artifacts::DOCUMENT]
            .as_str()
            .unwrap()
            .contains("v1"));
        assert!(outcome.review_report.is_some());
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_strategist_failure_halts_run() {
        let mocks = Mocks {
            strategist: MockProvider::always_err(
                "strategist",
                LlmError::AuthenticationFailed {
                    message: "bad key".to_string(),
                },
            ),
            ..Mocks::default()
        };
        let outcome = pipeline(mocks, PipelineSettings::default())
            .run("A bakery")
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.as_deref().unwrap().starts_with("Strategist failed"));
        assert!(outcome.html.is_empty());
        assert!(outcome.artifacts.is_empty());
        // Both attempts of the failing stage are recorded.
        assert_eq!(outcome.stages.len(), 1);
        assert_eq!(outcome.stages[0].attempts, 2);
    }

    #[tokio::test]
    async fn test_fan_out_failure_discards_sibling_artifact_but_counts_usage() {
        let mocks = Mocks {
            // Invalid JSON every attempt: both attempts still bill usage.
            art_director: MockProvider::always_text("art_director", "not json"),
            ..Mocks::default()
        };
        let outcome = pipeline(mocks, PipelineSettings::default())
            .run("A bakery")
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.as_deref().unwrap().contains("Art Director"));
        assert!(outcome.artifacts.contains_key(artifacts::STRATEGY));
        assert!(!outcome.artifacts.contains_key(artifacts::COPY));
        assert!(!outcome.artifacts.contains_key(artifacts::DESIGN));
        // strategist + copywriter (1 attempt each) + art director (2 attempts),
        // 0.001 per response.
        assert!((outcome.totals.cost_usd - 0.004).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_developer_never_starts_before_both_fan_out_agents_return() {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let mocks = Mocks {
            copywriter: MockProvider::always_text("copywriter", "copy")
                .with_call_log(log.clone())
                .with_delay(Duration::from_millis(50)),
            art_director: MockProvider::always_text("art_director", DESIGN_JSON)
                .with_call_log(log.clone())
                .with_delay(Duration::from_millis(5)),
            developer: MockProvider::always_text("developer", valid_html("v1"))
                .with_call_log(log.clone()),
            ..Mocks::default()
        };
        let outcome = pipeline(mocks, PipelineSettings::default())
            .run("A bakery")
            .await;
        assert!(outcome.success);

        let log = log.lock().unwrap();
        let dev_pos = log.iter().position(|l| l == "developer").unwrap();
        let copy_pos = log.iter().position(|l| l == "copywriter").unwrap();
        let art_pos = log.iter().position(|l| l == "art_director").unwrap();
        assert!(dev_pos > copy_pos);
        assert!(dev_pos > art_pos);
    }

    #[tokio::test]
    async fn test_corrective_loop_exhausts_iteration_cap() {
        let mocks = Mocks {
            reviewer: MockProvider::always_text("reviewer", REVIEW_FAIL),
            ..Mocks::default()
        };
        let settings = PipelineSettings {
            max_fix_iterations: 3,
            ..PipelineSettings::default()
        };
        let outcome = pipeline(mocks, settings).run("A bakery").await;

        assert!(outcome.success);
        assert_eq!(outcome.fix_iterations, 3);
        assert!(outcome.review_report.is_some());
    }

    #[tokio::test]
    async fn test_corrective_loop_replaces_artifact_each_round() {
        let developer = MockProvider::new("developer")
            .push_text(valid_html("v1"))
            .push_text(valid_html("v2"))
            .push_text(valid_html("v3"));
        let reviewer = MockProvider::new("reviewer")
            .push_text(REVIEW_FAIL)
            .push_text(REVIEW_FAIL)
            .push_text(REVIEW_PASS);
        let mocks = Mocks {
            developer,
            reviewer,
            // SEO failure keeps the corrected document as deliverable.
            seo_optimizer: MockProvider::always_err(
                "seo",
                LlmError::Timeout { seconds: 120 },
            ),
            ..Mocks::default()
        };
        let outcome = pipeline(mocks, PipelineSettings::default())
            .run("A bakery")
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.fix_iterations, 2);
        assert!(outcome.html.contains("v3"));
        let report: ReviewReport =
            serde_json::from_value(outcome.review_report.unwrap()).unwrap();
        assert!(report.passed);
    }

    #[tokio::test]
    async fn test_fix_request_reaches_developer_prompt() {
        let developer = MockProvider::new("developer")
            .push_text(valid_html("v1"))
            .push_text(valid_html("v2"));
        let reviewer = MockProvider::new("reviewer")
            .push_text(REVIEW_FAIL)
            .push_text(REVIEW_PASS);
        let developer = Arc::new(developer);
        let agents = AgentSet {
            strategist: agent(AgentRole::Strategist, MockProvider::always_text("s", "brief")),
            copywriter: agent(AgentRole::Copywriter, MockProvider::always_text("c", "copy")),
            art_director: agent(
                AgentRole::ArtDirector,
                MockProvider::always_text("a", DESIGN_JSON),
            ),
            developer: Agent::new(AgentRole::Developer, developer.clone())
                .with_backoff_unit(Duration::ZERO),
            reviewer: agent(AgentRole::Reviewer, reviewer),
            seo_optimizer: agent(
                AgentRole::SeoOptimizer,
                MockProvider::always_text("seo", valid_html("seo")),
            ),
        };
        let outcome = BuildPipeline::new(agents, PipelineSettings::default())
            .run("A bakery")
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.fix_iterations, 1);
        let calls = developer.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].user_prompt.contains("Images missing alt text"));
        assert!(calls[1].user_prompt.contains("Add alt attributes"));
        assert!(calls[1].user_prompt.contains("v1"));
    }

    #[tokio::test]
    async fn test_reviewer_execution_failure_ends_loop_without_failing_run() {
        let mocks = Mocks {
            reviewer: MockProvider::always_err(
                "reviewer",
                LlmError::RateLimited {
                    message: "quota".to_string(),
                    retry_after: None,
                },
            ),
            ..Mocks::default()
        };
        let outcome = pipeline(mocks, PipelineSettings::default())
            .run("A bakery")
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.fix_iterations, 0);
        assert!(outcome.review_report.is_none());
        assert!(outcome.html.contains("seo"));
    }

    #[tokio::test]
    async fn test_info_only_issues_do_not_trigger_fixes() {
        let mocks = Mocks {
            reviewer: MockProvider::always_text("reviewer", REVIEW_FAIL_INFO_ONLY),
            ..Mocks::default()
        };
        let outcome = pipeline(mocks, PipelineSettings::default())
            .run("A bakery")
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.fix_iterations, 0);
    }

    #[tokio::test]
    async fn test_failed_fix_keeps_prior_artifact_and_still_counts_iteration() {
        let developer = MockProvider::new("developer")
            .push_text(valid_html("v1"))
            .with_fallback(Ok(MockProvider::response("mock-model", "broken output")));
        let reviewer = MockProvider::new("reviewer")
            .push_text(REVIEW_FAIL)
            .push_text(REVIEW_FAIL);
        let mocks = Mocks {
            developer,
            reviewer,
            seo_optimizer: MockProvider::always_err(
                "seo",
                LlmError::Timeout { seconds: 120 },
            ),
            ..Mocks::default()
        };
        let settings = PipelineSettings {
            max_fix_iterations: 2,
            ..PipelineSettings::default()
        };
        let outcome = pipeline(mocks, settings).run("A bakery").await;

        assert!(outcome.success);
        assert_eq!(outcome.fix_iterations, 2);
        assert!(outcome.html.contains("v1"));
    }

    #[tokio::test]
    async fn test_disabled_loop_skips_reviewer_entirely() {
        let reviewer = MockProvider::new("reviewer");
        let reviewer_arc = Arc::new(reviewer);
        let agents = AgentSet {
            strategist: agent(AgentRole::Strategist, MockProvider::always_text("s", "brief")),
            copywriter: agent(AgentRole::Copywriter, MockProvider::always_text("c", "copy")),
            art_director: agent(
                AgentRole::ArtDirector,
                MockProvider::always_text("a", DESIGN_JSON),
            ),
            developer: agent(
                AgentRole::Developer,
                MockProvider::always_text("d", valid_html("v1")),
            ),
            reviewer: Agent::new(AgentRole::Reviewer, reviewer_arc.clone()),
            seo_optimizer: agent(
                AgentRole::SeoOptimizer,
                MockProvider::always_text("seo", valid_html("seo")),
            ),
        };
        let settings = PipelineSettings {
            auto_fix_enabled: false,
            ..PipelineSettings::default()
        };
        let outcome = BuildPipeline::new(agents, settings).run("A bakery").await;

        assert!(outcome.success);
        assert_eq!(outcome.fix_iterations, 0);
        assert_eq!(reviewer_arc.call_count(), 0);
        assert!(outcome.review_report.is_none());
    }

    #[tokio::test]
    async fn test_rtl_language_direction_reaches_agent_prompts() {
        let copywriter = Arc::new(MockProvider::always_text("copywriter", "copy"));
        let developer = Arc::new(MockProvider::always_text("developer", valid_html("v1")));
        let agents = AgentSet {
            strategist: agent(AgentRole::Strategist, MockProvider::always_text("s", "brief")),
            copywriter: Agent::new(AgentRole::Copywriter, copywriter.clone())
                .with_backoff_unit(Duration::ZERO),
            art_director: agent(
                AgentRole::ArtDirector,
                MockProvider::always_text("a", DESIGN_JSON),
            ),
            developer: Agent::new(AgentRole::Developer, developer.clone())
                .with_backoff_unit(Duration::ZERO),
            reviewer: agent(AgentRole::Reviewer, MockProvider::always_text("r", REVIEW_PASS)),
            seo_optimizer: agent(
                AgentRole::SeoOptimizer,
                MockProvider::always_text("seo", valid_html("seo")),
            ),
        };
        let settings = PipelineSettings {
            language: "Arabic".to_string(),
            rtl: true,
            ..PipelineSettings::default()
        };
        let outcome = BuildPipeline::new(agents, settings).run("A bakery").await;
        assert!(outcome.success);

        let copy_prompt = &copywriter.calls()[0].user_prompt;
        assert!(copy_prompt.contains("in Arabic"));
        assert!(copy_prompt.contains("Text direction is RTL"));
        assert!(developer.calls()[0].user_prompt.contains("dir=\"rtl\""));
    }

    #[tokio::test]
    async fn test_fan_out_records_carry_each_agents_own_latency() {
        let copy_response = sitesmith_llm::LlmResponse {
            latency_ms: 120.0,
            ..MockProvider::response("mock-model", "copy")
        };
        let design_response = sitesmith_llm::LlmResponse {
            latency_ms: 7.5,
            ..MockProvider::response("mock-model", DESIGN_JSON)
        };
        let mocks = Mocks {
            copywriter: MockProvider::new("copywriter").with_fallback(Ok(copy_response)),
            art_director: MockProvider::new("art_director").with_fallback(Ok(design_response)),
            ..Mocks::default()
        };
        let outcome = pipeline(mocks, PipelineSettings::default())
            .run("A bakery")
            .await;
        assert!(outcome.success);

        let record = |name: &str| {
            outcome
                .stages
                .iter()
                .find(|s| s.name == name)
                .unwrap()
                .duration_ms
        };
        assert!((record("Copywriter") - 120.0).abs() < 1e-9);
        assert!((record("Art Director") - 7.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_stage_callback_sees_running_then_done() {
        let events: Arc<Mutex<Vec<(String, StageStatus)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let callback: StageCallback = Arc::new(move |stage, status| {
            sink.lock().unwrap().push((stage.to_string(), status));
        });

        let outcome = pipeline(Mocks::default(), PipelineSettings::default())
            .with_stage_callback(callback)
            .run("A bakery")
            .await;
        assert!(outcome.success);

        let events = events.lock().unwrap();
        assert_eq!(
            events[0],
            ("Strategist".to_string(), StageStatus::Running)
        );
        assert_eq!(events[1], ("Strategist".to_string(), StageStatus::Done));
        assert!(events
            .iter()
            .any(|(s, st)| s == "SEO Optimizer" && *st == StageStatus::Done));
    }
}
