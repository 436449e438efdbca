//! Sitesmith
//!
//! Application crate: configuration, template and language registries,
//! version storage, the refinement service, and the wiring that turns an
//! [`AppConfig`] into a ready-to-run [`BuildPipeline`].

pub mod config;
pub mod language;
pub mod services;
pub mod storage;
pub mod templates;

use std::sync::Arc;
use std::time::Duration;

use sitesmith_agents::{Agent, AgentRole};
use sitesmith_llm::{create_provider, CachingProvider, LlmProvider, LlmResult, ResponseCache};
use sitesmith_pipeline::{AgentSet, BuildPipeline, PipelineSettings};

pub use config::AppConfig;
pub use services::RefinementService;
pub use storage::{BuildRecord, Version, VersionStore};

/// Config key for a role, matching the `[roles.*]` section names.
pub fn role_key(role: AgentRole) -> &'static str {
    match role {
        AgentRole::Strategist => "strategist",
        AgentRole::Copywriter => "copywriter",
        AgentRole::ArtDirector => "art_director",
        AgentRole::Developer => "developer",
        AgentRole::Reviewer => "reviewer",
        AgentRole::SeoOptimizer => "seo_optimizer",
        AgentRole::Refinement => "refinement",
        AgentRole::AbVariant => "ab_variant",
    }
}

fn provider_for_role(config: &AppConfig, role: AgentRole) -> LlmResult<Arc<dyn LlmProvider>> {
    let role_config = config.role_config(role_key(role));
    let provider = create_provider(role_config.provider_config())?;
    if config.cache.enabled {
        let cache = ResponseCache::new(
            config.cache_dir(),
            Duration::from_secs(config.cache.ttl_hours * 60 * 60),
        );
        Ok(Arc::new(CachingProvider::new(provider, cache)))
    } else {
        Ok(provider)
    }
}

/// One configured agent for a role.
pub fn build_agent(config: &AppConfig, role: AgentRole) -> LlmResult<Agent> {
    let role_config = config.role_config(role_key(role));
    let provider = provider_for_role(config, role)?;
    Ok(Agent::new(role, provider)
        .with_max_attempts(role_config.max_attempts)
        .with_options(role_config.generation_options()))
}

/// The six pipeline agents, each wired to its configured provider.
pub fn build_agent_set(config: &AppConfig) -> LlmResult<AgentSet> {
    Ok(AgentSet {
        strategist: build_agent(config, AgentRole::Strategist)?,
        copywriter: build_agent(config, AgentRole::Copywriter)?,
        art_director: build_agent(config, AgentRole::ArtDirector)?,
        developer: build_agent(config, AgentRole::Developer)?,
        reviewer: build_agent(config, AgentRole::Reviewer)?,
        seo_optimizer: build_agent(config, AgentRole::SeoOptimizer)?,
    })
}

/// Pipeline settings derived from config: template lookup (falling back to
/// the landing template) and language-name resolution.
pub fn pipeline_settings(config: &AppConfig) -> PipelineSettings {
    let lang = language::find_language(&config.pipeline.language);
    PipelineSettings {
        template: templates::template_or_default(&config.pipeline.template),
        auto_fix_enabled: config.pipeline.auto_fix,
        max_fix_iterations: config.pipeline.max_fix_iterations,
        language: lang.map(|l| l.name).unwrap_or("English").to_string(),
        rtl: lang.is_some_and(|l| l.rtl),
    }
}

/// A ready-to-run pipeline from application config.
pub fn build_pipeline(config: &AppConfig) -> LlmResult<BuildPipeline> {
    Ok(BuildPipeline::new(
        build_agent_set(config)?,
        pipeline_settings(config),
    ))
}

/// The refinement service (refine + A/B variants) from application config.
pub fn build_refinement_service(config: &AppConfig) -> LlmResult<RefinementService> {
    Ok(RefinementService::new(
        build_agent(config, AgentRole::Refinement)?,
        build_agent(config, AgentRole::AbVariant)?,
    ))
}
