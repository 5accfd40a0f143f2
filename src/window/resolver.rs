use std::sync::Arc;

use super::service::{TokenizerService, WindowService};
use super::services;
use crate::models::tags::WIDER_CONTEXT_WINDOW_TAG;
use crate::models::{ModelRegistry, TagIndex, organization_of};

pub const GPT2_MODEL_NAME: &str = "huggingface/gpt2";
pub const GPTJ_MODEL_NAMES: &[&str] = &[
    "huggingface/gpt-j-6b",
    "together/gpt-j-6b",
    "gooseai/gpt-j-6b",
];
pub const GPTNEOX_MODEL_NAMES: &[&str] = &["together/gpt-neox-20b", "gooseai/gpt-neo-20b"];

pub type WindowServiceConstructor = fn(Arc<dyn TokenizerService>) -> Box<dyn WindowService>;

/// Condition under which a [`ResolutionRule`] applies.
#[derive(Debug, Clone, Copy)]
pub enum RulePredicate {
    /// The model is registered with this tag.
    HasTag(&'static str),
    /// The organization segment of the name is one of these.
    Organization(&'static [&'static str]),
    /// The full name is one of these.
    Named(&'static [&'static str]),
    /// Arbitrary name test for appended rules.
    Custom(fn(&str) -> bool),
}

impl RulePredicate {
    pub fn matches(&self, model_name: &str, index: &TagIndex<'_>) -> crate::Result<bool> {
        Ok(match self {
            Self::HasTag(tag) => index.has_tag(model_name, tag)?,
            Self::Organization(organizations) => {
                let organization = organization_of(model_name);
                organizations.iter().any(|candidate| *candidate == organization)
            }
            Self::Named(names) => names.iter().any(|candidate| *candidate == model_name),
            Self::Custom(predicate) => predicate(model_name),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResolutionRule {
    pub name: &'static str,
    pub predicate: RulePredicate,
    pub construct: WindowServiceConstructor,
}

impl ResolutionRule {
    pub const fn new(
        name: &'static str,
        predicate: RulePredicate,
        construct: WindowServiceConstructor,
    ) -> Self {
        Self {
            name,
            predicate,
            construct,
        }
    }

    pub fn matches(&self, model_name: &str, index: &TagIndex<'_>) -> crate::Result<bool> {
        self.predicate.matches(model_name, index)
    }
}

/// Dispatch rules in priority order.
///
/// Predicates overlap (a wide-window OpenAI model matches both of the first
/// two rules), so the order is part of the contract.
pub fn default_rules() -> Vec<ResolutionRule> {
    vec![
        ResolutionRule::new(
            "wider_context_window",
            RulePredicate::HasTag(WIDER_CONTEXT_WINDOW_TAG),
            services::wider_openai,
        ),
        ResolutionRule::new(
            "openai",
            RulePredicate::Organization(&["openai", "simple"]),
            services::openai,
        ),
        ResolutionRule::new(
            "microsoft",
            RulePredicate::Organization(&["microsoft"]),
            services::mt_nlg,
        ),
        ResolutionRule::new(
            "anthropic",
            RulePredicate::Organization(&["anthropic"]),
            services::anthropic,
        ),
        ResolutionRule::new(
            "gpt2",
            RulePredicate::Named(&[GPT2_MODEL_NAME]),
            services::gpt2,
        ),
        ResolutionRule::new("gptj", RulePredicate::Named(GPTJ_MODEL_NAMES), services::gptj),
        ResolutionRule::new(
            "gptneox",
            RulePredicate::Named(GPTNEOX_MODEL_NAMES),
            services::gptneox,
        ),
        ResolutionRule::new(
            "ai21",
            RulePredicate::Organization(&["ai21"]),
            services::ai21,
        ),
    ]
}

/// Picks the window service for a model name.
///
/// Resolution needs no metadata entry: the organization comes from the name,
/// and a name that matches no rule fails with `UnresolvedModel`.
#[derive(Debug, Clone)]
pub struct WindowServiceResolver<'a> {
    registry: &'a ModelRegistry,
    rules: Vec<ResolutionRule>,
}

impl<'a> WindowServiceResolver<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self::with_rules(registry, default_rules())
    }

    pub fn with_rules(registry: &'a ModelRegistry, rules: Vec<ResolutionRule>) -> Self {
        Self { registry, rules }
    }

    /// Append a rule; it only applies to names no existing rule matches.
    pub fn push_rule(&mut self, rule: ResolutionRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[ResolutionRule] {
        &self.rules
    }

    pub fn registry(&self) -> &'a ModelRegistry {
        self.registry
    }

    /// First rule matching `model_name`.
    pub fn matching_rule(&self, model_name: &str) -> crate::Result<&ResolutionRule> {
        self.registry.ensure_initialized()?;
        let index = self.registry.tags();

        for rule in &self.rules {
            if rule.matches(model_name, &index)? {
                return Ok(rule);
            }
        }
        Err(crate::Error::UnresolvedModel {
            name: model_name.to_string(),
        })
    }

    /// Construct the window service for `model_name`, passing `tokenizer` through.
    pub fn resolve(
        &self,
        model_name: &str,
        tokenizer: Arc<dyn TokenizerService>,
    ) -> crate::Result<Box<dyn WindowService>> {
        let rule = self.matching_rule(model_name)?;
        let service = (rule.construct)(tokenizer);
        tracing::debug!(
            model = model_name,
            rule = rule.name,
            kind = %service.kind(),
            "resolved window service"
        );
        Ok(service)
    }
}
