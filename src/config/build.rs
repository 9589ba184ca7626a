use crate::config::schema::{Member, Metadata, RuleConfig, RuleDefinition, ValidationError};
use crate::flags::Flags;
use crate::rule::{CompositeRule, Rule, RuleError};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("invalid rule config: {0}")]
    Invalid(#[from] ValidationError),

    #[error("rule '{name}': {source}")]
    Rule {
        name: String,
        #[source]
        source: RuleError,
    },

    #[error("rule '{name}' references unknown rule '{reference}'")]
    UnknownReference { name: String, reference: String },
}

/// Named rules compiled from a [`RuleConfig`], in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    meta: Metadata,
    rules: Vec<(String, Rule)>,
    index: HashMap<String, usize>,
}

impl RuleSet {
    /// Compile every definition of `config` in declaration order.
    ///
    /// The loader already validates what it parses, but a `RuleConfig` can
    /// also be built or edited in code, so `build` validates again before
    /// resolving references. Lookups below rely on that check.
    pub fn build(config: &RuleConfig) -> Result<Self, BuildError> {
        config.validate()?;

        let mut set = RuleSet {
            meta: config.meta.clone(),
            ..RuleSet::default()
        };
        for definition in &config.rules {
            let rule = set.compile_definition(definition)?;
            debug!(name = %definition.name, %rule, "compiled rule");
            set.index.insert(definition.name.clone(), set.rules.len());
            set.rules.push((definition.name.clone(), rule));
        }
        Ok(set)
    }

    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.index.get(name).map(|&idx| &self.rules[idx].1)
    }

    /// The rule declared last, usually the one the file exists for.
    pub fn last(&self) -> Option<(&str, &Rule)> {
        self.rules.last().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn compile_definition(&self, definition: &RuleDefinition) -> Result<Rule, BuildError> {
        let name = &definition.name;
        let flags = definition.flags();
        let wrap = |source: RuleError| BuildError::Rule {
            name: name.clone(),
            source,
        };

        let mut rule = match &definition.pattern {
            Some(pattern) => Rule::with_flags(pattern, flags).map_err(wrap)?,
            None => {
                let children = definition
                    .members
                    .iter()
                    .map(|member| self.resolve(name, member, flags))
                    .collect::<Result<Vec<_>, _>>()?;
                Rule::from(CompositeRule::new(definition.mode, children).map_err(wrap)?)
            }
        };

        if let Some(mask) = &definition.mask {
            if let Some(target) = mask.target() {
                let target = self.resolve(name, &target, flags)?;
                rule = match mask.placeholder() {
                    Some(placeholder) => rule.mask_with(target, placeholder),
                    None => rule.mask(target),
                }
                .map_err(wrap)?;
            }
        }

        for deny in &definition.deny {
            let deny = self.resolve(name, deny, flags)?;
            rule = rule.exclude(deny).map_err(wrap)?;
        }

        Ok(rule)
    }

    fn resolve(&self, name: &str, member: &Member, flags: Flags) -> Result<Rule, BuildError> {
        match member {
            Member::Pattern(pattern) => {
                Rule::with_flags(pattern, flags).map_err(|source| BuildError::Rule {
                    name: name.to_string(),
                    source,
                })
            }
            Member::Rule { rule } => {
                self.get(rule)
                    .cloned()
                    .ok_or_else(|| BuildError::UnknownReference {
                        name: name.to_string(),
                        reference: rule.clone(),
                    })
            }
        }
    }
}
