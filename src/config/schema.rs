use crate::flags::Flags;
use crate::rule::Mode;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RuleConfig {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

impl RuleConfig {
    /// Check every definition, collecting all problems instead of stopping
    /// at the first one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.rules.is_empty() {
            issues.push(ValidationIssue::EmptyRuleList);
        }

        let all_names: Vec<&str> = self.rules.iter().map(|rule| rule.name.as_str()).collect();
        let mut declared: HashSet<&str> = HashSet::new();

        for rule in &self.rules {
            let id = (!rule.name.trim().is_empty()).then(|| rule.name.clone());
            if id.is_none() {
                issues.push(ValidationIssue::MissingField {
                    rule: None,
                    field: "name",
                });
            }

            match (&rule.pattern, rule.members.is_empty()) {
                (Some(_), false) => issues.push(ValidationIssue::InvalidCombo {
                    rule: id.clone(),
                    message: "a rule has either `pattern` or `members`, not both".to_string(),
                }),
                (None, true) => issues.push(ValidationIssue::MissingField {
                    rule: id.clone(),
                    field: "pattern",
                }),
                (Some(pattern), true) if pattern.is_empty() => {
                    issues.push(ValidationIssue::MissingField {
                        rule: id.clone(),
                        field: "pattern",
                    })
                }
                _ => {}
            }

            if !rule.members.is_empty() && rule.members.len() < rule.mode.min_children() {
                issues.push(ValidationIssue::InvalidCombo {
                    rule: id.clone(),
                    message: format!(
                        "{} rules need at least {} members",
                        rule.mode,
                        rule.mode.min_children()
                    ),
                });
            }

            for flag in &rule.flags {
                if Flags::parse(flag).is_none() {
                    issues.push(ValidationIssue::UnknownFlag {
                        rule: id.clone(),
                        flag: flag.clone(),
                    });
                }
            }

            if let Some(mask) = &rule.mask {
                if let Err(message) = mask.validate() {
                    issues.push(ValidationIssue::InvalidCombo {
                        rule: id.clone(),
                        message,
                    });
                }
            }

            let references = rule
                .members
                .iter()
                .chain(&rule.deny)
                .filter_map(Member::reference)
                .chain(rule.mask.as_ref().and_then(|mask| mask.rule.as_deref()));
            for reference in references {
                if declared.contains(reference) {
                    continue;
                }
                let issue = if all_names.contains(&reference) {
                    ValidationIssue::ForwardReference {
                        rule: id.clone(),
                        reference: reference.to_string(),
                    }
                } else {
                    ValidationIssue::UnknownReference {
                        rule: id.clone(),
                        reference: reference.to_string(),
                        suggestion: suggest(reference, declared.iter().copied()),
                    }
                };
                issues.push(issue);
            }

            if id.is_some() && !declared.insert(rule.name.as_str()) {
                issues.push(ValidationIssue::DuplicateName {
                    rule: rule.name.clone(),
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

/// Closest known name, if any is reasonably close.
fn suggest<'a>(reference: &str, known: impl Iterator<Item = &'a str>) -> Option<String> {
    known
        .map(|name| (strsim::jaro_winkler(reference, name), name))
        .filter(|(score, _)| *score >= 0.8)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, name)| name.to_string())
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RuleDefinition {
    #[serde(default)]
    pub name: String,
    /// Regular expression of a primitive rule.
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub mode: Mode,
    /// Children of a composite rule.
    #[serde(default)]
    pub members: Vec<Member>,
    /// Flag words such as `"i"` or `"ms"`; applied to every inline pattern
    /// of this rule.
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub mask: Option<MaskDefinition>,
    #[serde(default)]
    pub deny: Vec<Member>,
}

impl RuleDefinition {
    pub fn flags(&self) -> Flags {
        self.flags
            .iter()
            .filter_map(|word| Flags::parse(word))
            .fold(Flags::empty(), |acc, flags| acc | flags)
    }
}

/// A rule operand: an inline pattern or a reference to an earlier rule.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Member {
    Pattern(String),
    Rule { rule: String },
}

impl Member {
    pub fn reference(&self) -> Option<&str> {
        match self {
            Member::Rule { rule } => Some(rule),
            Member::Pattern(_) => None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MaskDefinition {
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub rule: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl MaskDefinition {
    pub fn validate(&self) -> Result<(), String> {
        match (&self.pattern, &self.rule) {
            (Some(_), Some(_)) => {
                return Err("mask takes either `pattern` or `rule`, not both".to_string())
            }
            (None, None) => return Err("mask needs a `pattern` or a `rule`".to_string()),
            _ => {}
        }
        if let Some(placeholder) = &self.placeholder {
            let mut chars = placeholder.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => {}
                _ => {
                    return Err(format!(
                        "mask placeholder {placeholder:?} must be a single ASCII character"
                    ))
                }
            }
        }
        Ok(())
    }

    pub fn target(&self) -> Option<Member> {
        match (&self.pattern, &self.rule) {
            (Some(pattern), None) => Some(Member::Pattern(pattern.clone())),
            (None, Some(rule)) => Some(Member::Rule { rule: rule.clone() }),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<char> {
        self.placeholder.as_deref().and_then(|text| text.chars().next())
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    EmptyRuleList,
    MissingField {
        rule: Option<String>,
        field: &'static str,
    },
    InvalidCombo {
        rule: Option<String>,
        message: String,
    },
    DuplicateName {
        rule: String,
    },
    UnknownFlag {
        rule: Option<String>,
        flag: String,
    },
    UnknownReference {
        rule: Option<String>,
        reference: String,
        suggestion: Option<String>,
    },
    ForwardReference {
        rule: Option<String>,
        reference: String,
    },
}

fn subject(rule: &Option<String>) -> String {
    match rule {
        Some(name) => format!("rule '{name}'"),
        None => "rule".to_string(),
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyRuleList => write!(f, "rule config contains no rules"),
            ValidationIssue::MissingField { rule, field } => {
                write!(f, "{} missing required field '{field}'", subject(rule))
            }
            ValidationIssue::InvalidCombo { rule, message } => {
                write!(f, "{} has invalid configuration: {message}", subject(rule))
            }
            ValidationIssue::DuplicateName { rule } => {
                write!(f, "rule '{rule}' is defined more than once")
            }
            ValidationIssue::UnknownFlag { rule, flag } => {
                write!(f, "{} has unknown flag '{flag}'", subject(rule))
            }
            ValidationIssue::UnknownReference {
                rule,
                reference,
                suggestion,
            } => {
                write!(f, "{} references unknown rule '{reference}'", subject(rule))?;
                if let Some(suggestion) = suggestion {
                    write!(f, " (did you mean '{suggestion}'?)")?;
                }
                Ok(())
            }
            ValidationIssue::ForwardReference { rule, reference } => write!(
                f,
                "{} references rule '{reference}' before it is defined",
                subject(rule)
            ),
        }
    }
}
