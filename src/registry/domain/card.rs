//! Agent card and skill value types.

use super::RegistryDomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named capability advertised on an agent card.
///
/// Only `name`, `description`, and `tags` take part in discovery. Any other
/// fields (`id`, `examples`, schemas) are kept verbatim so clients receive
/// the skill exactly as the agent published it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Skill {
    /// Creates a skill with the given name and no description or tags.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Sets the skill description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the discovery tags.
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the skill name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the skill description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the tags as published by the agent.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns whether any tag equals `needle` ignoring case.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn has_tag(&self, needle: &str) -> bool {
        self.tags.iter().any(|tag| tag.to_lowercase() == needle)
    }
}

/// Descriptive document an agent publishes about itself.
///
/// Cards are parsed once, when fetched, and never mutated afterwards; a
/// fresher card replaces the old one wholesale. Fields outside the
/// registry's schema are preserved for pass-through to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCard {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl AgentCard {
    /// Creates a card with the given name and no description or skills.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyCardName`] when the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryDomainError> {
        Self {
            name: name.into(),
            description: String::new(),
            skills: Vec::new(),
            extra: Map::new(),
        }
        .validated()
    }

    /// Parses and validates a card from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::InvalidCard`] when the document does
    /// not match the card schema, or [`RegistryDomainError::EmptyCardName`]
    /// when the name is blank.
    pub fn from_json(value: Value) -> Result<Self, RegistryDomainError> {
        serde_json::from_value::<Self>(value)
            .map_err(|err| RegistryDomainError::InvalidCard(err.to_string()))?
            .validated()
    }

    /// Sets the card description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a skill.
    #[must_use]
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Attaches a pass-through field that the registry does not interpret.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Returns the agent name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the agent description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the advertised skills in publication order.
    #[must_use]
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Returns a pass-through field by key.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    fn validated(self) -> Result<Self, RegistryDomainError> {
        if self.name.trim().is_empty() {
            return Err(RegistryDomainError::EmptyCardName);
        }
        Ok(self)
    }
}
