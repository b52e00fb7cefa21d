//! The minimal request view handed to visibility callbacks.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Visibility predicate evaluated per request.
pub type CanSee = Arc<dyn Fn(&RequestContext) -> bool + Send + Sync>;

/// Ability that grants every other ability.
const WILDCARD_ABILITY: &str = "*";

/// The authenticated user, reduced to what authorization needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub abilities: BTreeSet<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            abilities: BTreeSet::new(),
        }
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.abilities.insert(ability.into());
        self
    }

    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities.extend(abilities.into_iter().map(Into::into));
        self
    }

    /// True when the user holds `ability` or the wildcard ability.
    pub fn can(&self, ability: &str) -> bool {
        self.abilities.contains(ability) || self.abilities.contains(WILDCARD_ABILITY)
    }
}

/// Current request: user identity, path and query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub user: Option<User>,
    pub path: String,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
}

impl RequestContext {
    /// Context for an unauthenticated request.
    pub fn guest(path: impl Into<String>) -> Self {
        Self {
            user: None,
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    /// Context for an authenticated request.
    pub fn for_user(user: User, path: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Guests hold no abilities.
    pub fn can(&self, ability: &str) -> bool {
        self.user.as_ref().is_some_and(|u| u.can(ability))
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}
