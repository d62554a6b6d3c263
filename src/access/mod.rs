// access/mod.rs - Route classification and the allow/challenge decision
//
// Paths are classified against four ordered lists: Test, DoctorAuth, Public,
// Protected. The first *list* containing a matching entry wins, so a Test
// pattern beats a more specific Protected one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::Identity;

/// Access-control category assigned to a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Diagnostics endpoints, always allowed
    Test,
    /// Doctor portal, guarded by its own credential scheme rather than the session
    DoctorAuth,
    /// Marketing pages, sign-in flows, webhooks
    Public,
    /// Requires a caller identity
    Protected,
    /// Matched nothing in the table
    Unclassified,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Test => "test",
            Classification::DoctorAuth => "doctor_auth",
            Classification::Public => "public",
            Classification::Protected => "protected",
            Classification::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single table entry: an exact path or a stem followed by any suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl RoutePattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(p) => path == *p,
            RoutePattern::Prefix(stem) => path.starts_with(stem),
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePattern::Exact(p) => f.write_str(p),
            RoutePattern::Prefix(stem) => write!(f, "{}*", stem),
        }
    }
}

/// What the gate does with paths that match no list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnclassifiedPolicy {
    /// Treat as protected
    Deny,
    /// Let through without an identity check
    Allow,
}

impl UnclassifiedPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deny" => Some(UnclassifiedPolicy::Deny),
            "allow" => Some(UnclassifiedPolicy::Allow),
            _ => None,
        }
    }
}

/// Outcome of the gate for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Challenge,
}

/// Ordered (classification, patterns) pairs, fixed at process start
#[derive(Debug, Clone)]
pub struct AccessTable {
    lists: Vec<(Classification, Vec<RoutePattern>)>,
    /// Paths whose 401 is rendered as `{error}` without a `success` key
    legacy_envelope: Vec<RoutePattern>,
}

impl AccessTable {
    /// Build a table from lists in priority order
    pub fn new(lists: Vec<(Classification, Vec<RoutePattern>)>) -> Self {
        Self {
            lists,
            legacy_envelope: Vec::new(),
        }
    }

    pub fn with_legacy_envelope(mut self, patterns: Vec<RoutePattern>) -> Self {
        self.legacy_envelope = patterns;
        self
    }

    pub fn uses_legacy_envelope(&self, path: &str) -> bool {
        self.legacy_envelope.iter().any(|p| p.matches(path))
    }

    pub fn classify(&self, path: &str) -> Classification {
        for (classification, patterns) in &self.lists {
            if patterns.iter().any(|p| p.matches(path)) {
                return *classification;
            }
        }
        Classification::Unclassified
    }

    pub fn lists(&self) -> &[(Classification, Vec<RoutePattern>)] {
        &self.lists
    }
}

impl Default for AccessTable {
    fn default() -> Self {
        use RoutePattern::{Exact, Prefix};

        Self::new(vec![
            (
                Classification::Test,
                vec![
                    Exact("/api/test-mongo"),
                    Exact("/api/test-db"),
                    Prefix("/api/test/"),
                ],
            ),
            (
                Classification::DoctorAuth,
                vec![Prefix("/api/doctor/"), Prefix("/doctor/")],
            ),
            (
                Classification::Public,
                vec![
                    Exact("/"),
                    Exact("/health"),
                    Prefix("/sign-in"),
                    Prefix("/sign-up"),
                    Exact("/pricing"),
                    Exact("/about"),
                    Prefix("/api/webhooks/"),
                ],
            ),
            (
                Classification::Protected,
                vec![
                    Prefix("/dashboard"),
                    Prefix("/api/analytics/"),
                    Prefix("/api/analysis"),
                    Prefix("/api/health-query"),
                    Prefix("/api/payments/"),
                    Prefix("/api/reports/"),
                    Prefix("/api/subscription/"),
                    Prefix("/upload"),
                    Prefix("/settings"),
                ],
            ),
        ])
        .with_legacy_envelope(vec![
            Exact("/api/payments/history"),
            Exact("/api/subscription/status"),
        ])
    }
}

/// Allow or challenge a request given its classification and resolved identity
pub fn decide(
    classification: Classification,
    identity: Option<&Identity>,
    unclassified: UnclassifiedPolicy,
) -> AccessDecision {
    let needs_identity = match classification {
        Classification::Test | Classification::DoctorAuth | Classification::Public => false,
        Classification::Protected => true,
        Classification::Unclassified => unclassified == UnclassifiedPolicy::Deny,
    };

    if needs_identity && identity.is_none() {
        AccessDecision::Challenge
    } else {
        AccessDecision::Allow
    }
}
