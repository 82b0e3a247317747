use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// How pressing a trainer alert is.
///
/// Variants are declared from most to least urgent, so the derived ordering
/// sorts `High` first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Urgency {
    /// Parses the backend's urgency label; unknown labels mean no urgency.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Urgency::None)
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alta" | "high" => Ok(Urgency::High),
            "media" | "medium" => Ok(Urgency::Medium),
            "bassa" | "low" => Ok(Urgency::Low),
            "nessuna" | "none" => Ok(Urgency::None),
            _ => Err(format!("Unknown urgency: {}", s)),
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::High => write!(f, "high"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::Low => write!(f, "low"),
            Urgency::None => write!(f, "none"),
        }
    }
}

/// A trainer-to-client notice. Read-only snapshot of the alert feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAlert {
    pub id: String,
    pub title: String,
    pub description: String,
    pub expiry: Option<DateTime<Utc>>,
    pub urgency: Urgency,
}

impl UserAlert {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            expiry: None,
            urgency: Urgency::None,
        }
    }

    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// An alert without expiry never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|expiry| expiry < now)
    }

    /// Display order: urgency, then dated before undated, then nearest
    /// expiry, then title.
    pub fn display_order(&self, other: &Self) -> Ordering {
        self.urgency
            .cmp(&other.urgency)
            .then_with(|| match (self.expiry, other.expiry) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| self.title.cmp(&other.title))
    }
}

/// Drops expired alerts and orders the rest for display.
pub fn rank(alerts: impl IntoIterator<Item = UserAlert>, now: DateTime<Utc>) -> Vec<UserAlert> {
    let mut ranked: Vec<UserAlert> = alerts
        .into_iter()
        .filter(|alert| !alert.is_expired_at(now))
        .collect();
    ranked.sort_by(UserAlert::display_order);
    ranked
}

impl fmt::Display for UserAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.urgency, self.title)?;
        if let Some(expiry) = self.expiry {
            write!(f, " (until {})", expiry.format("%Y-%m-%d"))?;
        }
        if !self.description.is_empty() {
            write!(f, "\n    {}", self.description)?;
        }
        Ok(())
    }
}
