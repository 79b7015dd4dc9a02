//! Newsletter sign-ups, promotional campaigns, dismissed banners and
//! campaign interaction tracking.

use crate::error::{StoreError, StoreResult};
use crate::storage::{keys, Storage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Interaction log size; older entries are dropped first.
pub const MAX_MARKETING_INTERACTIONS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    View,
    Click,
    Dismiss,
    Convert,
}

impl std::str::FromStr for InteractionKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "click" => Ok(Self::Click),
            "dismiss" => Ok(Self::Dismiss),
            "convert" => Ok(Self::Convert),
            other => Err(StoreError::invalid(format!("unknown interaction kind '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub campaign_id: String,
    pub kind: InteractionKind,
    pub at: DateTime<Utc>,
}

/// A promotional banner. Shown while active and inside its date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Campaign {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            message: String::new(),
            active: true,
            starts_at: None,
            ends_at: None,
        }
    }

    /// True if the campaign is switched on and `now` is inside its window.
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        self.active
            && self.starts_at.is_none_or(|start| start <= now)
            && self.ends_at.is_none_or(|end| now < end)
    }
}

/// Checks the basic shape `local@domain.tld`.
pub fn validate_email(email: &str) -> StoreResult<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(StoreError::invalid("email must not be empty"));
    }

    let malformed = || StoreError::invalid(format!("'{}' is not a valid email address", email));
    let (local, domain) = email.split_once('@').ok_or_else(malformed)?;
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..");

    if local.is_empty() || !domain_ok || domain.contains('@') || email.contains(char::is_whitespace) {
        return Err(malformed());
    }
    Ok(email.to_string())
}

/// Persisted marketing state.
#[derive(Debug)]
pub struct Marketing {
    storage: Storage,
    subscriptions: Vec<Subscription>,
    campaigns: Vec<Campaign>,
    dismissed: Vec<String>,
    interactions: VecDeque<Interaction>,
}

impl Marketing {
    pub fn hydrate(storage: Storage) -> Self {
        let subscriptions: Vec<Subscription> =
            storage.load_or_default(keys::NEWSLETTER_SUBSCRIPTIONS);
        let campaigns: Vec<Campaign> = storage.load_or_default(keys::MARKETING_CAMPAIGNS);
        let dismissed: Vec<String> = storage.load_or_default(keys::DISMISSED_BANNERS);
        let mut interactions: VecDeque<Interaction> =
            storage.load_or_default(keys::MARKETING_INTERACTIONS);
        while interactions.len() > MAX_MARKETING_INTERACTIONS {
            interactions.pop_front();
        }

        debug!(
            "Loaded {} subscriptions, {} campaigns, {} dismissed banners, {} interactions",
            subscriptions.len(),
            campaigns.len(),
            dismissed.len(),
            interactions.len()
        );
        Self { storage, subscriptions, campaigns, dismissed, interactions }
    }

    /// Subscribes an address. Returns false if it was already subscribed.
    pub fn subscribe(&mut self, email: &str) -> StoreResult<bool> {
        self.subscribe_at(email, Utc::now())
    }

    pub fn subscribe_at(&mut self, email: &str, at: DateTime<Utc>) -> StoreResult<bool> {
        let email = validate_email(email)?;
        if self.is_subscribed(&email) {
            debug!("{} already subscribed", email);
            return Ok(false);
        }

        info!("Subscribed {} to the newsletter", email);
        self.subscriptions.push(Subscription { email, subscribed_at: at });
        self.storage.save(keys::NEWSLETTER_SUBSCRIPTIONS, &self.subscriptions);
        Ok(true)
    }

    pub fn is_subscribed(&self, email: &str) -> bool {
        let email = email.trim();
        self.subscriptions.iter().any(|s| s.email.eq_ignore_ascii_case(email))
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Adds a campaign, replacing any stored campaign with the same id.
    pub fn upsert_campaign(&mut self, campaign: Campaign) -> StoreResult<()> {
        if campaign.id.trim().is_empty() {
            return Err(StoreError::invalid("campaign id must not be empty"));
        }
        if let (Some(start), Some(end)) = (campaign.starts_at, campaign.ends_at) {
            if end <= start {
                return Err(StoreError::invalid(format!(
                    "campaign '{}' ends before it starts",
                    campaign.id
                )));
            }
        }

        match self.campaigns.iter_mut().find(|c| c.id == campaign.id) {
            Some(existing) => *existing = campaign,
            None => self.campaigns.push(campaign),
        }
        self.storage.save(keys::MARKETING_CAMPAIGNS, &self.campaigns);
        Ok(())
    }

    /// Removes a campaign. Returns false if no campaign had that id.
    pub fn remove_campaign(&mut self, campaign_id: &str) -> bool {
        let before = self.campaigns.len();
        self.campaigns.retain(|c| c.id != campaign_id);
        if self.campaigns.len() == before {
            return false;
        }
        self.storage.save(keys::MARKETING_CAMPAIGNS, &self.campaigns);
        true
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// Campaigns to show at `now`: running and not dismissed, in stored order.
    pub fn visible_campaigns(&self, now: DateTime<Utc>) -> Vec<&Campaign> {
        self.campaigns
            .iter()
            .filter(|c| c.is_running(now) && !self.is_dismissed(&c.id))
            .collect()
    }

    /// Hides a banner. Dismissing twice is a no-op.
    pub fn dismiss(&mut self, banner_id: &str) {
        if self.is_dismissed(banner_id) {
            return;
        }
        self.dismissed.push(banner_id.to_string());
        self.storage.save(keys::DISMISSED_BANNERS, &self.dismissed);
    }

    pub fn is_dismissed(&self, banner_id: &str) -> bool {
        self.dismissed.iter().any(|b| b == banner_id)
    }

    pub fn track(&mut self, campaign_id: &str, kind: InteractionKind) {
        self.track_at(campaign_id, kind, Utc::now());
    }

    pub fn track_at(&mut self, campaign_id: &str, kind: InteractionKind, at: DateTime<Utc>) {
        if self.interactions.len() >= MAX_MARKETING_INTERACTIONS {
            self.interactions.pop_front();
        }
        self.interactions.push_back(Interaction { campaign_id: campaign_id.to_string(), kind, at });
        self.storage.save(keys::MARKETING_INTERACTIONS, &self.interactions);
    }

    /// Interaction log, oldest first.
    pub fn interactions(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions.iter()
    }

    pub fn interaction_count(&self, campaign_id: &str, kind: InteractionKind) -> usize {
        self.interactions.iter().filter(|i| i.campaign_id == campaign_id && i.kind == kind).count()
    }
}
