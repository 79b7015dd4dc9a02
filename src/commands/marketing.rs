//! Newsletter and banner commands.

use super::open_storage;
use crate::config::Config;
use crate::marketing::{InteractionKind, Marketing};
use crate::storage::Storage;
use anyhow::{Context, Result};
use chrono::Utc;

pub struct MarketingCommand {
    storage: Storage,
}

impl MarketingCommand {
    pub fn new(config: &Config) -> Self {
        Self::with_storage(open_storage(config))
    }

    pub fn with_storage(storage: Storage) -> Self {
        Self { storage }
    }

    /// Subscribes an email address to the newsletter.
    pub fn subscribe(&self, email: &str) -> Result<String> {
        let mut marketing = Marketing::hydrate(self.storage.clone());
        let added = marketing.subscribe(email).context("Subscription rejected")?;

        if added {
            marketing.track("newsletter", InteractionKind::Convert);
            Ok(format!("Subscribed {} to the newsletter.", email.trim()))
        } else {
            Ok(format!("{} is already subscribed.", email.trim()))
        }
    }

    /// Lists campaigns that are running and not dismissed.
    pub fn campaigns(&self) -> Result<String> {
        let mut marketing = Marketing::hydrate(self.storage.clone());
        let visible: Vec<(String, String, String)> = marketing
            .visible_campaigns(Utc::now())
            .into_iter()
            .map(|c| (c.id.clone(), c.title.clone(), c.message.clone()))
            .collect();

        if visible.is_empty() {
            return Ok("No active campaigns.".to_string());
        }

        let mut output = String::new();
        for (id, title, message) in &visible {
            marketing.track(id, InteractionKind::View);
            output.push_str(&format!("[{}] {}\n", id, title));
            if !message.is_empty() {
                output.push_str(&format!("    {}\n", message));
            }
        }
        Ok(output.trim_end().to_string())
    }

    /// Hides a banner on later runs.
    pub fn dismiss_banner(&self, banner_id: &str) -> Result<String> {
        let banner_id = banner_id.trim();
        if banner_id.is_empty() {
            anyhow::bail!("Banner id must not be empty");
        }

        let mut marketing = Marketing::hydrate(self.storage.clone());
        marketing.dismiss(banner_id);
        marketing.track(banner_id, InteractionKind::Dismiss);
        Ok(format!("Banner '{}' dismissed.", banner_id))
    }
}
