//! Dashboard figures and the recent-activity feed.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use lease_small_space_core::{Inquiry, Lead};

use crate::db::{AdminStore, Entity, Page, RepositoryError};

/// Items taken from each table for the activity feed.
const RECENT_PER_SOURCE: u32 = 3;

/// Items shown in the activity feed.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub leads: u64,
    pub inquiries: u64,
    pub responses: u64,
    /// Inquiries created in the last 24 hours.
    pub inquiries_last_day: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecentKind {
    Lead,
    Inquiry,
}

impl RecentKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Inquiry => "Inquiry",
        }
    }

    /// Listing page the item links to.
    #[must_use]
    pub const fn href(self) -> &'static str {
        match self {
            Self::Lead => "/leads",
            Self::Inquiry => "/inquiries",
        }
    }
}

/// One row of the activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentItem {
    pub id: Uuid,
    pub kind: RecentKind,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn display_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        "Unknown".to_owned()
    } else {
        name.to_owned()
    }
}

impl From<&Lead> for RecentItem {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id.as_uuid(),
            kind: RecentKind::Lead,
            name: display_name(&lead.name),
            email: lead.email.to_string(),
            phone: Some(lead.phone.clone()).filter(|p| !p.is_empty()),
            created_at: lead.created_at,
        }
    }
}

impl From<&Inquiry> for RecentItem {
    fn from(inquiry: &Inquiry) -> Self {
        Self {
            id: inquiry.id.as_uuid(),
            kind: RecentKind::Inquiry,
            name: display_name(&inquiry.full_name),
            email: inquiry.email.to_string(),
            phone: inquiry.phone.clone(),
            created_at: inquiry.created_at,
        }
    }
}

/// Merge leads and inquiries into one feed, newest first, at most `limit`.
#[must_use]
pub fn merge_recent(leads: &[Lead], inquiries: &[Inquiry], limit: usize) -> Vec<RecentItem> {
    let mut items: Vec<RecentItem> = leads
        .iter()
        .map(RecentItem::from)
        .chain(inquiries.iter().map(RecentItem::from))
        .collect();
    items.sort_by_key(|item| std::cmp::Reverse(item.created_at));
    items.truncate(limit);
    items
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent: Vec<RecentItem>,
}

/// Load every dashboard figure. The queries run concurrently and the
/// first failure fails the whole load.
///
/// # Errors
///
/// Returns the first `RepositoryError` raised by any query.
pub async fn load_dashboard(
    store: &dyn AdminStore,
    now: DateTime<Utc>,
) -> Result<Dashboard, RepositoryError> {
    let recent_page = Page::first(RECENT_PER_SOURCE);
    let (leads, inquiries, responses, inquiries_last_day, recent_leads, recent_inquiries) = tokio::try_join!(
        store.count(Entity::Leads),
        store.count(Entity::Inquiries),
        store.count(Entity::Responses),
        store.count_inquiries_since(now - Duration::hours(24)),
        store.leads(recent_page),
        store.inquiries(recent_page),
    )?;

    Ok(Dashboard {
        stats: DashboardStats {
            leads,
            inquiries,
            responses,
            inquiries_last_day,
        },
        recent: merge_recent(&recent_leads, &recent_inquiries, RECENT_LIMIT),
    })
}
