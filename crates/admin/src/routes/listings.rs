//! Paginated listings of leads, inquiries, responses and users.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use lease_small_space_core::{Inquiry, Lead, QuestionnaireResponse, User};

use crate::db::{Entity, Page};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// `?page=N`, 1-based.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

impl PageQuery {
    #[must_use]
    pub fn page(&self) -> Page {
        Page::new(self.page.unwrap_or(1))
    }
}

/// Navigation shown under a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub base: &'static str,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    pub prev: Option<u32>,
    pub next: Option<u32>,
    pub export_href: String,
}

impl Pagination {
    #[must_use]
    pub fn new(entity: Entity, page: Page, total: u64) -> Self {
        let pages = page.count_for(total);
        let number = page.number();
        let export_href = if number > 1 {
            format!("/{}/export.csv?page={number}", entity.slug())
        } else {
            format!("/{}/export.csv", entity.slug())
        };
        Self {
            base: match entity {
                Entity::Leads => "/leads",
                Entity::Inquiries => "/inquiries",
                Entity::Responses => "/responses",
                Entity::Users => "/users",
            },
            page: number,
            pages,
            total,
            prev: (number > 1).then(|| number - 1),
            next: (number < pages).then(|| number + 1),
            export_href,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "leads.html")]
pub struct LeadsTemplate {
    pub title: &'static str,
    pub rows: Vec<Lead>,
    pub pagination: Pagination,
}

#[derive(Template, WebTemplate)]
#[template(path = "inquiries.html")]
pub struct InquiriesTemplate {
    pub title: &'static str,
    pub rows: Vec<Inquiry>,
    pub pagination: Pagination,
}

#[derive(Template, WebTemplate)]
#[template(path = "responses.html")]
pub struct ResponsesTemplate {
    pub title: &'static str,
    pub rows: Vec<QuestionnaireResponse>,
    pub pagination: Pagination,
}

#[derive(Template, WebTemplate)]
#[template(path = "users.html")]
pub struct UsersTemplate {
    pub title: &'static str,
    pub rows: Vec<User>,
    pub pagination: Pagination,
}

/// GET /leads
#[instrument(skip_all, fields(page = ?query.page))]
pub async fn leads(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Query(query): Query<PageQuery>,
) -> Result<LeadsTemplate, AppError> {
    let page = query.page();
    let store = state.store();
    let (total, rows) = tokio::try_join!(store.count(Entity::Leads), store.leads(page))?;
    Ok(LeadsTemplate {
        title: Entity::Leads.title(),
        rows,
        pagination: Pagination::new(Entity::Leads, page, total),
    })
}

/// GET /inquiries
#[instrument(skip_all, fields(page = ?query.page))]
pub async fn inquiries(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Query(query): Query<PageQuery>,
) -> Result<InquiriesTemplate, AppError> {
    let page = query.page();
    let store = state.store();
    let (total, rows) =
        tokio::try_join!(store.count(Entity::Inquiries), store.inquiries(page))?;
    Ok(InquiriesTemplate {
        title: Entity::Inquiries.title(),
        rows,
        pagination: Pagination::new(Entity::Inquiries, page, total),
    })
}

/// GET /responses
#[instrument(skip_all, fields(page = ?query.page))]
pub async fn responses(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Query(query): Query<PageQuery>,
) -> Result<ResponsesTemplate, AppError> {
    let page = query.page();
    let store = state.store();
    let (total, rows) =
        tokio::try_join!(store.count(Entity::Responses), store.responses(page))?;
    Ok(ResponsesTemplate {
        title: Entity::Responses.title(),
        rows,
        pagination: Pagination::new(Entity::Responses, page, total),
    })
}

/// GET /users
#[instrument(skip_all, fields(page = ?query.page))]
pub async fn users(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Query(query): Query<PageQuery>,
) -> Result<UsersTemplate, AppError> {
    let page = query.page();
    let store = state.store();
    let (total, rows) = tokio::try_join!(store.count(Entity::Users), store.users(page))?;
    Ok(UsersTemplate {
        title: Entity::Users.title(),
        rows,
        pagination: Pagination::new(Entity::Users, page, total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_middle_page() {
        let p = Pagination::new(Entity::Leads, Page::new(2), 60);
        assert_eq!(p.pages, 3);
        assert_eq!(p.prev, Some(1));
        assert_eq!(p.next, Some(3));
        assert_eq!(p.export_href, "/leads/export.csv?page=2");
    }

    #[test]
    fn test_pagination_single_page() {
        let p = Pagination::new(Entity::Users, Page::default(), 0);
        assert_eq!(p.pages, 1);
        assert_eq!(p.prev, None);
        assert_eq!(p.next, None);
        assert_eq!(p.export_href, "/users/export.csv");
    }
}
