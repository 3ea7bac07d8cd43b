//! Static page content and the site render pass
//!
//! `render_site` turns a session into render instructions: the header, then
//! either the login form or the navigation bar, the current page and the
//! footer.

use serde::Serialize;

use crate::site::session::{Page, SessionState};

pub const SITE_TITLE: &str = "My Responsive Website";
pub const FOOTER_TEXT: &str = "© 2024 My Responsive Website. All rights reserved.";

/// One month of the dashboard page's sales line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySales {
    pub month: String,
    pub sales: i64,
}

/// A metric tile: label, value and change indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricTile {
    pub label: String,
    pub value: String,
    pub delta: String,
}

/// Content of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageContent {
    Home {
        title: String,
        latest_updates: Vec<String>,
        quick_links: Vec<String>,
    },
    Dashboard {
        title: String,
        chart_title: String,
        monthly_sales: Vec<MonthlySales>,
        metrics: Vec<MetricTile>,
    },
    Profile {
        title: String,
        name: String,
        role: String,
        avatar_url: String,
        email: String,
        phone: String,
    },
    About {
        title: String,
        mission: Vec<String>,
        values: Vec<String>,
    },
}

/// A navigation button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub page: Page,
    pub label: String,
    pub active: bool,
}

/// The login form fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub title: String,
    pub fields: Vec<String>,
    pub submit_label: String,
}

/// Main area of the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "body", rename_all = "snake_case")]
pub enum SiteBody {
    Login(LoginForm),
    Content {
        navigation: Vec<NavItem>,
        content: PageContent,
    },
}

/// Render instructions for one site pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteView {
    pub header: String,
    pub body: SiteBody,
    /// Only shown once logged in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Render a session
pub fn render_site(session: &SessionState) -> SiteView {
    if !session.is_logged_in() {
        return SiteView {
            header: SITE_TITLE.to_string(),
            body: SiteBody::Login(LoginForm {
                title: "Login".to_string(),
                fields: strings(&["Username", "Password"]),
                submit_label: "Login".to_string(),
            }),
            footer: None,
        };
    }

    let current = session.current_page();
    let navigation = Page::ALL
        .iter()
        .map(|&page| NavItem {
            page,
            label: page.label().to_string(),
            active: page == current,
        })
        .collect();

    SiteView {
        header: SITE_TITLE.to_string(),
        body: SiteBody::Content {
            navigation,
            content: render_page(current),
        },
        footer: Some(FOOTER_TEXT.to_string()),
    }
}

/// Content for a page
pub fn render_page(page: Page) -> PageContent {
    match page {
        Page::Home => PageContent::Home {
            title: "Welcome to our Website".to_string(),
            latest_updates: strings(&["New features added", "Improved performance", "Bug fixes"]),
            quick_links: strings(&["Documentation", "Support", "Contact Us"]),
        },
        Page::Dashboard => PageContent::Dashboard {
            title: "Dashboard".to_string(),
            chart_title: "Monthly Sales".to_string(),
            monthly_sales: [("Jan", 100), ("Feb", 120), ("Mar", 80), ("Apr", 150), ("May", 130)]
                .iter()
                .map(|(month, sales)| MonthlySales {
                    month: month.to_string(),
                    sales: *sales,
                })
                .collect(),
            metrics: [
                ("Total Sales", "$580", "+12%"),
                ("Customers", "1,234", "+5%"),
                ("Satisfaction", "98%", "+2%"),
            ]
            .iter()
            .map(|(label, value, delta)| MetricTile {
                label: label.to_string(),
                value: value.to_string(),
                delta: delta.to_string(),
            })
            .collect(),
        },
        Page::Profile => PageContent::Profile {
            title: "Profile".to_string(),
            name: "John Doe".to_string(),
            role: "Software Developer".to_string(),
            avatar_url: "https://via.placeholder.com/150".to_string(),
            email: "john@example.com".to_string(),
            phone: "+1234567890".to_string(),
        },
        Page::About => PageContent::About {
            title: "About Us".to_string(),
            mission: strings(&[
                "We are a company dedicated to providing the best services to our customers.",
                "Our mission is to make technology accessible to everyone.",
            ]),
            values: strings(&["Innovation", "Quality", "Customer Focus", "Integrity"]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::auth::StaticCredentials;

    fn logged_in() -> SessionState {
        let (session, _) = SessionState::default().login(&StaticCredentials::default(), "admin", "admin");
        session
    }

    #[test]
    fn test_logged_out_shows_only_login() {
        let view = render_site(&SessionState::default());

        assert_eq!(view.header, SITE_TITLE);
        assert!(matches!(view.body, SiteBody::Login(_)));
        assert!(view.footer.is_none());
    }

    #[test]
    fn test_logged_in_shows_current_page() {
        let session = logged_in().navigate(Page::Profile).unwrap();
        let view = render_site(&session);

        match view.body {
            SiteBody::Content {
                navigation,
                content,
            } => {
                assert_eq!(navigation.len(), 4);
                let active: Vec<Page> = navigation.iter().filter(|n| n.active).map(|n| n.page).collect();
                assert_eq!(active, vec![Page::Profile]);
                assert!(matches!(content, PageContent::Profile { .. }));
            }
            SiteBody::Login(_) => panic!("expected content"),
        }
        assert_eq!(view.footer.as_deref(), Some(FOOTER_TEXT));
    }

    #[test]
    fn test_dashboard_page_totals() {
        if let PageContent::Dashboard {
            monthly_sales,
            metrics,
            ..
        } = render_page(Page::Dashboard)
        {
            let total: i64 = monthly_sales.iter().map(|m| m.sales).sum();
            assert_eq!(total, 580);
            assert_eq!(metrics[0].value, "$580");
        } else {
            panic!("wrong page");
        }
    }

    #[test]
    fn test_every_page_renders() {
        for page in Page::ALL {
            let json = serde_json::to_value(render_page(page)).unwrap();
            assert_eq!(json["page"], page.to_string());
        }
    }
}
