//! Navigation targets produced by the session and checkout flows.

use std::fmt;

use reqwest::Url;

use crate::session::SessionState;

const CONFIRMATION_PATH: &str = "/order-confirmation";

/// A client route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Cart,
    Login,
    Register,
    Profile,
    OrderConfirmation { order_number: String },
}

impl Route {
    /// Path and query string for the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Cart => "/cart".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::OrderConfirmation { order_number } => confirmation_path(order_number),
        }
    }

    /// Where an authentication page sends a visitor who is already signed in.
    #[must_use]
    pub fn guard_auth_page(&self, session: &SessionState) -> Option<Self> {
        match self {
            Self::Login | Self::Register if session.is_authenticated => Some(Self::Profile),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn confirmation_path(order_number: &str) -> String {
    let url = Url::parse("http://storefront.invalid").and_then(|base| base.join(CONFIRMATION_PATH));
    let Ok(mut url) = url else {
        return CONFIRMATION_PATH.to_string();
    };

    url.query_pairs_mut().append_pair("orderNumber", order_number);

    format!("{}?{}", url.path(), url.query().unwrap_or_default())
}
