//! Chrome
//!
//! One configurable page chrome instead of the storefront's parallel
//! navbar/footer versions: capability flags select what a page shows, and
//! the runtime context derives the badge values. Rendering stays outside
//! this crate.

use rust_decimal::Decimal;

/// The signed-in account shown in the chrome's account menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Display name.
    pub name: String,

    /// Account rating.
    pub rating: Decimal,

    /// Lifetime order count.
    pub order_count: u32,
}

/// Authentication state the chrome renders for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Nobody signed in; the chrome shows a login action.
    #[default]
    Guest,

    /// A signed-in account.
    SignedIn(UserProfile),
}

/// Capability flags for one page's chrome.
#[derive(Debug, Clone)]
pub struct ChromeOptions {
    /// Show the cart badge.
    pub cart_badge: bool,

    /// Show the search bar.
    pub search_bar: bool,

    /// Show the notifications bell.
    pub notifications: bool,

    /// Authentication state.
    pub auth: AuthState,
}

impl ChromeOptions {
    /// The minimal chrome of the landing hero: no badge, no search, no
    /// notifications.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            cart_badge: false,
            search_bar: false,
            notifications: false,
            auth: AuthState::Guest,
        }
    }

    /// The full storefront chrome.
    #[must_use]
    pub fn full(auth: AuthState) -> Self {
        Self {
            cart_badge: true,
            search_bar: true,
            notifications: true,
            auth,
        }
    }
}

/// Runtime values the chrome derives its badges from.
#[derive(Debug, Clone, Default)]
pub struct NavContext {
    /// Items currently in the cart.
    pub cart_count: usize,

    /// Unread notifications.
    pub notification_count: usize,

    /// Current search input.
    pub search_query: String,
}

impl NavContext {
    /// Cart badge value, if the chrome shows one and the cart is non-empty.
    pub fn cart_badge(&self, options: &ChromeOptions) -> Option<usize> {
        (options.cart_badge && self.cart_count > 0).then_some(self.cart_count)
    }

    /// Notification badge value, if shown and non-zero.
    pub fn notification_badge(&self, options: &ChromeOptions) -> Option<usize> {
        (options.notifications && self.notification_count > 0).then_some(self.notification_count)
    }

    /// Normalize and submit the search query. Blank queries are rejected;
    /// a submitted query is logged and cleared from the input.
    pub fn submit_search(&mut self, options: &ChromeOptions) -> Option<String> {
        if !options.search_bar {
            return None;
        }

        let query = self.search_query.trim().to_string();

        if query.is_empty() {
            tracing::debug!("blank search ignored");
            return None;
        }

        tracing::info!(query = %query, "search submitted");
        self.search_query.clear();

        Some(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badges_require_capability_and_nonzero_count() {
        let context = NavContext {
            cart_count: 3,
            notification_count: 0,
            search_query: String::new(),
        };

        assert_eq!(context.cart_badge(&ChromeOptions::full(AuthState::Guest)), Some(3));
        assert_eq!(context.cart_badge(&ChromeOptions::minimal()), None);
        assert_eq!(
            context.notification_badge(&ChromeOptions::full(AuthState::Guest)),
            None
        );
    }

    #[test]
    fn submit_search_trims_and_clears() {
        let mut context = NavContext {
            search_query: "  biryani  ".to_string(),
            ..NavContext::default()
        };

        let submitted = context.submit_search(&ChromeOptions::full(AuthState::Guest));

        assert_eq!(submitted.as_deref(), Some("biryani"));
        assert!(context.search_query.is_empty());
    }

    #[test]
    fn blank_search_is_rejected() {
        let mut context = NavContext {
            search_query: "   ".to_string(),
            ..NavContext::default()
        };

        assert_eq!(context.submit_search(&ChromeOptions::full(AuthState::Guest)), None);
        assert_eq!(context.submit_search(&ChromeOptions::minimal()), None);
    }
}
