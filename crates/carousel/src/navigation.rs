//! Page navigation bar model.
//!
//! The page ships one navigation component in two variants; the mobile menu
//! is a capability of the variant, not a separate component.

use serde::{Deserialize, Serialize};
use url::Url;

pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavVariant {
    #[default]
    Desktop,
    WithMobileMenu,
}

impl NavVariant {
    pub fn has_mobile_menu(self) -> bool {
        matches!(self, NavVariant::WithMobileMenu)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavAction {
    /// Already on the home page: scroll the section into view.
    ScrollIntoView { section: String },
    /// Route home first, carrying the section to scroll to once there.
    NavigateHome { scroll_to: String },
}

#[derive(Debug, Clone)]
pub struct NavBar {
    variant: NavVariant,
    links: Vec<SocialLink>,
    is_scrolled: bool,
    menu_open: bool,
}

impl NavBar {
    pub fn new(variant: NavVariant, links: Vec<SocialLink>) -> Self {
        Self {
            variant,
            links,
            is_scrolled: false,
            menu_open: false,
        }
    }

    pub fn variant(&self) -> NavVariant {
        self.variant
    }

    pub fn links(&self) -> &[SocialLink] {
        &self.links
    }

    pub fn is_scrolled(&self) -> bool {
        self.is_scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Returns whether the scrolled styling flipped.
    pub fn on_scroll(&mut self, offset_y: f64) -> bool {
        let scrolled = offset_y > 0.0;
        let changed = scrolled != self.is_scrolled;
        self.is_scrolled = scrolled;
        changed
    }

    pub fn toggle_menu(&mut self) -> bool {
        if !self.variant.has_mobile_menu() {
            return false;
        }
        self.menu_open = !self.menu_open;
        true
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn scroll_to_section(&mut self, section: &str, current_path: &str) -> NavAction {
        self.close_menu();
        if current_path == HOME_PATH {
            NavAction::ScrollIntoView {
                section: section.to_string(),
            }
        } else {
            NavAction::NavigateHome {
                scroll_to: section.to_string(),
            }
        }
    }
}
