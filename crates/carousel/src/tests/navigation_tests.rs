use url::Url;

use crate::navigation::{NavAction, NavBar, NavVariant, SocialLink};

fn links() -> Vec<SocialLink> {
    vec![
        SocialLink {
            label: "github".to_string(),
            url: Url::parse("https://github.com/example").expect("url"),
        },
        SocialLink {
            label: "mail".to_string(),
            url: Url::parse("mailto:someone@example.org").expect("url"),
        },
    ]
}

#[test]
fn scroll_offset_toggles_scrolled_styling() {
    let mut nav = NavBar::new(NavVariant::Desktop, links());
    assert!(!nav.is_scrolled());

    assert!(nav.on_scroll(12.0));
    assert!(nav.is_scrolled());
    assert!(!nav.on_scroll(400.0));

    assert!(nav.on_scroll(0.0));
    assert!(!nav.is_scrolled());
}

#[test]
fn section_link_scrolls_in_place_on_home_page() {
    let mut nav = NavBar::new(NavVariant::Desktop, links());
    assert_eq!(
        nav.scroll_to_section("contact", "/"),
        NavAction::ScrollIntoView {
            section: "contact".to_string()
        }
    );
}

#[test]
fn section_link_routes_home_from_other_pages() {
    let mut nav = NavBar::new(NavVariant::Desktop, links());
    assert_eq!(
        nav.scroll_to_section("projets", "/cv"),
        NavAction::NavigateHome {
            scroll_to: "projets".to_string()
        }
    );
}

#[test]
fn desktop_variant_has_no_mobile_menu() {
    let mut nav = NavBar::new(NavVariant::Desktop, links());
    assert!(!nav.toggle_menu());
    assert!(!nav.is_menu_open());
}

#[test]
fn mobile_menu_closes_after_navigating() {
    let mut nav = NavBar::new(NavVariant::WithMobileMenu, links());
    assert!(nav.toggle_menu());
    assert!(nav.is_menu_open());

    nav.scroll_to_section("top", "/");
    assert!(!nav.is_menu_open());

    nav.toggle_menu();
    nav.toggle_menu();
    assert!(!nav.is_menu_open());
}

#[test]
fn links_are_kept_in_configured_order() {
    let nav = NavBar::new(NavVariant::WithMobileMenu, links());
    let labels: Vec<&str> = nav.links().iter().map(|link| link.label.as_str()).collect();
    assert_eq!(labels, ["github", "mail"]);
    assert_eq!(nav.variant(), NavVariant::WithMobileMenu);
}
