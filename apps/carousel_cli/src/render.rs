//! Plain-text rendering of carousel snapshots.

use std::fmt::Write as _;

use carousel::navigation::{NavAction, NavBar};
use shared::domain::{CarouselState, Direction, Item};

pub fn card(item: Option<&Item>, state: &CarouselState) -> String {
    let mut out = String::new();
    let Some(item) = item else {
        out.push_str("(no items)\n");
        return out;
    };

    let _ = writeln!(out, "{} {}", slide_marker(state.direction), item.title);
    if !item.description.is_empty() {
        let _ = writeln!(out, "  {}", item.description);
    }
    let tools: Vec<&str> = item.tool_list().collect();
    if !tools.is_empty() {
        let _ = writeln!(out, "  tools: {}", tools.join(" · "));
    }
    if let Some(url) = item.demo_url() {
        let _ = writeln!(out, "  demo: {url}");
    }
    if !item.image.is_empty() {
        let _ = writeln!(out, "  image: {}", item.image);
    }
    let _ = writeln!(out, "{}", indicators(state));
    out.push_str(&status(state));
    out.push('\n');
    out
}

pub fn indicators(state: &CarouselState) -> String {
    let dots: Vec<&str> = (0..state.item_count)
        .map(|index| if state.is_current(index) { "●" } else { "○" })
        .collect();
    if state.can_navigate() {
        format!("  ‹ {} ›", dots.join(" "))
    } else {
        format!("  {}", dots.join(" "))
    }
}

pub fn status(state: &CarouselState) -> String {
    format!(
        "  [autoplay {}{}] [{}]",
        if state.is_auto_playing { "on" } else { "off" },
        if state.timer_armed { ", running" } else { "" },
        if state.is_visible { "visible" } else { "hidden" },
    )
}

fn slide_marker(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "→",
        Direction::Backward => "←",
        Direction::None => "•",
    }
}

pub fn nav_header(nav: &NavBar) -> String {
    let links: Vec<String> = nav
        .links()
        .iter()
        .map(|link| format!("{} <{}>", link.label, link.url))
        .collect();
    let mut header = format!("== {} ==", links.join(" | "));
    if nav.is_scrolled() {
        header.push_str(" (condensed)");
    }
    if nav.is_menu_open() {
        header.push_str(" [menu open]");
    }
    header
}

pub fn nav_action(action: &NavAction) -> String {
    match action {
        NavAction::ScrollIntoView { section } => format!("scrolling to #{section}"),
        NavAction::NavigateHome { scroll_to } => format!("navigating to / then #{scroll_to}"),
    }
}
