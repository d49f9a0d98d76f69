use std::time::Duration;

use carousel::{
    CarouselHandle, CarouselOptions, Direction, DirectionMode, Item, ManualIntersectionSource,
    RegionId, VisibilityMode, VisibilityTracker,
};
use tokio::time::sleep;

const REGION: RegionId = RegionId(1);

fn showcase() -> Vec<Item> {
    vec![
        Item::new(1, "Night of info")
            .with_tools("React, Tailwind CSS, Framer Motion, node.js")
            .with_demo_link("https://example.org/ocean"),
        Item::new(2, "Turnover prediction")
            .with_tools("Python, Scikit-learn, pandas")
            .with_demo_link("#"),
        Item::new(4, "Bike sharing analysis").with_tools("Python, Power BI"),
    ]
}

#[tokio::test(start_paused = true)]
async fn scrolling_the_section_into_view_drives_autoplay() {
    let source = ManualIntersectionSource::new();
    let tracker = VisibilityTracker::attach(source.clone(), REGION, 0.1, VisibilityMode::Follow)
        .await
        .expect("tracker");
    let options = CarouselOptions {
        start_auto_playing: true,
        ..CarouselOptions::default()
    };
    let handle =
        CarouselHandle::attach(showcase(), options, Some(tracker.subscribe())).expect("carousel");

    sleep(Duration::from_secs(30)).await;
    assert_eq!(handle.snapshot().current_index, Some(0), "off screen");

    source.report(REGION, 0.25);
    sleep(Duration::from_millis(5010)).await;
    let state = handle.snapshot();
    assert!(state.is_visible);
    assert_eq!(state.current_index, Some(1));
    let current = handle.current_item().expect("item");
    assert!(!current.has_demo(), "placeholder link hides the demo button");

    source.report(REGION, 0.02);
    sleep(Duration::from_secs(60)).await;
    assert_eq!(handle.snapshot().current_index, Some(1));

    tracker.detach().await.expect("detach tracker");
    assert!(!source.is_observed(REGION));

    let state = handle.next().await.expect("next");
    assert_eq!(state.current_index, Some(2));
    handle.detach().await;
}

#[tokio::test]
async fn documented_three_item_walkthrough() {
    let handle =
        CarouselHandle::attach(showcase(), CarouselOptions::default(), None).expect("carousel");

    let steps = [
        (handle.next().await, Some(1), Direction::Forward),
        (handle.next().await, Some(2), Direction::Forward),
        (handle.next().await, Some(0), Direction::Forward),
        (handle.go_to(2).await, Some(2), Direction::Forward),
        (handle.go_to(0).await, Some(0), Direction::Backward),
    ];
    for (result, index, direction) in steps {
        let state = result.expect("command");
        assert_eq!(state.current_index, index);
        assert_eq!(state.direction, direction);
    }
}

#[tokio::test]
async fn circular_mode_wraps_dot_navigation_forward() {
    let options = CarouselOptions {
        direction_mode: DirectionMode::Circular,
        initial_index: 2,
        ..CarouselOptions::default()
    };
    let handle = CarouselHandle::attach(showcase(), options, None).expect("carousel");

    let state = handle.go_to(0).await.expect("go_to");
    assert_eq!(state.direction, Direction::Forward);
}
