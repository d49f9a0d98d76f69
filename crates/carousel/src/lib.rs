//! Cyclic media carousel: index arithmetic, autoplay arming and viewport
//! visibility for a fixed, ordered set of display items.

pub mod config;
pub mod controller;
pub mod direction;
mod handle;
pub mod navigation;
pub mod timer;
pub mod visibility;

pub use controller::{CarouselController, CarouselOptions};
pub use direction::DirectionMode;
pub use handle::CarouselHandle;
pub use shared::{
    domain::{CarouselState, Direction, Item, ItemId, RegionId},
    error::CarouselError,
    protocol::{CarouselCommand, CarouselEvent, ChangeCause},
};
pub use visibility::{
    IntersectionSource, ManualIntersectionSource, VisibilityMode, VisibilityTracker,
};

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;

#[cfg(test)]
#[path = "tests/direction_tests.rs"]
mod direction_tests;

#[cfg(test)]
#[path = "tests/timer_tests.rs"]
mod timer_tests;

#[cfg(test)]
#[path = "tests/visibility_tests.rs"]
mod visibility_tests;

#[cfg(test)]
#[path = "tests/handle_tests.rs"]
mod handle_tests;

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod navigation_tests;

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
