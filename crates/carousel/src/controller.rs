//! The carousel state machine.
//!
//! All index arithmetic and autoplay arming lives here. The controller is
//! synchronous and owns its [`AutoplayTimer`]; the async runtime in
//! [`crate::handle`] only sleeps until [`CarouselController::next_deadline`].

use std::time::Duration;

use shared::{
    domain::{CarouselState, Direction},
    error::CarouselError,
    protocol::{CarouselCommand, ChangeCause},
};
use tokio::time::Instant;
use tracing::debug;

use crate::{direction::DirectionMode, timer::AutoplayTimer};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);
pub const DEFAULT_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselOptions {
    pub interval: Duration,
    /// Visible fraction at which the containing region counts as on screen.
    pub threshold: f64,
    pub direction_mode: DirectionMode,
    pub initial_index: usize,
    pub start_auto_playing: bool,
    pub pause_on_hover: bool,
    pub pause_on_manual_navigation: bool,
    pub restart_timer_on_navigation: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            threshold: DEFAULT_THRESHOLD,
            direction_mode: DirectionMode::Linear,
            initial_index: 0,
            start_auto_playing: false,
            pause_on_hover: false,
            pause_on_manual_navigation: false,
            restart_timer_on_navigation: true,
        }
    }
}

impl CarouselOptions {
    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.interval.is_zero() {
            return Err(CarouselError::NonPositiveInterval(self.interval.as_millis()));
        }
        validate_threshold(self.threshold)
    }
}

pub fn validate_threshold(threshold: f64) -> Result<(), CarouselError> {
    if threshold.is_nan() || threshold <= 0.0 || threshold > 1.0 {
        return Err(CarouselError::InvalidThreshold(threshold));
    }
    Ok(())
}

#[derive(Debug)]
pub struct CarouselController {
    len: usize,
    current: usize,
    direction: Direction,
    is_auto_playing: bool,
    is_visible: bool,
    /// Autoplay flag to restore when the pointer leaves, set while hovered.
    hover_resume: Option<bool>,
    options: CarouselOptions,
    timer: AutoplayTimer,
}

impl CarouselController {
    pub fn new(item_count: i64, options: CarouselOptions) -> Result<Self, CarouselError> {
        let len =
            usize::try_from(item_count).map_err(|_| CarouselError::NegativeItemCount(item_count))?;
        options.validate()?;
        if len > 0 && options.initial_index >= len {
            return Err(CarouselError::InitialIndexOutOfRange {
                index: options.initial_index,
                len,
            });
        }

        let mut controller = Self {
            len,
            current: if len == 0 { 0 } else { options.initial_index },
            direction: Direction::None,
            is_auto_playing: options.start_auto_playing,
            is_visible: false,
            hover_resume: None,
            timer: AutoplayTimer::new(options.interval),
            options,
        };
        controller.reconcile_timer();
        Ok(controller)
    }

    pub fn for_items<T>(items: &[T], options: CarouselOptions) -> Result<Self, CarouselError> {
        let count = i64::try_from(items.len()).unwrap_or(i64::MAX);
        Self::new(count, options)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current_index(&self) -> Option<usize> {
        (self.len > 0).then_some(self.current)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_auto_playing(&self) -> bool {
        self.is_auto_playing
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn is_hovered(&self) -> bool {
        self.hover_resume.is_some()
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// `is_auto_playing ∧ is_visible ∧ len > 1`.
    pub fn arming_condition(&self) -> bool {
        self.is_auto_playing && self.is_visible && self.len > 1
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn snapshot(&self) -> CarouselState {
        CarouselState {
            current_index: self.current_index(),
            direction: self.direction,
            is_auto_playing: self.is_auto_playing,
            is_visible: self.is_visible,
            item_count: self.len,
            timer_armed: self.timer.is_armed(),
        }
    }

    pub fn next(&mut self) -> bool {
        if !self.step(Direction::Forward) {
            return false;
        }
        self.after_manual_navigation();
        true
    }

    pub fn prev(&mut self) -> bool {
        if !self.step(Direction::Backward) {
            return false;
        }
        self.after_manual_navigation();
        true
    }

    /// Jumps to `target`. Out-of-range targets and the current index are ignored.
    pub fn go_to(&mut self, target: i64) -> bool {
        let Ok(target) = usize::try_from(target) else {
            return false;
        };
        if target >= self.len || target == self.current {
            return false;
        }

        self.direction = self
            .options
            .direction_mode
            .resolve(self.current, target, self.len);
        self.current = target;
        debug!(index = target, direction = self.direction.sign(), "carousel jumped");
        self.after_manual_navigation();
        true
    }

    pub fn set_auto_playing(&mut self, enabled: bool) -> bool {
        if let Some(resume) = self.hover_resume.as_mut() {
            // Paused by hover: the snapshot is unchanged until pointer leave applies it.
            *resume = enabled;
            return false;
        }
        if self.is_auto_playing == enabled {
            return false;
        }
        self.is_auto_playing = enabled;
        self.reconcile_timer();
        true
    }

    pub fn on_visibility_change(&mut self, visible: bool) -> bool {
        if self.is_visible == visible {
            return false;
        }
        self.is_visible = visible;
        self.reconcile_timer();
        true
    }

    pub fn pointer_enter(&mut self) -> bool {
        if !self.options.pause_on_hover || self.hover_resume.is_some() {
            return false;
        }
        self.hover_resume = Some(self.is_auto_playing);
        self.is_auto_playing = false;
        self.reconcile_timer();
        true
    }

    pub fn pointer_leave(&mut self) -> bool {
        let Some(resume) = self.hover_resume.take() else {
            return false;
        };
        self.is_auto_playing = resume;
        self.reconcile_timer();
        true
    }

    /// Advances once if the autoplay deadline has passed, then re-arms from `now`.
    ///
    /// Ticks missed while the owner was not polling are dropped, not replayed.
    pub fn fire_autoplay(&mut self, now: Instant) -> bool {
        if !self.timer.is_due(now) {
            return false;
        }
        if !self.arming_condition() {
            self.timer.disarm();
            return false;
        }

        let advanced = self.step(Direction::Forward);
        self.timer.restart(now);
        advanced
    }

    /// Applies a renderer command and reports what changed, if anything.
    pub fn apply(&mut self, command: &CarouselCommand) -> Option<ChangeCause> {
        let (changed, cause) = match *command {
            CarouselCommand::Next => (self.next(), ChangeCause::Next),
            CarouselCommand::Prev => (self.prev(), ChangeCause::Prev),
            CarouselCommand::GoTo { index } => (self.go_to(index), ChangeCause::GoTo),
            CarouselCommand::SetAutoPlaying { enabled } => {
                (self.set_auto_playing(enabled), ChangeCause::AutoplayToggled)
            }
            CarouselCommand::VisibilityChanged { visible } => {
                (self.on_visibility_change(visible), ChangeCause::Visibility)
            }
            CarouselCommand::PointerEnter => (self.pointer_enter(), ChangeCause::Hover),
            CarouselCommand::PointerLeave => (self.pointer_leave(), ChangeCause::Hover),
        };
        changed.then_some(cause)
    }

    /// Consumes the controller and returns its final, disarmed snapshot.
    pub fn detach(mut self) -> CarouselState {
        self.timer.disarm();
        self.snapshot()
    }

    fn step(&mut self, direction: Direction) -> bool {
        if self.len <= 1 {
            return false;
        }

        self.current = match direction {
            Direction::Forward => (self.current + 1) % self.len,
            Direction::Backward => (self.current + self.len - 1) % self.len,
            Direction::None => self.current,
        };
        self.direction = direction;
        debug!(
            index = self.current,
            direction = direction.sign(),
            armed = self.timer.is_armed(),
            "carousel stepped"
        );
        true
    }

    fn after_manual_navigation(&mut self) {
        if self.options.pause_on_manual_navigation {
            match self.hover_resume.as_mut() {
                Some(resume) => *resume = false,
                None => self.is_auto_playing = false,
            }
        }
        self.reconcile_timer();
        if self.options.restart_timer_on_navigation && self.timer.is_armed() {
            self.timer.restart(Instant::now());
        }
    }

    fn reconcile_timer(&mut self) {
        let armed = self.arming_condition();
        self.timer.sync(armed, Instant::now());
    }
}
