use serde::{Deserialize, Serialize};

use crate::domain::CarouselState;

/// UI events a renderer forwards into a carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CarouselCommand {
    Next,
    Prev,
    /// Dot navigation. Signed so that malformed indices can be absorbed.
    GoTo {
        index: i64,
    },
    SetAutoPlaying {
        enabled: bool,
    },
    VisibilityChanged {
        visible: bool,
    },
    PointerEnter,
    PointerLeave,
}

impl CarouselCommand {
    pub fn name(&self) -> &'static str {
        match self {
            CarouselCommand::Next => "next",
            CarouselCommand::Prev => "prev",
            CarouselCommand::GoTo { .. } => "go_to",
            CarouselCommand::SetAutoPlaying { .. } => "set_auto_playing",
            CarouselCommand::VisibilityChanged { .. } => "visibility_changed",
            CarouselCommand::PointerEnter => "pointer_enter",
            CarouselCommand::PointerLeave => "pointer_leave",
        }
    }

    pub fn is_manual_navigation(&self) -> bool {
        matches!(
            self,
            CarouselCommand::Next | CarouselCommand::Prev | CarouselCommand::GoTo { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCause {
    Next,
    Prev,
    GoTo,
    Autoplay,
    AutoplayToggled,
    Visibility,
    Hover,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CarouselEvent {
    StateChanged {
        cause: ChangeCause,
        state: CarouselState,
    },
    Detached,
}
