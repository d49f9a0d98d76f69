use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use url::Url;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ItemId);
id_newtype!(RegionId);

/// Placeholder link used by item lists that have no live demo yet.
pub const DEMO_LINK_PLACEHOLDER: &str = "#";

/// A display record handed to the carousel. The carousel only indexes these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tools: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<String>,
    #[serde(default)]
    pub image: String,
}

impl Item {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            description: String::new(),
            tools: String::new(),
            demo_link: None,
            image: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tools(mut self, tools: impl Into<String>) -> Self {
        self.tools = tools.into();
        self
    }

    pub fn with_demo_link(mut self, demo_link: impl Into<String>) -> Self {
        self.demo_link = Some(demo_link.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Parsed demo URL. Empty, placeholder and unparseable links count as absent.
    pub fn demo_url(&self) -> Option<Url> {
        let raw = self.demo_link.as_deref()?.trim();
        if raw.is_empty() || raw == DEMO_LINK_PLACEHOLDER {
            return None;
        }
        Url::parse(raw).ok()
    }

    pub fn has_demo(&self) -> bool {
        self.demo_url().is_some()
    }

    pub fn tool_list(&self) -> impl Iterator<Item = &str> {
        self.tools
            .split(',')
            .map(str::trim)
            .filter(|tool| !tool.is_empty())
    }
}

/// Orientation of the most recent transition. Serialized as `-1`, `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    Backward,
    #[default]
    None,
    Forward,
}

impl Direction {
    pub fn sign(self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::None => 0,
            Direction::Forward => 1,
        }
    }

    pub fn from_sign(value: i64) -> Self {
        Self::from_ordering(value.cmp(&0))
    }

    pub fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Direction::Backward,
            Ordering::Equal => Direction::None,
            Ordering::Greater => Direction::Forward,
        }
    }
}

impl From<Direction> for i8 {
    fn from(value: Direction) -> Self {
        value.sign()
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Backward),
            0 => Ok(Direction::None),
            1 => Ok(Direction::Forward),
            other => Err(format!("direction sign must be -1, 0 or 1, got {other}")),
        }
    }
}

/// Read-only view of a carousel handed to renderers after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselState {
    /// `None` exactly when the carousel holds no items.
    pub current_index: Option<usize>,
    pub direction: Direction,
    pub is_auto_playing: bool,
    pub is_visible: bool,
    pub item_count: usize,
    pub timer_armed: bool,
}

impl CarouselState {
    /// Indicator buttons and arrows only make sense with something to move to.
    pub fn can_navigate(&self) -> bool {
        self.item_count > 1
    }

    pub fn is_current(&self, index: usize) -> bool {
        self.current_index == Some(index)
    }
}
