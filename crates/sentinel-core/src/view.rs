// ── View, layout and viewport classification ──
//
// Width thresholds are inclusive upper bounds, checked in order.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Which collection the dashboard shows.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Servers,
    Players,
}

impl ViewMode {
    /// Endpoint name appended to `{base}/sdo/`.
    pub fn endpoint(self) -> &'static str {
        self.into()
    }

    /// Human-readable title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Servers => "Servers",
            Self::Players => "Players",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Servers => Self::Players,
            Self::Players => Self::Servers,
        }
    }

    /// Stable index for per-mode bookkeeping.
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Servers => 0,
            Self::Players => 1,
        }
    }
}

/// How cards are arranged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Grid,
    List,
}

impl LayoutMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}

/// Coarse width class of the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ViewportClass {
    Mobile,
    Tablet,
    Desktop,
}

impl ViewportClass {
    /// Layout suggested for this class. Only mobile prefers the list.
    pub fn default_layout(self) -> LayoutMode {
        match self {
            Self::Mobile => LayoutMode::List,
            Self::Tablet | Self::Desktop => LayoutMode::Grid,
        }
    }
}

struct Breakpoint {
    class: ViewportClass,
    max_width: Option<u32>,
}

const BREAKPOINTS: [Breakpoint; 3] = [
    Breakpoint {
        class: ViewportClass::Mobile,
        max_width: Some(768),
    },
    Breakpoint {
        class: ViewportClass::Tablet,
        max_width: Some(1024),
    },
    Breakpoint {
        class: ViewportClass::Desktop,
        max_width: None,
    },
];

/// Classify a width in device-independent pixels.
pub fn detect_viewport_class(width: u32) -> ViewportClass {
    BREAKPOINTS
        .iter()
        .find(|bp| bp.max_width.is_none_or(|max| width <= max))
        .map_or(ViewportClass::Desktop, |bp| bp.class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(detect_viewport_class(0), ViewportClass::Mobile);
        assert_eq!(detect_viewport_class(768), ViewportClass::Mobile);
        assert_eq!(detect_viewport_class(769), ViewportClass::Tablet);
        assert_eq!(detect_viewport_class(1024), ViewportClass::Tablet);
        assert_eq!(detect_viewport_class(1025), ViewportClass::Desktop);
    }

    #[test]
    fn only_mobile_prefers_list() {
        assert_eq!(ViewportClass::Mobile.default_layout(), LayoutMode::List);
        assert_eq!(ViewportClass::Tablet.default_layout(), LayoutMode::Grid);
        assert_eq!(ViewportClass::Desktop.default_layout(), LayoutMode::Grid);
    }

    #[test]
    fn view_mode_endpoints() {
        assert_eq!(ViewMode::Servers.endpoint(), "servers");
        assert_eq!(ViewMode::Players.endpoint(), "players");
        assert_eq!(ViewMode::Servers.toggled(), ViewMode::Players);
        assert_eq!("players".parse::<ViewMode>().ok(), Some(ViewMode::Players));
    }
}
