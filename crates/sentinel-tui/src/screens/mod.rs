//! Screen implementations. Each screen is a top-level Component.

pub mod dashboard;
pub mod settings;

use crate::component::Component;
use crate::screen::ScreenId;

pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new()),
        ),
        (ScreenId::Settings, Box::new(settings::SettingsScreen::new())),
    ]
}
