//! Reusable widgets shared by the dashboard screens.

pub mod card;
pub mod countdown;
pub mod stat_card;
pub mod toast;
