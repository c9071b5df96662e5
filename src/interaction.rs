use anyhow::{Context, Result};

use crate::state::ManagerRecord;
use crate::store::Store;

// Terminals cannot report touch input, so this comes from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    #[default]
    Pointer,
    Touch,
}

impl DeviceClass {
    pub fn from_touch_flag(touch_primary: bool) -> Self {
        if touch_primary {
            DeviceClass::Touch
        } else {
            DeviceClass::Pointer
        }
    }

    pub fn is_touch(self) -> bool {
        self == DeviceClass::Touch
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    OpenUrl(String),
    ToggleHighlight(u32),
    Nothing,
}

pub fn team_profile_url(base_url: &str, team_id: u32, gameweek: u32) -> String {
    format!(
        "{}/entry/{team_id}/event/{gameweek}",
        base_url.trim_end_matches('/')
    )
}

pub fn click_action(
    record: &ManagerRecord,
    gameweek: u32,
    device: DeviceClass,
    profile_base_url: &str,
) -> ClickAction {
    let Some(team_id) = record.first_team_id() else {
        return ClickAction::Nothing;
    };
    match device {
        DeviceClass::Pointer => {
            ClickAction::OpenUrl(team_profile_url(profile_base_url, team_id, gameweek))
        }
        DeviceClass::Touch => ClickAction::ToggleHighlight(team_id),
    }
}

pub fn perform_click(store: &mut Store, action: ClickAction) -> Option<String> {
    perform_click_with(store, action, open_in_browser)
}

pub fn perform_click_with(
    store: &mut Store,
    action: ClickAction,
    open: impl FnOnce(&str) -> Result<()>,
) -> Option<String> {
    match action {
        ClickAction::OpenUrl(url) => Some(match open(&url) {
            Ok(()) => format!("[INFO] Opened {url}"),
            Err(err) => format!("[WARN] Could not open browser ({err:#}); link: {url}"),
        }),
        ClickAction::ToggleHighlight(team_id) => {
            let on = store.toggle_highlighted_manager(team_id);
            Some(format!(
                "[INFO] Team {team_id} {}",
                if on { "highlighted" } else { "unhighlighted" }
            ))
        }
        ClickAction::Nothing => None,
    }
}

pub fn open_in_browser(url: &str) -> Result<()> {
    webbrowser::open(url).with_context(|| format!("failed to open {url}"))?;
    Ok(())
}
