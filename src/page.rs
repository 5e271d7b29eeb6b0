// In-process page model: the elements the dashboard reads and writes, keyed by element id.

use crate::error::UiError;
use crate::models::{BandwidthSample, UptimeResult};
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Element ids and classes the dashboard depends on.
pub mod ids {
    pub const DL_SPEED: &str = "dl-speed";
    pub const UL_SPEED: &str = "ul-speed";
    pub const PING_TARGET: &str = "ping-target";
    pub const PING_RESULT: &str = "ping-result";
    pub const UPTIME_URL: &str = "uptime-url";
    pub const UPTIME_RESULT: &str = "uptime-result";
    pub const PING_LOG_LIST: &str = "ping-log-list";
    pub const UPTIME_LOG_LIST: &str = "uptime-log-list";
    /// Tab panel holding `ping-log-list`.
    pub const PING_PANEL: &str = "ping";
    /// Tab panel holding `uptime-log-list`.
    pub const UPTIME_PANEL: &str = "uptime";
    /// Class of every tab panel.
    pub const LOG_CONTENT: &str = "log-content";
    /// Class of every tab button.
    pub const TAB_BTN: &str = "tab-btn";
}

/// Tab panels the page has a log list for.
pub const LOG_PANELS: [&str; 2] = [ids::PING_PANEL, ids::UPTIME_PANEL];

/// Page shared between the poller and user actions. Last write wins per element.
pub type SharedPage = Arc<RwLock<Page>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Red,
}

/// Rendered content of `uptime-result`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub url: String,
    pub status: String,
    pub color: StatusColor,
}

impl StatusLine {
    pub fn from_result(result: &UptimeResult) -> Self {
        let color = if result.status.is_online() {
            StatusColor::Green
        } else {
            StatusColor::Red
        };
        Self {
            url: result.url.clone(),
            status: result.status.to_string(),
            color,
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.url, self.status)
    }
}

/// Element with class `log-content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPanel {
    pub id: String,
    pub visible: bool,
}

/// Element with class `tab-btn`; `target` is the panel it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabButton {
    pub id: String,
    pub target: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct Page {
    dl_speed: String,
    ul_speed: String,
    ping_target: String,
    uptime_url: String,
    ping_result: Option<String>,
    uptime_result: Option<StatusLine>,
    ping_log_list: Vec<String>,
    uptime_log_list: Vec<String>,
    panels: Vec<TabPanel>,
    buttons: Vec<TabButton>,
}

/// Id of the button that opens `tab`.
pub fn button_id(tab: &str) -> String {
    format!("{}-{}", ids::TAB_BTN, tab)
}

impl Page {
    /// Empty page with one hidden panel and one inactive button per tab id.
    pub fn new<S: AsRef<str>>(tabs: &[S]) -> Self {
        let panels = tabs
            .iter()
            .map(|t| TabPanel {
                id: t.as_ref().to_string(),
                visible: false,
            })
            .collect();
        let buttons = tabs
            .iter()
            .map(|t| TabButton {
                id: button_id(t.as_ref()),
                target: t.as_ref().to_string(),
                active: false,
            })
            .collect();
        Self {
            dl_speed: String::new(),
            ul_speed: String::new(),
            ping_target: String::new(),
            uptime_url: String::new(),
            ping_result: None,
            uptime_result: None,
            ping_log_list: Vec::new(),
            uptime_log_list: Vec::new(),
            panels,
            buttons,
        }
    }

    pub fn into_shared(self) -> SharedPage {
        Arc::new(RwLock::new(self))
    }

    pub fn set_bandwidth(&mut self, sample: &BandwidthSample) {
        self.dl_speed = sample.download_text();
        self.ul_speed = sample.upload_text();
    }

    pub fn dl_speed(&self) -> &str {
        &self.dl_speed
    }

    pub fn ul_speed(&self) -> &str {
        &self.ul_speed
    }

    /// Write the value of an input element (`ping-target` or `uptime-url`).
    pub fn set_input(&mut self, id: &str, value: impl Into<String>) -> Result<(), UiError> {
        let slot = match id {
            ids::PING_TARGET => &mut self.ping_target,
            ids::UPTIME_URL => &mut self.uptime_url,
            other => return Err(UiError::UnknownInput(other.to_string())),
        };
        *slot = value.into();
        Ok(())
    }

    pub fn input(&self, id: &str) -> Result<&str, UiError> {
        match id {
            ids::PING_TARGET => Ok(&self.ping_target),
            ids::UPTIME_URL => Ok(&self.uptime_url),
            other => Err(UiError::UnknownInput(other.to_string())),
        }
    }

    pub fn set_ping_result(&mut self, line: String) {
        self.ping_result = Some(line);
    }

    pub fn ping_result(&self) -> Option<&str> {
        self.ping_result.as_deref()
    }

    pub fn set_uptime_result(&mut self, result: &UptimeResult) {
        self.uptime_result = Some(StatusLine::from_result(result));
    }

    pub fn uptime_result(&self) -> Option<&StatusLine> {
        self.uptime_result.as_ref()
    }

    /// Replace the whole ping log list.
    pub fn replace_ping_logs(&mut self, items: Vec<String>) {
        self.ping_log_list = items;
    }

    /// Replace the whole uptime log list.
    pub fn replace_uptime_logs(&mut self, items: Vec<String>) {
        self.uptime_log_list = items;
    }

    pub fn ping_logs(&self) -> &[String] {
        &self.ping_log_list
    }

    pub fn uptime_logs(&self) -> &[String] {
        &self.uptime_log_list
    }

    /// Log list shown inside the panel `id`, if the page has one for it.
    pub fn panel_items(&self, id: &str) -> Option<&[String]> {
        match id {
            ids::PING_PANEL => Some(&self.ping_log_list),
            ids::UPTIME_PANEL => Some(&self.uptime_log_list),
            _ => None,
        }
    }

    pub fn panels(&self) -> &[TabPanel] {
        &self.panels
    }

    pub fn buttons(&self) -> &[TabButton] {
        &self.buttons
    }

    /// Id of the first visible panel, if any.
    pub fn active_tab(&self) -> Option<&str> {
        self.panels
            .iter()
            .find(|p| p.visible)
            .map(|p| p.id.as_str())
    }

    /// Hide every panel, deactivate every button, then show `tab` and mark `button` active.
    /// Both ids are checked first; on error the page is left untouched.
    pub fn open_tab(&mut self, tab: &str, button: &str) -> Result<(), UiError> {
        let panel_idx = self
            .panels
            .iter()
            .position(|p| p.id == tab)
            .ok_or_else(|| UiError::UnknownTab(tab.to_string()))?;
        let button_idx = self
            .buttons
            .iter()
            .position(|b| b.id == button)
            .ok_or_else(|| UiError::UnknownButton(button.to_string()))?;

        for panel in &mut self.panels {
            panel.visible = false;
        }
        for b in &mut self.buttons {
            b.active = false;
        }
        self.panels[panel_idx].visible = true;
        self.buttons[button_idx].active = true;
        Ok(())
    }

    /// Text content of a single-valued element by id.
    pub fn text(&self, id: &str) -> Option<String> {
        match id {
            ids::DL_SPEED => Some(self.dl_speed.clone()),
            ids::UL_SPEED => Some(self.ul_speed.clone()),
            ids::PING_TARGET => Some(self.ping_target.clone()),
            ids::UPTIME_URL => Some(self.uptime_url.clone()),
            ids::PING_RESULT => Some(self.ping_result.clone().unwrap_or_default()),
            ids::UPTIME_RESULT => Some(
                self.uptime_result
                    .as_ref()
                    .map(|l| l.to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Bandwidth: download {} Mbps | upload {} Mbps",
            or_dash(&self.dl_speed),
            or_dash(&self.ul_speed)
        )?;
        if let Some(line) = &self.ping_result {
            writeln!(f, "Ping: {}", line)?;
        }
        if let Some(line) = &self.uptime_result {
            let color = match line.color {
                StatusColor::Green => "green",
                StatusColor::Red => "red",
            };
            writeln!(f, "Uptime: {} [{}]", line, color)?;
        }
        let tabs: Vec<String> = self
            .buttons
            .iter()
            .map(|b| {
                if b.active {
                    format!("[{}]", b.target)
                } else {
                    b.target.clone()
                }
            })
            .collect();
        writeln!(f, "Tabs: {}", tabs.join(" "))?;
        for panel in self.panels.iter().filter(|p| p.visible) {
            let items = self.panel_items(&panel.id).unwrap_or_default();
            if items.is_empty() {
                writeln!(f, "  (no entries)")?;
            }
            for item in items {
                writeln!(f, "  {}", item)?;
            }
        }
        Ok(())
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}
