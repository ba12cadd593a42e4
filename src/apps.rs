//! Static application descriptors.
//!
//! The descriptor table is fixed at startup and never mutated; everything
//! else refers to applications by [`AppId`].

use crate::error::DesktopError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppId {
    About,
    Projects,
    Skills,
    Contact,
    Resume,
    Experience,
    Terminal,
}

/// Static, process-wide metadata for a launchable application.
#[derive(Debug, Clone, Copy)]
pub struct AppDescriptor {
    pub id: AppId,
    /// Stable string key used by launchers and the content-panel contract.
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    /// Desktop icon anchor, in cells from the top-left of the desktop.
    pub icon_col: u16,
    pub icon_row: u16,
}

pub const APPS: &[AppDescriptor] = &[
    AppDescriptor {
        id: AppId::About,
        key: "about",
        name: "About Me",
        icon: "◆",
        icon_col: 4,
        icon_row: 2,
    },
    AppDescriptor {
        id: AppId::Projects,
        key: "projects",
        name: "Projects",
        icon: "▤",
        icon_col: 4,
        icon_row: 6,
    },
    AppDescriptor {
        id: AppId::Skills,
        key: "skills",
        name: "Skills",
        icon: "↯",
        icon_col: 4,
        icon_row: 10,
    },
    AppDescriptor {
        id: AppId::Contact,
        key: "contact",
        name: "Contact",
        icon: "✉",
        icon_col: 4,
        icon_row: 14,
    },
    AppDescriptor {
        id: AppId::Resume,
        key: "resume",
        name: "Resume",
        icon: "▣",
        icon_col: 14,
        icon_row: 2,
    },
    AppDescriptor {
        id: AppId::Experience,
        key: "experience",
        name: "Experience",
        icon: "◎",
        icon_col: 14,
        icon_row: 6,
    },
    AppDescriptor {
        id: AppId::Terminal,
        key: "terminal",
        name: "Terminal",
        icon: "❯",
        icon_col: 14,
        icon_row: 10,
    },
];

impl AppId {
    pub fn descriptor(self) -> &'static AppDescriptor {
        APPS.iter()
            .find(|descriptor| descriptor.id == self)
            .expect("descriptor table covers every AppId")
    }

    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    /// Resolve a launch key against the descriptor table. Unknown keys are a
    /// caller contract violation.
    pub fn parse(key: &str) -> Result<Self, DesktopError> {
        APPS.iter()
            .find(|descriptor| descriptor.key == key)
            .map(|descriptor| descriptor.id)
            .ok_or_else(|| DesktopError::InvalidApplication(key.to_string()))
    }
}
