//! Static command catalog.
//!
//! Built once at compile time and never mutated — the single source of
//! truth for every supported backing-store operation. Templates call the
//! store's procedures with driver placeholders; nothing in this workspace
//! interpolates a parameter into SQL text.

use db::ParamKind;

/// One registered command: an immutable procedure-call template plus its
/// declared positional parameter list.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Stable logical name used by callers.
    pub name: &'static str,
    /// `CALL` template with `?` placeholders.
    pub template: &'static str,
    /// Declared parameter kinds, in binding order.
    pub params: &'static [ParamKind],
    /// Whether the command produces result rows.
    pub expects_rows: bool,
}

static CATALOG: &[CommandSpec] = &[
    CommandSpec {
        name: "WATCH_INSERT",
        template: "CALL PROC_WATCH_INSERT(?)",
        params: &[ParamKind::Text],
        expects_rows: false,
    },
    CommandSpec {
        name: "APPIDLIST_SELECT",
        template: "CALL PROC_APPIDLIST_DID_SELECT(?)",
        params: &[ParamKind::DeviceId],
        expects_rows: true,
    },
    CommandSpec {
        name: "WATCHIDLIST_SELECT",
        template: "CALL PROC_WATCHIDLIST_APPID_SELECT(?)",
        params: &[ParamKind::DeviceId],
        expects_rows: true,
    },
    CommandSpec {
        name: "DEV_APP_RELATION_INSERT",
        // The procedure name carries the store's historical spelling.
        template: "CALL PROC_DEV_APP_RELATION_REAULT(?, ?)",
        params: &[ParamKind::DeviceId, ParamKind::Text],
        expects_rows: true,
    },
    CommandSpec {
        name: "DEV_APP_RELATION_DELETE",
        template: "CALL PROC_DEV_APP_RELATION_DELETE(?, ?)",
        params: &[ParamKind::DeviceId, ParamKind::DeviceId],
        expects_rows: false,
    },
    CommandSpec {
        name: "LOCATION_INSERT",
        template: "CALL PROC_LOCATION_DID_INSERT(?, ?, ?, ?)",
        params: &[
            ParamKind::DeviceId,
            ParamKind::Text,
            ParamKind::Text,
            ParamKind::Text,
        ],
        expects_rows: false,
    },
    CommandSpec {
        name: "STEP_INSERT",
        template: "CALL PROC_STEP_DID_INSERT(?, ?)",
        params: &[ParamKind::DeviceId, ParamKind::Int],
        expects_rows: false,
    },
    CommandSpec {
        name: "HEARTRATE_INSERT",
        template: "CALL PROC_HEARTRATE_DID_INSERT(?, ?)",
        params: &[ParamKind::DeviceId, ParamKind::Int],
        expects_rows: false,
    },
];

/// Look up a command by exact name.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}

/// Every registered command, in registration order.
pub fn all() -> &'static [CommandSpec] {
    CATALOG
}
