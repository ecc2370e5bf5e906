//! The `@`-keyword special-schedule table.

/// Expansion of a special-schedule keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    /// `@reboot`: not a time specification; the five time fields are bypassed
    Reboot,

    /// Fixed five-field expansion (`minute hour dom month dow`)
    Fields(&'static str),
}

/// Look up a special-schedule keyword, with or without its leading `@`.
pub fn lookup(keyword: &str) -> Option<Special> {
    let keyword = keyword.strip_prefix('@').unwrap_or(keyword);
    match keyword {
        "reboot" => Some(Special::Reboot),
        "hourly" => Some(Special::Fields("0 * * * *")),
        "daily" | "midnight" => Some(Special::Fields("0 0 * * *")),
        "weekly" => Some(Special::Fields("0 0 * * 0")),
        "monthly" => Some(Special::Fields("0 0 1 * *")),
        "yearly" | "annually" => Some(Special::Fields("0 0 1 1 *")),
        _ => None,
    }
}
