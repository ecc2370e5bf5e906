//! One crontab schedule line: five time fields and a command.

use crate::error::{CronError, CronResult};
use crate::field::{CronField, FieldKind};
use crate::special::{self, Special};
use std::fmt;

/// One schedule line of a crontab document.
///
/// The five time fields are plain public fields so callers mutate them
/// directly, e.g. `entry.minute.on(30)`. Rendering always emits single
/// spaces, whatever the original input spacing looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CronEntry {
    /// Minute field (0-59)
    pub minute: CronField,

    /// Hour field (0-23)
    pub hour: CronField,

    /// Day-of-month field (1-31)
    pub dom: CronField,

    /// Month field (1-12)
    pub month: CronField,

    /// Day-of-week field (0-7)
    pub dow: CronField,

    /// Command text, kept verbatim including internal whitespace
    pub command: String,

    reboot: bool,
}

impl CronEntry {
    /// Create an entry with all five fields in their default `*` state.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            minute: CronField::new(FieldKind::Minute),
            hour: CronField::new(FieldKind::Hour),
            dom: CronField::new(FieldKind::DayOfMonth),
            month: CronField::new(FieldKind::Month),
            dow: CronField::new(FieldKind::DayOfWeek),
            command: command.into(),
            reboot: false,
        }
    }

    /// Parse one schedule line.
    ///
    /// A leading `@keyword` expands through the special-schedule table;
    /// otherwise the first five whitespace-separated tokens are the time
    /// fields and everything after them is the command.
    pub fn parse(line: &str) -> CronResult<Self> {
        let line = line.trim();

        if line.starts_with('@') {
            let (keyword, command) = split_token(line).unwrap_or((line, ""));
            return match special::lookup(keyword) {
                Some(Special::Reboot) => {
                    let mut entry = Self::new(command);
                    entry.reboot = true;
                    Ok(entry)
                }
                Some(Special::Fields(expansion)) => {
                    let mut entry = Self::new(command);
                    let (tokens, _) = split_schedule(expansion)?;
                    entry.parse_fields(tokens)?;
                    Ok(entry)
                }
                None => Err(CronError::UnknownSpecial(keyword.to_string())),
            };
        }

        let (tokens, command) = split_schedule(line)?;
        let mut entry = Self::new(command);
        entry.parse_fields(tokens)?;
        Ok(entry)
    }

    fn parse_fields(&mut self, tokens: [&str; 5]) -> CronResult<()> {
        self.minute.parse(tokens[0])?;
        self.hour.parse(tokens[1])?;
        self.dom.parse(tokens[2])?;
        self.month.parse(tokens[3])?;
        self.dow.parse(tokens[4])?;
        Ok(())
    }

    /// Whether this is an `@reboot` entry, which carries no time fields.
    pub fn is_reboot(&self) -> bool {
        self.reboot
    }

    /// Reset all five time fields to their default `*` state.
    pub fn clear(&mut self) {
        self.minute.clear();
        self.hour.clear();
        self.dom.clear();
        self.month.clear();
        self.dow.clear();
    }

    /// Replace the command text.
    pub fn set_command(&mut self, command: impl Into<String>) {
        self.command = command.into();
    }

    /// Render the entry as one canonical line.
    pub fn render(&self) -> String {
        let schedule = if self.reboot {
            "@reboot".to_string()
        } else {
            format!(
                "{} {} {} {} {}",
                self.minute, self.hour, self.dom, self.month, self.dow
            )
        };
        if self.command.is_empty() {
            schedule
        } else {
            format!("{schedule} {}", self.command)
        }
    }
}

impl fmt::Display for CronEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Split off the first whitespace-separated token; the remainder keeps its
/// internal whitespace but loses the separator run.
fn split_token(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(index) => Some((&text[..index], text[index..].trim_start())),
        None => Some((text, "")),
    }
}

/// Split a line into its five time tokens and the trailing command.
fn split_schedule(line: &str) -> CronResult<([&str; 5], &str)> {
    let mut rest = line;
    let mut tokens = [""; 5];
    for slot in &mut tokens {
        let (token, tail) =
            split_token(rest).ok_or_else(|| CronError::TooFewFields(line.to_string()))?;
        *slot = token;
        rest = tail;
    }
    Ok((tokens, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_renders_wildcards() {
        let entry = CronEntry::new("blank");
        assert_eq!(entry.render(), "* * * * * blank");
    }

    #[test]
    fn test_fields_mutate_independently() {
        let mut entry = CronEntry::new("fields");
        entry.hour.on(4).unwrap();
        assert_eq!(entry.render(), "* 4 * * * fields");
        entry.dom.on(5).unwrap();
        assert_eq!(entry.render(), "* 4 5 * * fields");
        entry.month.on(6).unwrap();
        assert_eq!(entry.render(), "* 4 5 6 * fields");
        entry.dow.on(7).unwrap();
        assert_eq!(entry.render(), "* 4 5 6 7 fields");
    }

    #[test]
    fn test_clear_resets_all_fields() {
        let mut entry = CronEntry::new("clear");
        entry.minute.on(3).unwrap();
        entry.hour.on(4).unwrap();
        entry.dom.on(5).unwrap();
        entry.month.on(6).unwrap();
        entry.dow.on(7).unwrap();
        assert_eq!(entry.render(), "3 4 5 6 7 clear");
        entry.clear();
        assert_eq!(entry.render(), "* * * * * clear");
    }

    #[test]
    fn test_parse_normalizes_spacing() {
        let entry = CronEntry::parse(" 00 5  *   *   *      spaced").unwrap();
        assert_eq!(entry.command, "spaced");
        assert_eq!(entry.render(), "0 5 * * * spaced");
    }

    #[test]
    fn test_parse_keeps_command_whitespace() {
        let entry = CronEntry::parse("* * * * * echo  'two  spaces'").unwrap();
        assert_eq!(entry.command, "echo  'two  spaces'");
        assert_eq!(entry.render(), "* * * * * echo  'two  spaces'");
    }

    #[test]
    fn test_parse_too_few_fields() {
        let err = CronEntry::parse("* * * command").unwrap_err();
        assert!(matches!(err, CronError::TooFewFields(_)));
    }

    #[test]
    fn test_parse_reboot_round_trip() {
        let entry = CronEntry::parse("@reboot rebooted").unwrap();
        assert!(entry.is_reboot());
        assert_eq!(entry.command, "rebooted");
        assert_eq!(entry.render(), "@reboot rebooted");
    }

    #[test]
    fn test_parse_special_expands_to_fields() {
        let entry = CronEntry::parse("@daily backup").unwrap();
        assert!(!entry.is_reboot());
        assert_eq!(entry.render(), "0 0 * * * backup");

        let entry = CronEntry::parse("@yearly fireworks").unwrap();
        assert_eq!(entry.render(), "0 0 1 1 * fireworks");
    }

    #[test]
    fn test_parse_unknown_special() {
        let err = CronEntry::parse("@fortnightly cmd").unwrap_err();
        assert!(matches!(err, CronError::UnknownSpecial(_)));
    }

    #[test]
    fn test_set_command() {
        let mut entry = CronEntry::new("before");
        entry.set_command("after");
        assert_eq!(entry.render(), "* * * * * after");
    }
}
