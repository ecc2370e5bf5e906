//! Crontab parsing and manipulation.
//!
//! Models a crontab document with support for:
//! - 🕐 The five standard time fields plus `@`-keyword shortcuts
//! - ✏️ Chainable field mutation (`on`, `during`, `every`, `clear`)
//! - 📝 Verbatim preservation of comments and blank lines
//! - 🔁 Canonical, round-trip-stable rendering
//!
//! ## Quick Start
//!
//! ```
//! use crontab::CronTab;
//!
//! let mut tab = CronTab::parse("# backups\n0 5 * * * /usr/bin/backup\n").unwrap();
//!
//! for entry in &tab {
//!     assert_eq!(entry.command, "/usr/bin/backup");
//! }
//!
//! // Append a new entry and schedule it
//! let entry = tab.new_entry("/usr/bin/report");
//! entry.minute.on(30).unwrap();
//! entry.hour.during(9, 17).unwrap();
//! assert_eq!(entry.render(), "30 9-17 * * * /usr/bin/report");
//!
//! assert_eq!(
//!     tab.render(),
//!     "# backups\n0 5 * * * /usr/bin/backup\n30 9-17 * * * /usr/bin/report\n",
//! );
//! ```
//!
//! ## Step composition
//!
//! A step applies to the specific range it was chained onto, not to the
//! whole field:
//!
//! ```
//! use crontab::CronEntry;
//!
//! let mut entry = CronEntry::new("sync");
//! entry.hour.during(2, 10).unwrap().every(4).unwrap();
//! assert_eq!(entry.render(), "* 2-10/4 * * * sync");
//! ```

pub mod entry;
pub mod error;
pub mod field;
pub mod io;
pub mod special;
pub mod tab;

pub use entry::CronEntry;
pub use error::{CronError, CronResult};
pub use field::{CronField, FieldKind, Part, PartHandle};
pub use special::Special;
pub use tab::{CronTab, Entries, EntriesMut, Line};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::entry::CronEntry;
    pub use crate::error::{CronError, CronResult};
    pub use crate::field::{CronField, FieldKind, Part};
    pub use crate::tab::{CronTab, Line};
}
