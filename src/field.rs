//! Schedule field engine: value domains, parts, and canonical rendering.
//!
//! Each of the five time positions on an entry is a [`CronField`]: an ordered
//! list of [`Part`]s whose union is the set of scheduled values. Parts render
//! in insertion order and are never merged or sorted, so the text a caller
//! builds up is the text that comes back out.

use crate::error::{CronError, CronResult};
use log::trace;
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const WEEKDAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// One of the five time positions in a crontab entry.
///
/// Carries the static value domain for that position: the inclusive numeric
/// range and, for months and weekdays, the name-alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    /// Minute (0-59)
    Minute,
    /// Hour (0-23)
    Hour,
    /// Day of month (1-31)
    DayOfMonth,
    /// Month (1-12, JAN-DEC)
    Month,
    /// Day of week (0-7, SUN-SAT; both 0 and 7 are Sunday)
    DayOfWeek,
}

impl FieldKind {
    /// Smallest value in the field's domain.
    pub fn min(self) -> u32 {
        match self {
            FieldKind::Minute | FieldKind::Hour | FieldKind::DayOfWeek => 0,
            FieldKind::DayOfMonth | FieldKind::Month => 1,
        }
    }

    /// Largest value in the field's domain.
    pub fn max(self) -> u32 {
        match self {
            FieldKind::Minute => 59,
            FieldKind::Hour => 23,
            FieldKind::DayOfMonth => 31,
            FieldKind::Month => 12,
            FieldKind::DayOfWeek => 7,
        }
    }

    /// Human-readable field label, used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Minute => "minute",
            FieldKind::Hour => "hour",
            FieldKind::DayOfMonth => "day of month",
            FieldKind::Month => "month",
            FieldKind::DayOfWeek => "day of week",
        }
    }

    /// Whether `value` lies inside the field's domain.
    pub fn contains(self, value: u32) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Name aliases for the field, in domain order. Empty for numeric fields.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            FieldKind::Month => &MONTH_NAMES,
            FieldKind::DayOfWeek => &WEEKDAY_NAMES,
            _ => &[],
        }
    }

    /// Resolve a case-insensitive name alias to its numeric value.
    pub fn value_from_name(self, name: &str) -> CronResult<u32> {
        let lowered = name.to_ascii_lowercase();
        match self.names().iter().position(|&alias| alias == lowered) {
            Some(index) => Ok(self.min() + index as u32),
            None => Err(CronError::UnknownName {
                field: self.label(),
                name: name.to_string(),
            }),
        }
    }
}

/// One syntactic unit inside a schedule field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Part {
    /// Every value in the domain (`*`)
    Wildcard,

    /// Every `step`th value across the whole domain (`*/step`)
    WildcardStep(u32),

    /// Exactly one value
    Single(u32),

    /// Inclusive contiguous run (`start-end`)
    Range(u32, u32),

    /// Every `step`th value inside an inclusive run (`start-end/step`)
    RangeStep(u32, u32, u32),
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Wildcard => f.write_str("*"),
            Part::WildcardStep(step) => write!(f, "*/{step}"),
            Part::Single(value) => write!(f, "{value}"),
            Part::Range(start, end) => write!(f, "{start}-{end}"),
            Part::RangeStep(start, end, step) => write!(f, "{start}-{end}/{step}"),
        }
    }
}

/// One schedule field on an entry: an ordered, non-empty list of parts.
///
/// A fresh field holds a single [`Part::Wildcard`]; mutators append parts in
/// call order and validate eagerly, leaving the field untouched on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CronField {
    kind: FieldKind,
    parts: Vec<Part>,
}

impl CronField {
    /// Create a field in its default all-values state.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            parts: vec![Part::Wildcard],
        }
    }

    /// The field's position and value domain.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The field's parts, in insertion order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Whether the field is in its default all-values state.
    pub fn is_wildcard(&self) -> bool {
        self.parts == [Part::Wildcard]
    }

    /// Append a single scheduled value.
    ///
    /// The first mutation on a field still in its default all-values state
    /// replaces the lone wildcard; after that, values accumulate in call
    /// order. Returns the field so further values can be chained; callers
    /// needing a clean field call [`clear`](Self::clear) first.
    pub fn on(&mut self, value: u32) -> CronResult<&mut Self> {
        let value = self.check(value)?;
        self.take_default();
        self.parts.push(Part::Single(value));
        Ok(self)
    }

    /// Append an inclusive range of scheduled values.
    ///
    /// Returns a handle to the appended part; calling
    /// [`every`](PartHandle::every) on the handle attaches a step to this
    /// range and nothing else.
    pub fn during(&mut self, start: u32, end: u32) -> CronResult<PartHandle<'_>> {
        let start = self.check(start)?;
        let end = self.check(end)?;
        if start > end {
            return Err(CronError::InvalidRange(start, end));
        }
        self.take_default();
        self.parts.push(Part::Range(start, end));
        let index = self.parts.len() - 1;
        Ok(PartHandle { field: self, index })
    }

    /// Append a stepped wildcard covering the whole domain (`*/step`).
    ///
    /// `step` must be positive; values beyond the domain span are accepted
    /// and render literally.
    pub fn every(&mut self, step: u32) -> CronResult<PartHandle<'_>> {
        if step == 0 {
            return Err(CronError::InvalidStep(step));
        }
        self.take_default();
        self.parts.push(Part::WildcardStep(step));
        let index = self.parts.len() - 1;
        Ok(PartHandle { field: self, index })
    }

    // A lone plain wildcard is the field's default state; the first real
    // mutation takes its place instead of accumulating next to it.
    fn take_default(&mut self) {
        if self.parts == [Part::Wildcard] {
            self.parts.clear();
        }
    }

    /// Reset the field to its default all-values state. Idempotent.
    pub fn clear(&mut self) {
        self.parts.clear();
        self.parts.push(Part::Wildcard);
    }

    /// Render the field in canonical form.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Parse a field expression, replacing the part list wholesale.
    ///
    /// Segments are comma-separated; each is one of `*`, `*/N`, `V`, `A-B` or
    /// `A-B/N`, with name aliases resolved through the field's domain. The
    /// field is left unchanged if any segment fails.
    pub fn parse(&mut self, text: &str) -> CronResult<()> {
        let mut parts = Vec::new();
        for segment in text.split(',') {
            parts.push(self.parse_segment(segment.trim())?);
        }
        trace!(
            "parsed {} field '{}' into {} part(s)",
            self.kind.label(),
            text,
            parts.len()
        );
        self.parts = parts;
        Ok(())
    }

    fn parse_segment(&self, segment: &str) -> CronResult<Part> {
        let (base, step) = match segment.split_once('/') {
            Some((base, step_text)) => {
                let step = step_text
                    .parse::<u32>()
                    .map_err(|_| CronError::InvalidSegment(segment.to_string()))?;
                if step == 0 {
                    return Err(CronError::InvalidStep(step));
                }
                (base, Some(step))
            }
            None => (segment, None),
        };

        if base == "*" {
            return Ok(match step {
                Some(step) => Part::WildcardStep(step),
                None => Part::Wildcard,
            });
        }

        if let Some((start, end)) = base.split_once('-') {
            let start = self.parse_value(start)?;
            let end = self.parse_value(end)?;
            if start > end {
                return Err(CronError::InvalidRange(start, end));
            }
            return Ok(match step {
                Some(step) => Part::RangeStep(start, end, step),
                None => Part::Range(start, end),
            });
        }

        match step {
            // a step only attaches to a wildcard or range base
            Some(_) => Err(CronError::InvalidSegment(segment.to_string())),
            None => Ok(Part::Single(self.parse_value(base)?)),
        }
    }

    fn parse_value(&self, token: &str) -> CronResult<u32> {
        if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            let value = token
                .parse::<u32>()
                .map_err(|_| CronError::InvalidSegment(token.to_string()))?;
            return self.check(value);
        }
        if self.kind.names().is_empty() {
            return Err(CronError::InvalidSegment(token.to_string()));
        }
        self.kind.value_from_name(token)
    }

    fn check(&self, value: u32) -> CronResult<u32> {
        if self.kind.contains(value) {
            Ok(value)
        } else {
            Err(CronError::OutOfRange {
                field: self.kind.label(),
                value,
                min: self.kind.min(),
                max: self.kind.max(),
            })
        }
    }
}

impl fmt::Display for CronField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, part) in self.parts.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// Handle to one specific part inside a field.
///
/// Returned by [`CronField::during`] and [`CronField::every`] so a following
/// step applies to that part alone, even after later insertions.
#[derive(Debug)]
pub struct PartHandle<'a> {
    field: &'a mut CronField,
    index: usize,
}

impl<'a> PartHandle<'a> {
    /// Attach a step to this part, turning a range into a stepped range.
    pub fn every(self, step: u32) -> CronResult<PartHandle<'a>> {
        if step == 0 {
            return Err(CronError::InvalidStep(step));
        }
        let part = &mut self.field.parts[self.index];
        *part = match *part {
            Part::Range(start, end) | Part::RangeStep(start, end, _) => {
                Part::RangeStep(start, end, step)
            }
            Part::Wildcard | Part::WildcardStep(_) => Part::WildcardStep(step),
            Part::Single(_) => unreachable!("handles are only issued for range and wildcard parts"),
        };
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_renders_wildcard() {
        let field = CronField::new(FieldKind::Minute);
        assert!(field.is_wildcard());
        assert_eq!(field.render(), "*");
    }

    #[test]
    fn test_on_appends_in_order() {
        let mut field = CronField::new(FieldKind::Minute);
        field.on(4).unwrap();
        assert_eq!(field.render(), "4");

        field.on(2).unwrap().on(30).unwrap();
        assert_eq!(field.render(), "4,2,30");
    }

    #[test]
    fn test_on_out_of_range_leaves_field_unchanged() {
        let mut field = CronField::new(FieldKind::Minute);
        let err = field.on(60).unwrap_err();
        assert!(matches!(err, CronError::OutOfRange { value: 60, .. }));
        assert_eq!(field.render(), "*");
    }

    #[test]
    fn test_during_validates_bounds() {
        let mut field = CronField::new(FieldKind::Hour);
        assert!(matches!(
            field.during(10, 2).unwrap_err(),
            CronError::InvalidRange(10, 2)
        ));
        assert!(field.during(0, 24).is_err());
        assert_eq!(field.render(), "*");
    }

    #[test]
    fn test_every_rejects_zero_step() {
        let mut field = CronField::new(FieldKind::Hour);
        assert!(matches!(
            field.every(0).unwrap_err(),
            CronError::InvalidStep(0)
        ));
        assert_eq!(field.render(), "*");
    }

    #[test]
    fn test_handle_scopes_step_to_its_part() {
        let mut field = CronField::new(FieldKind::Hour);
        field.during(2, 10).unwrap().every(4).unwrap();
        assert_eq!(field.render(), "2-10/4");

        // a bare step covers the whole domain
        let mut field = CronField::new(FieldKind::Hour);
        field.every(4).unwrap();
        assert_eq!(field.render(), "*/4");

        // a later range leaves the earlier stepped wildcard alone
        field.during(2, 10).unwrap();
        assert_eq!(field.render(), "*/4,2-10");
    }

    #[test]
    fn test_handle_debug_format() {
        let mut field = CronField::new(FieldKind::Minute);
        let handle = field.during(1, 2).unwrap();
        assert!(format!("{handle:?}").contains("PartHandle"));
    }

    #[test]
    fn test_ranges_accumulate_after_first_mutation() {
        let mut field = CronField::new(FieldKind::Minute);
        field.during(4, 10).unwrap();
        assert_eq!(field.render(), "4-10");
        field.during(15, 19).unwrap();
        assert_eq!(field.render(), "4-10,15-19");

        field.clear();
        field.during(15, 19).unwrap();
        assert_eq!(field.render(), "15-19");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut field = CronField::new(FieldKind::Minute);
        field.on(5).unwrap();
        field.clear();
        field.clear();
        assert_eq!(field.render(), "*");
    }

    #[test]
    fn test_parse_segment_shapes() {
        let mut field = CronField::new(FieldKind::Minute);
        field.parse("*").unwrap();
        assert_eq!(field.render(), "*");

        field.parse("*/30").unwrap();
        assert_eq!(field.render(), "*/30");

        field.parse("10-20/3").unwrap();
        assert_eq!(field.render(), "10-20/3");

        field.parse("4-10,15-19").unwrap();
        assert_eq!(field.parts().len(), 2);
        assert_eq!(field.render(), "4-10,15-19");
    }

    #[test]
    fn test_parse_normalizes_leading_zeros() {
        let mut field = CronField::new(FieldKind::Minute);
        field.parse("00").unwrap();
        assert_eq!(field.render(), "0");

        field.parse("05-09").unwrap();
        assert_eq!(field.render(), "5-9");
    }

    #[test]
    fn test_parse_name_aliases() {
        let mut field = CronField::new(FieldKind::Month);
        field.parse("jan-mar").unwrap();
        assert_eq!(field.render(), "1-3");

        let mut field = CronField::new(FieldKind::DayOfWeek);
        field.parse("MON,FRI").unwrap();
        assert_eq!(field.render(), "1,5");

        let err = field.parse("funday").unwrap_err();
        assert!(matches!(err, CronError::UnknownName { .. }));
    }

    #[test]
    fn test_parse_rejects_names_in_numeric_fields() {
        let mut field = CronField::new(FieldKind::Minute);
        assert!(matches!(
            field.parse("mon").unwrap_err(),
            CronError::InvalidSegment(_)
        ));
    }

    #[test]
    fn test_parse_failure_leaves_field_unchanged() {
        let mut field = CronField::new(FieldKind::Minute);
        field.parse("1-5").unwrap();
        assert!(field.parse("1-5,boom").is_err());
        assert_eq!(field.render(), "1-5");
    }

    #[test]
    fn test_parse_rejects_malformed_segments() {
        let mut field = CronField::new(FieldKind::Minute);
        assert!(field.parse("").is_err());
        assert!(field.parse("5/2").is_err());
        assert!(field.parse("*/0").is_err());
        assert!(field.parse("1-").is_err());
        assert!(field.parse("20-10").is_err());
        assert!(field.parse("61").is_err());
    }

    #[test]
    fn test_domain_lookups() {
        assert!(FieldKind::Minute.contains(0));
        assert!(FieldKind::Minute.contains(59));
        assert!(!FieldKind::Minute.contains(60));
        assert!(!FieldKind::Month.contains(0));
        assert!(FieldKind::DayOfWeek.contains(7));

        assert_eq!(FieldKind::Month.value_from_name("dec").unwrap(), 12);
        assert_eq!(FieldKind::DayOfWeek.value_from_name("Sun").unwrap(), 0);
        assert!(FieldKind::Hour.value_from_name("noon").is_err());
    }
}
