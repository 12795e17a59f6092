//! Daily breakdown rows
//!
//! Rows follow the server's order and are labeled by position, not date.

use habitquest_types::DailyBreakdownEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakdownRow {
    /// 1-based position in the breakdown
    pub day: usize,
    pub damage_dealt: u32,
    pub tasks_completed: Option<u32>,
}

impl BreakdownRow {
    pub fn label(&self) -> String {
        format!("Day {}", self.day)
    }
}

/// Lazy iterator over breakdown rows. Clone it to iterate again.
#[derive(Debug, Clone)]
pub struct BreakdownRows<'a> {
    entries: std::iter::Enumerate<std::slice::Iter<'a, DailyBreakdownEntry>>,
}

impl Iterator for BreakdownRows<'_> {
    type Item = BreakdownRow;

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, entry) = self.entries.next()?;
        Some(BreakdownRow {
            day: idx + 1,
            damage_dealt: entry.damage_dealt,
            tasks_completed: entry.tasks_completed,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for BreakdownRows<'_> {}

/// Rows for the breakdown section, or `None` when the section is hidden
/// (breakdown absent or empty)
pub fn breakdown_rows(entries: Option<&[DailyBreakdownEntry]>) -> Option<BreakdownRows<'_>> {
    let entries = entries.filter(|e| !e.is_empty())?;
    Some(BreakdownRows {
        entries: entries.iter().enumerate(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(day: u32, damage: u32, tasks: Option<u32>) -> DailyBreakdownEntry {
        DailyBreakdownEntry {
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            damage_dealt: damage,
            tasks_completed: tasks,
        }
    }

    #[test]
    fn hidden_when_absent_or_empty() {
        assert!(breakdown_rows(None).is_none());
        assert!(breakdown_rows(Some(&[][..])).is_none());
    }

    #[test]
    fn positions_not_dates_in_given_order() {
        // Dates deliberately out of order: rows must not be sorted
        let entries = vec![entry(9, 30, Some(2)), entry(3, 45, None), entry(5, 10, Some(1))];
        let rows: Vec<_> = breakdown_rows(Some(entries.as_slice())).unwrap().collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label(), "Day 1");
        assert_eq!(rows[0].damage_dealt, 30);
        assert_eq!(rows[1].day, 2);
        assert_eq!(rows[1].tasks_completed, None);
        assert_eq!(rows[2].damage_dealt, 10);
    }

    #[test]
    fn restartable() {
        let entries = vec![entry(1, 5, None), entry(2, 6, None)];
        let rows = breakdown_rows(Some(entries.as_slice())).unwrap();
        let first_pass: u32 = rows.clone().map(|r| r.damage_dealt).sum();
        let second_pass: u32 = rows.map(|r| r.damage_dealt).sum();
        assert_eq!(first_pass, 11);
        assert_eq!(first_pass, second_pass);
    }
}
