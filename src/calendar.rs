use crate::availability::AvailabilityIndex;
use crate::dates::{
    days_in_month, first_weekday, iso_date, month_name, parse_year_month, year_month_of,
    WEEKDAY_LABELS,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// Where a pointer interaction landed, relative to the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickTarget {
    Calendar,
    Opener,
    Outside,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub date: String,
    pub has_data: bool,
    pub selected: bool,
    pub is_today: bool,
}

impl DayCell {
    pub fn interactive(&self) -> bool {
        self.has_data
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub title: String,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            GridCell::Day(day) => Some(day),
            GridCell::Blank => None,
        })
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, GridCell::Blank))
            .count()
    }
}

/// Month picker with its own cursor; the selected date lives elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarWidget {
    visibility: Visibility,
    year: i32,
    month0: u32,
}

impl CalendarWidget {
    pub fn new(today: NaiveDate) -> Self {
        let (year, month0) = year_month_of(today);
        Self {
            visibility: Visibility::Hidden,
            year,
            month0,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn cursor(&self) -> (i32, u32) {
        (self.year, self.month0)
    }

    pub fn open(&mut self, current_date: Option<&str>, today: NaiveDate) {
        let (year, month0) = current_date
            .and_then(parse_year_month)
            .unwrap_or_else(|| year_month_of(today));
        self.year = year;
        self.month0 = month0;
        self.visibility = Visibility::Visible;
    }

    pub fn close(&mut self) {
        self.visibility = Visibility::Hidden;
    }

    pub fn toggle(&mut self, current_date: Option<&str>, today: NaiveDate) {
        match self.visibility {
            Visibility::Visible => self.close(),
            Visibility::Hidden => self.open(current_date, today),
        }
    }

    /// Returns true when the interaction closed the calendar.
    pub fn dismiss_outside(&mut self, target: ClickTarget) -> bool {
        if self.is_visible() && target == ClickTarget::Outside {
            self.close();
            return true;
        }
        false
    }

    pub fn change_month(&mut self, delta: i32) {
        let total = self.year as i64 * 12 + self.month0 as i64 + delta as i64;
        self.year = total.div_euclid(12) as i32;
        self.month0 = total.rem_euclid(12) as u32;
    }

    pub fn grid(
        &self,
        index: &AvailabilityIndex,
        current_date: Option<&str>,
        today: &str,
    ) -> MonthGrid {
        build_grid(self.year, self.month0, index, current_date, today)
    }

    /// Emits `date` as the new selection when it has data, closing the
    /// widget. Days without data are inert.
    pub fn select(&mut self, index: &AvailabilityIndex, date: &str) -> Option<String> {
        if !index.contains(date) {
            return None;
        }
        self.close();
        Some(date.to_string())
    }
}

pub fn build_grid(
    year: i32,
    month0: u32,
    index: &AvailabilityIndex,
    current_date: Option<&str>,
    today: &str,
) -> MonthGrid {
    let blanks = first_weekday(year, month0) as usize;
    let days = days_in_month(year, month0);
    let mut cells = Vec::with_capacity(blanks + days as usize);
    cells.extend(std::iter::repeat_n(GridCell::Blank, blanks));

    for day in 1..=days {
        let date = iso_date(year, month0, day);
        cells.push(GridCell::Day(DayCell {
            day,
            has_data: index.contains(&date),
            selected: current_date == Some(date.as_str()),
            is_today: date == today,
            date,
        }));
    }

    MonthGrid {
        title: format!("{} {year}", month_name(month0)),
        weekdays: WEEKDAY_LABELS,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn index(values: &[&str]) -> AvailabilityIndex {
        AvailabilityIndex::from_raw(values.iter().map(|value| Some(*value)))
    }

    #[test]
    fn leap_february_has_29_days_after_four_blanks() {
        let grid = build_grid(2024, 1, &AvailabilityIndex::default(), None, "2024-05-15");
        assert_eq!(grid.title, "February 2024");
        assert_eq!(grid.leading_blanks(), 4);
        assert_eq!(grid.days().count(), 29);
    }

    #[test]
    fn plain_february_has_28_days() {
        let grid = build_grid(2023, 1, &AvailabilityIndex::default(), None, "2024-05-15");
        assert_eq!(grid.days().count(), 28);
    }

    #[test]
    fn cells_carry_independent_flags() {
        let index = index(&["2024-05-15", "2024-05-02"]);
        let grid = build_grid(2024, 4, &index, Some("2024-05-02"), "2024-05-15");

        let cell = |day: u32| grid.days().find(|cell| cell.day == day).unwrap().clone();
        let today_cell = cell(15);
        assert!(today_cell.has_data && today_cell.is_today && !today_cell.selected);
        let picked = cell(2);
        assert!(picked.has_data && picked.selected && !picked.is_today);
        let empty = cell(3);
        assert!(!empty.interactive() && !empty.selected && !empty.is_today);
    }

    #[test]
    fn open_uses_current_date_then_today() {
        let mut widget = CalendarWidget::new(today());
        widget.open(Some("2023-11-20"), today());
        assert_eq!(widget.cursor(), (2023, 10));
        assert!(widget.is_visible());

        widget.close();
        widget.open(None, today());
        assert_eq!(widget.cursor(), (2024, 4));
    }

    #[test]
    fn toggle_and_outside_click() {
        let mut widget = CalendarWidget::new(today());
        assert_eq!(widget.visibility(), Visibility::Hidden);
        widget.toggle(None, today());
        assert!(widget.is_visible());

        assert!(!widget.dismiss_outside(ClickTarget::Calendar));
        assert!(!widget.dismiss_outside(ClickTarget::Opener));
        assert!(widget.is_visible());
        assert!(widget.dismiss_outside(ClickTarget::Outside));
        assert!(!widget.is_visible());

        widget.toggle(None, today());
        widget.toggle(None, today());
        assert!(!widget.is_visible());
    }

    #[test]
    fn change_month_rolls_years() {
        let mut widget = CalendarWidget::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        widget.change_month(-1);
        assert_eq!(widget.cursor(), (2023, 11));
        widget.change_month(1);
        assert_eq!(widget.cursor(), (2024, 0));
        widget.change_month(12);
        assert_eq!(widget.cursor(), (2025, 0));
    }

    #[test]
    fn selecting_a_day_without_data_is_inert() {
        let index = index(&["2024-05-02"]);
        let mut widget = CalendarWidget::new(today());
        widget.open(None, today());

        assert_eq!(widget.select(&index, "2024-05-03"), None);
        assert!(widget.is_visible());

        assert_eq!(widget.select(&index, "2024-05-02").as_deref(), Some("2024-05-02"));
        assert!(!widget.is_visible());
    }
}
