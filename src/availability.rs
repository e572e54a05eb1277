use crate::api::ApiClient;
use crate::dates::{self, normalize};
use crate::errors::ApiError;
use serde::Serialize;
use tracing::info;

/// Step direction through the availability list, which is newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the end of the list (+1).
    Older,
    /// Toward the start of the list (-1).
    Newer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub older_enabled: bool,
    pub newer_enabled: bool,
}

/// Dates that have data, deduplicated and sorted newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AvailabilityIndex {
    dates: Vec<String>,
}

impl AvailabilityIndex {
    pub async fn load(client: &ApiClient) -> Result<Self, ApiError> {
        let raw = client.calendar().await?;
        let index = Self::from_raw(raw.iter().map(|value| value.as_deref()));
        info!("loaded {} available dates", index.len());
        Ok(index)
    }

    pub fn from_raw<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let mut dates: Vec<String> = values.into_iter().filter_map(normalize).collect();
        sort_descending(&mut dates);
        Self { dates }
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn contains(&self, date: &str) -> bool {
        self.index_of(date).is_some()
    }

    pub fn index_of(&self, date: &str) -> Option<usize> {
        self.dates.iter().position(|entry| entry == date)
    }

    pub fn newest(&self) -> Option<&str> {
        self.dates.first().map(String::as_str)
    }

    pub fn oldest(&self) -> Option<&str> {
        self.dates.last().map(String::as_str)
    }

    /// `(min, max)` for a date picker.
    pub fn bounds(&self) -> Option<(&str, &str)> {
        Some((self.oldest()?, self.newest()?))
    }

    /// Adds a date picked by hand even if the backend never reported it.
    /// Returns `false`, leaving the index untouched, when `date` is not a
    /// `YYYY-MM-DD` calendar date.
    pub fn insert(&mut self, date: &str) -> bool {
        let Some(date) = normalize(Some(date)) else {
            return false;
        };
        if dates::parse_year_month(&date).is_none() {
            return false;
        }
        if !self.contains(&date) {
            self.dates.push(date);
            sort_descending(&mut self.dates);
        }
        true
    }

    /// Returns the next date in `direction`, or `None` when already at the
    /// boundary. An unset or unknown `current` jumps to the far end that
    /// matches the direction.
    pub fn step(&self, current: Option<&str>, direction: Direction) -> Option<&str> {
        if self.dates.is_empty() {
            return None;
        }
        let position = current.and_then(|date| self.index_of(date));
        let Some(position) = position else {
            return match direction {
                Direction::Older => self.oldest(),
                Direction::Newer => self.newest(),
            };
        };
        let next = match direction {
            Direction::Older => position.checked_add(1),
            Direction::Newer => position.checked_sub(1),
        }?;
        self.dates.get(next).map(String::as_str)
    }

    pub fn nav_state(&self, current: Option<&str>) -> NavState {
        if self.dates.is_empty() {
            return NavState {
                older_enabled: false,
                newer_enabled: false,
            };
        }
        match current.and_then(|date| self.index_of(date)) {
            None => NavState {
                older_enabled: true,
                newer_enabled: true,
            },
            Some(position) => NavState {
                older_enabled: position + 1 < self.dates.len(),
                newer_enabled: position > 0,
            },
        }
    }
}

fn sort_descending(dates: &mut Vec<String>) {
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(values: &[&str]) -> AvailabilityIndex {
        AvailabilityIndex::from_raw(values.iter().map(|value| Some(*value)))
    }

    #[test]
    fn load_dedupes_and_sorts_descending() {
        let index = AvailabilityIndex::from_raw(vec![
            Some("2024-05-01"),
            Some("2024-05-03T00:00:00"),
            None,
            Some(""),
            Some("2024-05-01T12:00:00Z"),
            Some("2024-04-30"),
            Some("2024-05-03"),
        ]);
        assert_eq!(index.dates(), ["2024-05-03", "2024-05-01", "2024-04-30"]);
        assert!(index.dates().windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn step_stops_at_boundaries() {
        let index = index(&["2024-05-03", "2024-05-02", "2024-05-01"]);
        assert_eq!(index.step(Some("2024-05-03"), Direction::Newer), None);
        assert_eq!(index.step(Some("2024-05-01"), Direction::Older), None);
        assert_eq!(
            index.step(Some("2024-05-02"), Direction::Older),
            Some("2024-05-01")
        );
        assert_eq!(
            index.step(Some("2024-05-02"), Direction::Newer),
            Some("2024-05-03")
        );
    }

    #[test]
    fn step_from_unset_jumps_to_far_end() {
        let index = index(&["2024-05-03", "2024-05-02", "2024-05-01"]);
        assert_eq!(index.step(None, Direction::Older), Some("2024-05-01"));
        assert_eq!(index.step(None, Direction::Newer), Some("2024-05-03"));
        assert_eq!(
            index.step(Some("1999-01-01"), Direction::Newer),
            Some("2024-05-03")
        );
        assert_eq!(AvailabilityIndex::default().step(None, Direction::Older), None);
    }

    #[test]
    fn nav_state_tracks_position() {
        let index = index(&["2024-05-03", "2024-05-02", "2024-05-01"]);
        assert_eq!(
            index.nav_state(None),
            NavState {
                older_enabled: true,
                newer_enabled: true
            }
        );
        assert!(!index.nav_state(Some("2024-05-03")).newer_enabled);
        assert!(index.nav_state(Some("2024-05-03")).older_enabled);
        assert!(!index.nav_state(Some("2024-05-01")).older_enabled);

        let empty = AvailabilityIndex::default();
        assert!(!empty.nav_state(None).older_enabled);
        assert!(!empty.nav_state(None).newer_enabled);
    }

    #[test]
    fn insert_keeps_order_without_duplicates() {
        let mut index = index(&["2024-05-03", "2024-05-01"]);
        index.insert("2024-05-02");
        index.insert("2024-05-02");
        assert_eq!(index.dates(), ["2024-05-03", "2024-05-02", "2024-05-01"]);
        assert_eq!(index.bounds(), Some(("2024-05-01", "2024-05-03")));
    }

    #[test]
    fn insert_rejects_non_dates() {
        let mut index = index(&["2024-05-03"]);
        assert!(!index.insert("zzz"));
        assert!(!index.insert("2024-13-40"));
        assert!(!index.insert(""));
        assert_eq!(index.dates(), ["2024-05-03"]);
    }
}
