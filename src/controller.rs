//! Session state for one dashboard and the operations that change it.

use crate::api::{ApiClient, PapersQuery};
use crate::availability::{AvailabilityIndex, Direction, NavState};
use crate::calendar::{CalendarWidget, ClickTarget, MonthGrid};
use crate::chart::{KeywordChart, SvgSurface};
use crate::dates::normalize;
use crate::errors::ApiError;
use crate::models::DashboardPayload;
use crate::subscription::SubscriptionForm;
use crate::view::Dashboard;
use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

pub const PAPERS_LIMIT: u32 = 12;
pub const BREAKTHROUGH_LIMIT: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub date: Option<String>,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Stale,
    Failed,
}

#[derive(Debug)]
pub struct Controller {
    current_date: Option<String>,
    availability: AvailabilityIndex,
    calendar: CalendarWidget,
    dashboard: Option<Dashboard>,
    chart: KeywordChart<SvgSurface>,
    subscription: SubscriptionForm,
    issued: u64,
    applied: u64,
}

impl Controller {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_date: None,
            availability: AvailabilityIndex::default(),
            calendar: CalendarWidget::new(today),
            dashboard: None,
            chart: KeywordChart::new(SvgSurface::default()),
            subscription: SubscriptionForm::default(),
            issued: 0,
            applied: 0,
        }
    }

    pub fn current_date(&self) -> Option<&str> {
        self.current_date.as_deref()
    }

    pub fn availability(&self) -> &AvailabilityIndex {
        &self.availability
    }

    pub fn calendar(&self) -> &CalendarWidget {
        &self.calendar
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    pub fn chart(&self) -> &KeywordChart<SvgSurface> {
        &self.chart
    }

    pub fn chart_svg(&self) -> Option<&str> {
        self.chart.surface().svg(self.chart.current()?)
    }

    pub fn subscription(&self) -> &SubscriptionForm {
        &self.subscription
    }

    pub fn subscription_mut(&mut self) -> &mut SubscriptionForm {
        &mut self.subscription
    }

    pub fn nav_state(&self) -> NavState {
        self.availability.nav_state(self.current_date())
    }

    pub fn calendar_grid(&self, today: &str) -> Option<MonthGrid> {
        self.calendar
            .is_visible()
            .then(|| self.calendar.grid(&self.availability, self.current_date(), today))
    }

    /// Installs a freshly loaded availability index. Without a selection the
    /// newest date becomes current. A failed load leaves navigation empty.
    pub fn apply_availability(&mut self, loaded: Result<AvailabilityIndex, ApiError>) {
        match loaded {
            Ok(index) => {
                self.availability = index;
                if self.current_date.is_none() {
                    self.current_date = self.availability.newest().map(str::to_string);
                }
            }
            Err(err) => {
                error!("failed to load available dates: {err}");
            }
        }
    }

    pub fn set_current_date(&mut self, date: Option<&str>) {
        self.current_date = normalize(date);
        self.calendar.close();
        debug!("current date set to {:?}", self.current_date);
    }

    /// Moves one available date in `direction`. Returns false when already
    /// at the boundary, leaving everything untouched.
    pub fn shift(&mut self, direction: Direction) -> bool {
        let next = self
            .availability
            .step(self.current_date(), direction)
            .map(str::to_string);
        match next {
            Some(date) => {
                self.set_current_date(Some(&date));
                true
            }
            None => false,
        }
    }

    pub fn go_today(&mut self) {
        match self.availability.newest().map(str::to_string) {
            Some(newest) => self.set_current_date(Some(&newest)),
            None => self.current_date = None,
        }
    }

    /// A manually typed date is accepted even when the backend never
    /// reported it. An empty value clears the selection. Anything that is not
    /// a `YYYY-MM-DD` date is refused and nothing changes.
    pub fn picker_changed(&mut self, value: &str) -> bool {
        match normalize(Some(value)) {
            None => {
                self.current_date = None;
                true
            }
            Some(date) => {
                if !self.availability.insert(&date) {
                    return false;
                }
                self.set_current_date(Some(&date));
                true
            }
        }
    }

    pub fn toggle_calendar(&mut self, today: NaiveDate) {
        let current = self.current_date.clone();
        self.calendar.toggle(current.as_deref(), today);
    }

    pub fn change_month(&mut self, delta: i32) {
        self.calendar.change_month(delta);
    }

    pub fn dismiss_calendar(&mut self, target: ClickTarget) -> bool {
        self.calendar.dismiss_outside(target)
    }

    /// Returns true when the day had data and became the current date.
    pub fn select_calendar_day(&mut self, date: &str) -> bool {
        match self.calendar.select(&self.availability, date) {
            Some(date) => {
                self.set_current_date(Some(&date));
                true
            }
            None => false,
        }
    }

    /// Starts a load for the current date. Fetch without holding the
    /// controller, then hand the ticket back to `finish_load`.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket {
            date: self.current_date.clone(),
            generation: self.issued,
        }
    }

    /// Drops the payload if its date is no longer selected or a newer load
    /// was already applied.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<DashboardPayload, ApiError>,
    ) -> LoadOutcome {
        let payload = match result {
            Ok(payload) => payload,
            Err(err) => {
                error!("failed to load dashboard for {:?}: {err}", ticket.date);
                return LoadOutcome::Failed;
            }
        };

        if ticket.generation <= self.applied || ticket.date != self.current_date {
            warn!(
                "discarding stale dashboard for {:?} (generation {})",
                ticket.date, ticket.generation
            );
            return LoadOutcome::Stale;
        }

        let dashboard = Dashboard::build(
            &payload.papers,
            &payload.breakthroughs,
            &payload.keyword_stats,
        );
        self.chart.replace(&dashboard.keywords.chart);
        self.dashboard = Some(dashboard);
        self.applied = ticket.generation;
        info!(
            "rendered dashboard for {:?}: {} papers, {} breakthroughs",
            ticket.date,
            payload.papers.len(),
            payload.breakthroughs.len()
        );
        LoadOutcome::Applied
    }
}

/// Fetches papers, breakthroughs and keyword stats concurrently. The first
/// failure aborts the whole load.
pub async fn fetch_dashboard(
    client: &ApiClient,
    date: Option<&str>,
) -> Result<DashboardPayload, ApiError> {
    let papers_query = PapersQuery {
        limit: PAPERS_LIMIT,
        breakthrough_only: false,
        target_date: date.map(str::to_string),
    };
    let breakthrough_query = PapersQuery {
        limit: BREAKTHROUGH_LIMIT,
        breakthrough_only: true,
        target_date: date.map(str::to_string),
    };

    let (papers, breakthroughs, keyword_stats) = tokio::try_join!(
        client.papers(&papers_query),
        client.papers(&breakthrough_query),
        client.keyword_stats(),
    )?;

    Ok(DashboardPayload {
        papers,
        breakthroughs,
        keyword_stats,
    })
}
