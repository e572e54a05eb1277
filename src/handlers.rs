use crate::availability::{Direction, NavState};
use crate::calendar::{ClickTarget, Visibility};
use crate::dates;
use crate::errors::AppError;
use crate::models::SubscribeForm;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DateParams {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct MonthParams {
    pub delta: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectParams {
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct DismissParams {
    pub target: ClickTarget,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub current_date: Option<String>,
    pub nav: NavState,
    pub calendar: Visibility,
    pub calendar_year: i32,
    pub calendar_month: u32,
    pub available_dates: Vec<String>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let controller = state.controller.lock().await;
    Html(render_index(&controller, &dates::today_iso()))
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let controller = state.controller.lock().await;
    let (calendar_year, calendar_month) = controller.calendar().cursor();
    Json(StateResponse {
        current_date: controller.current_date().map(str::to_string),
        nav: controller.nav_state(),
        calendar: controller.calendar().visibility(),
        calendar_year,
        calendar_month,
        available_dates: controller.availability().dates().to_vec(),
    })
}

pub async fn nav_prev(State(state): State<AppState>) -> Redirect {
    shift(&state, Direction::Older).await
}

pub async fn nav_next(State(state): State<AppState>) -> Redirect {
    shift(&state, Direction::Newer).await
}

pub async fn nav_today(State(state): State<AppState>) -> Redirect {
    state.controller.lock().await.go_today();
    state.reload().await;
    Redirect::to("/")
}

pub async fn pick_date(
    State(state): State<AppState>,
    Query(params): Query<DateParams>,
) -> Result<Redirect, AppError> {
    if !state.controller.lock().await.picker_changed(&params.value) {
        return Err(AppError::bad_request("value must be a YYYY-MM-DD date"));
    }
    state.reload().await;
    Ok(Redirect::to("/"))
}

pub async fn calendar_toggle(State(state): State<AppState>) -> Redirect {
    state.controller.lock().await.toggle_calendar(dates::today());
    Redirect::to("/")
}

pub async fn calendar_month(
    State(state): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Redirect, AppError> {
    let delta = params
        .delta
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::bad_request("delta must be an integer"))?;
    state.controller.lock().await.change_month(delta);
    Ok(Redirect::to("/"))
}

pub async fn calendar_select(
    State(state): State<AppState>,
    Query(params): Query<SelectParams>,
) -> Redirect {
    let selected = state
        .controller
        .lock()
        .await
        .select_calendar_day(params.date.trim());
    if selected {
        state.reload().await;
    }
    Redirect::to("/")
}

pub async fn calendar_dismiss(
    State(state): State<AppState>,
    Query(params): Query<DismissParams>,
) -> Json<Visibility> {
    let mut controller = state.controller.lock().await;
    controller.dismiss_calendar(params.target);
    Json(controller.calendar().visibility())
}

pub async fn subscribe(
    State(state): State<AppState>,
    Form(form): Form<SubscribeForm>,
) -> Redirect {
    state.subscribe(&form.email).await;
    Redirect::to("/")
}

async fn shift(state: &AppState, direction: Direction) -> Redirect {
    let moved = state.controller.lock().await.shift(direction);
    if moved {
        state.reload().await;
    }
    Redirect::to("/")
}
