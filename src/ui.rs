use crate::calendar::{GridCell, MonthGrid};
use crate::controller::Controller;
use crate::subscription::Tone;
use crate::view::{CardList, KeywordPanel, PaperCard};

/// Label for the selected-date display when nothing is selected
/// ("choose a date").
pub const NO_DATE_LABEL: &str = "选择日期";

pub fn render_index(controller: &Controller, today: &str) -> String {
    let current = controller.current_date();
    let nav = controller.nav_state();
    let (date_min, date_max) = controller
        .availability()
        .bounds()
        .map(|(min, max)| (min.to_string(), max.to_string()))
        .unwrap_or_default();

    let (papers, breakthroughs, keywords) = match controller.dashboard() {
        Some(dashboard) => (
            render_card_list(&dashboard.lists.papers),
            render_card_list(&dashboard.lists.breakthroughs),
            render_keyword_rows(&dashboard.keywords),
        ),
        None => Default::default(),
    };

    let form = controller.subscription();
    let (feedback, tone) = match form.feedback() {
        Some(feedback) => (html_escape(&feedback.message), tone_name(feedback.tone)),
        None => (String::new(), ""),
    };

    let calendar = controller.calendar_grid(today);
    let values = [
        ("DATE_VALUE", html_escape(current.unwrap_or(""))),
        ("DATE_MIN", html_escape(&date_min)),
        ("DATE_MAX", html_escape(&date_max)),
        ("SELECTED_LABEL", html_escape(current.unwrap_or(NO_DATE_LABEL))),
        ("PREV_DISABLED", disabled(nav.older_enabled).to_string()),
        ("NEXT_DISABLED", disabled(nav.newer_enabled).to_string()),
        (
            "CALENDAR_CLASS",
            (if calendar.is_some() { "calendar visible" } else { "calendar" }).to_string(),
        ),
        (
            "CALENDAR_TITLE",
            calendar
                .as_ref()
                .map(|grid| html_escape(&grid.title))
                .unwrap_or_default(),
        ),
        (
            "CALENDAR_GRID",
            calendar.as_ref().map(render_grid).unwrap_or_default(),
        ),
        ("PAPERS", papers),
        ("BREAKTHROUGHS", breakthroughs),
        ("KEYWORDS", keywords),
        ("CHART", controller.chart_svg().unwrap_or_default().to_string()),
        ("EMAIL", html_escape(&form.email)),
        ("FEEDBACK", feedback),
        ("FEEDBACK_TONE", tone.to_string()),
    ];
    fill(INDEX_HTML, &values)
}

pub fn render_card(card: &PaperCard) -> String {
    let mut html = String::from(r#"<article class="card">"#);
    html.push_str(&format!("<h3>{}</h3>", html_escape(&card.title)));
    html.push_str(&format!(r#"<p class="meta">{}</p>"#, html_escape(&card.authors)));
    if let Some(badge) = &card.badge {
        html.push_str(&format!(r#"<span class="badge">{}</span>"#, html_escape(badge)));
    }
    if let Some(reason) = &card.reason {
        html.push_str(&format!(r#"<p class="meta">{}</p>"#, html_escape(reason)));
    }
    for block in &card.summaries {
        html.push_str(&format!(
            r#"<p class="summary"><strong class="label">{}</strong><br>{}</p>"#,
            block.label,
            html_escape(&block.text)
        ));
    }
    html.push_str(&format!(
        r#"<p class="meta"><a href="{}" target="_blank" rel="noopener">arXiv</a> · <a href="{}" target="_blank" rel="noopener">HF daily</a></p>"#,
        html_escape(&card.arxiv_url),
        html_escape(&card.hf_url)
    ));
    html.push_str("</article>");
    html
}

pub fn render_card_list(list: &CardList) -> String {
    match list {
        CardList::Empty(placeholder) => format!(r#"<p class="meta">{placeholder}</p>"#),
        CardList::Cards(cards) => cards.iter().map(render_card).collect(),
    }
}

fn render_keyword_rows(panel: &KeywordPanel) -> String {
    panel
        .rows
        .iter()
        .map(|row| {
            format!(
                "<li><span>{}</span><span>{}</span></li>",
                html_escape(&row.keyword),
                row.count
            )
        })
        .collect()
}

pub fn render_grid(grid: &MonthGrid) -> String {
    let mut html = String::new();
    for weekday in grid.weekdays {
        html.push_str(&format!(r#"<div class="calendar-weekday">{weekday}</div>"#));
    }
    for cell in &grid.cells {
        match cell {
            GridCell::Blank => html.push_str(r#"<div class="calendar-day empty"></div>"#),
            GridCell::Day(day) => {
                let mut class = String::from("calendar-day");
                if day.has_data {
                    class.push_str(" has-data");
                }
                if day.selected {
                    class.push_str(" selected");
                }
                if day.is_today {
                    class.push_str(" today");
                }
                html.push_str(&format!(
                    r#"<form method="post" action="/calendar/select?date={}"><button type="submit" class="{class}" data-date="{}"{}>{}</button></form>"#,
                    day.date,
                    day.date,
                    disabled(day.interactive()),
                    day.day
                ));
            }
        }
    }
    html
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn disabled(enabled: bool) -> &'static str {
    if enabled { "" } else { " disabled" }
}

fn tone_name(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => "info",
        Tone::Success => "ok",
        Tone::Error => "error",
    }
}

/// Substitutes `{{KEY}}` markers in one pass, so inserted text is never
/// scanned for markers again.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Paper Insights</title>
  <style>
    :root {
      --bg: #0f172a;
      --panel: rgba(30, 41, 59, 0.85);
      --ink: #e2e8f0;
      --muted: #94a3b8;
      --accent: #38bdf8;
      --ok: rgba(94, 234, 212, 0.9);
      --error: rgba(248, 113, 113, 0.9);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    main {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    form {
      display: inline;
      margin: 0;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      background: var(--accent);
      color: var(--bg);
      font-weight: 600;
      cursor: pointer;
    }

    button[disabled] {
      opacity: 0.4;
      cursor: default;
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
      position: relative;
    }

    .panel {
      background: var(--panel);
      border-radius: 18px;
      padding: 20px;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
      gap: 16px;
    }

    .card {
      background: rgba(15, 23, 42, 0.6);
      border-radius: 14px;
      padding: 16px;
    }

    .meta {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .badge {
      display: inline-block;
      background: var(--accent);
      color: var(--bg);
      border-radius: 999px;
      padding: 2px 10px;
      font-size: 0.8rem;
      font-weight: 600;
    }

    .calendar {
      display: none;
      position: absolute;
      top: 48px;
      z-index: 10;
      background: var(--panel);
      border-radius: 14px;
      padding: 14px;
    }

    .calendar.visible {
      display: block;
    }

    #calendar-grid {
      display: grid;
      grid-template-columns: repeat(7, 40px);
      gap: 4px;
      text-align: center;
    }

    .calendar-day {
      width: 40px;
      padding: 8px 0;
      border-radius: 8px;
      background: transparent;
      color: var(--muted);
    }

    .calendar-day.has-data {
      color: var(--ink);
      background: rgba(56, 189, 248, 0.2);
    }

    .calendar-day.selected {
      background: var(--accent);
      color: var(--bg);
    }

    .calendar-day.today {
      outline: 1px solid var(--accent);
    }

    #keyword-table {
      list-style: none;
      padding: 0;
    }

    #keyword-table li {
      display: flex;
      justify-content: space-between;
      padding: 4px 0;
    }

    .chart-bar {
      fill: rgba(56, 189, 248, 0.6);
    }

    .chart-axis {
      stroke: var(--muted);
    }

    .chart-label {
      fill: #cbd5f5;
      font-size: 11px;
    }

    #subscribe-feedback[data-tone="ok"] {
      color: var(--ok);
    }

    #subscribe-feedback[data-tone="error"] {
      color: var(--error);
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Daily Paper Insights</h1>
      <p class="meta">Problem, solution and effect summaries for each day's papers.</p>
    </header>

    <section class="toolbar">
      <form method="post" action="/nav/prev"><button id="prev-day" type="submit"{{PREV_DISABLED}}>&larr; Older</button></form>
      <form method="get" action="/date">
        <input type="date" id="date-picker" name="value" value="{{DATE_VALUE}}" min="{{DATE_MIN}}" max="{{DATE_MAX}}" onchange="this.form.submit()" />
      </form>
      <form method="post" action="/nav/next"><button id="next-day" type="submit"{{NEXT_DISABLED}}>Newer &rarr;</button></form>
      <form method="post" action="/nav/today"><button id="today" type="submit">Latest</button></form>
      <form method="post" action="/calendar/toggle"><button id="date-open" type="submit">Calendar</button></form>
      <span id="selected-date-display">{{SELECTED_LABEL}}</span>
      <div id="custom-calendar" class="{{CALENDAR_CLASS}}">
        <div class="calendar-header">
          <form method="post" action="/calendar/month?delta=-1"><button id="calendar-prev-month" type="submit">&lsaquo;</button></form>
          <span id="calendar-month-year">{{CALENDAR_TITLE}}</span>
          <form method="post" action="/calendar/month?delta=1"><button id="calendar-next-month" type="submit">&rsaquo;</button></form>
        </div>
        <div id="calendar-grid">{{CALENDAR_GRID}}</div>
      </div>
    </section>

    <section class="panel">
      <h2>Breakthroughs</h2>
      <div id="breakthrough-list" class="cards">{{BREAKTHROUGHS}}</div>
    </section>

    <section class="panel">
      <h2>Papers</h2>
      <div id="papers-list" class="cards">{{PAPERS}}</div>
    </section>

    <section class="panel">
      <h2>Trending keywords</h2>
      <ol id="keyword-table">{{KEYWORDS}}</ol>
      <div id="keyword-chart">{{CHART}}</div>
    </section>

    <section class="panel">
      <h2>Daily digest</h2>
      <form id="subscribe-form" method="post" action="/subscribe">
        <input type="email" name="email" value="{{EMAIL}}" placeholder="you@example.com" required />
        <button type="submit">Subscribe</button>
      </form>
      <p id="subscribe-feedback" data-tone="{{FEEDBACK_TONE}}">{{FEEDBACK}}</p>
    </section>
  </main>
  <script>
    const customCalendar = document.getElementById('custom-calendar');
    const openPickerButton = document.getElementById('date-open');
    const subscribeForm = document.getElementById('subscribe-form');
    const feedbackEl = document.getElementById('subscribe-feedback');

    document.addEventListener('click', (event) => {
      if (!customCalendar.classList.contains('visible')) {
        return;
      }
      if (customCalendar.contains(event.target) || openPickerButton.contains(event.target)) {
        return;
      }
      fetch('/calendar/dismiss?target=outside', { method: 'POST' })
        .then(() => customCalendar.classList.remove('visible'))
        .catch(() => {});
    });

    subscribeForm.addEventListener('submit', () => {
      feedbackEl.textContent = 'Submitting...';
      feedbackEl.dataset.tone = 'info';
    });
  </script>
</body>
</html>
"#;
