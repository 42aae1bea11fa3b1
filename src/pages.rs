use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::AppState;
use crate::widgets::calendar::{CalendarCursor, render_month};
use crate::widgets::header::{HeaderOptions, inject_header};

const CALENDAR_STYLES: &str = r#"
        .calendar-grid { display: grid; grid-template-columns: repeat(7, 1fr); gap: 8px; }
        .calendar-day { min-height: 96px; padding: 8px; border-radius: 8px; background: #fafafa; }
        .calendar-day.empty { background: transparent; }
        .calendar-day.today { outline: 2px solid #d4af37; }
        .day-number { font-weight: bold; }
        .calendar-event { margin-top: 4px; font-size: 12px; background: rgba(212, 175, 55, 0.15); border-radius: 4px; padding: 2px 4px; overflow: hidden; white-space: nowrap; text-overflow: ellipsis; }
"#;

pub async fn index() -> Html<String> {
    let html_content = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Algrowithm</title>
        <meta charset="utf-8">
        <style>
            body { font-family: Arial, sans-serif; margin: 40px; }
            main { padding-top: 80px; }
            .info-box { background-color: #f0f8ff; padding: 20px; border-radius: 8px; margin: 20px 0; }
            .endpoint { background-color: #f5f5f5; padding: 10px; margin: 10px 0; border-radius: 4px; font-family: monospace; }
        </style>
    </head>
    <body>
        <div id="header-placeholder"></div>
        <main>
        <h1>Algrowithm</h1>

        <div class="info-box">
            <h2>Service Information</h2>
            <p>Turns photographed workbook pages into website and photoshoot prompts, and drafts e-books from a few lines of input.</p>
        </div>

        <h2>Available Endpoints:</h2>
        <div class="endpoint">GET /schedule - Session calendar</div>
        <div class="endpoint">GET /health - Health check</div>
        <div class="endpoint">POST /api/analyze - Worksheet image to website prompt</div>
        <div class="endpoint">POST /api/analyze-photoshoot - Worksheet image to photoshoot prompt</div>
        <div class="endpoint">POST /api/analyze-ebook - Worksheet images to e-book material</div>
        <div class="endpoint">POST /api/generate-cover-image - Cover background image</div>
        <div class="endpoint">POST /api/generate-ebook-pdf - Full e-book draft</div>
        <div class="endpoint">POST /api/export-ebook-epub - Package a draft as EPUB</div>
        </main>
    </body>
    </html>
    "#;

    Html(inject_header(html_content, &HeaderOptions::default()))
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub month: Option<String>,
}

pub async fn schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Html<String> {
    let today = chrono::Local::now().date_naive();
    let cursor = query
        .month
        .as_deref()
        .and_then(CalendarCursor::parse)
        .unwrap_or_else(|| CalendarCursor::containing(today));

    Html(render_schedule_page(cursor, &state, today))
}

fn render_schedule_page(cursor: CalendarCursor, state: &AppState, today: chrono::NaiveDate) -> String {
    let grid = render_month(cursor, &state.schedule, today);

    let page = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>일정 - Algrowithm</title>
    <meta charset="utf-8">
    <style>{styles}</style>
</head>
<body>
    <div id="header-placeholder"></div>
    <main style="padding-top: 96px; max-width: 960px; margin: 0 auto;">
        <div class="calendar-header">
            <a href="/schedule?month={prev}" class="calendar-nav" aria-label="previous month">&lsaquo;</a>
            <h2 id="calendar-month">{title}</h2>
            <a href="/schedule?month={next}" class="calendar-nav" aria-label="next month">&rsaquo;</a>
        </div>
        <div class="calendar-weekdays calendar-grid">
            <div>Sun</div><div>Mon</div><div>Tue</div><div>Wed</div><div>Thu</div><div>Fri</div><div>Sat</div>
        </div>
        <div id="calendar-grid" class="calendar-grid">
{cells}        </div>
    </main>
</body>
</html>
"#,
        styles = CALENDAR_STYLES,
        prev = cursor.prev(),
        next = cursor.next(),
        title = grid.title,
        cells = grid.to_html(),
    );

    inject_header(&page, &HeaderOptions::default())
}
