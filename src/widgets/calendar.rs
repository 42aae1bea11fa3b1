use chrono::{Datelike, NaiveDate};

use crate::models::{CalendarEvent, EventKind};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn default_events() -> Vec<CalendarEvent> {
    vec![
        CalendarEvent {
            date: "2025-11-27".to_string(),
            title: "1회차 소셜링 why me?".to_string(),
            kind: EventKind::Social,
        },
        CalendarEvent {
            date: "2025-11-28".to_string(),
            title: "2회차 소셜링 why not me?".to_string(),
            kind: EventKind::Social,
        },
    ]
}

/// The month a calendar is showing. Each instance moves independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    year: i32,
    /// 1-based.
    month: u32,
}

impl CalendarCursor {
    /// `None` unless the month's first day is a representable date.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Reads `YYYY-MM`.
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                month: self.month + 1,
                ..self
            }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                month: self.month - 1,
                ..self
            }
        }
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    fn days_in_month(&self) -> u32 {
        match (self.first_day(), self.next().first_day()) {
            (Some(first), Some(next)) => (next - first).num_days() as u32,
            _ => 0,
        }
    }
}

impl std::fmt::Display for CalendarCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub date: String,
    pub events: Vec<String>,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub title: String,
    /// Empty cells before the 1st; Sunday is column 0.
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

pub fn render_month(cursor: CalendarCursor, events: &[CalendarEvent], today: NaiveDate) -> MonthGrid {
    let leading_blanks = cursor
        .first_day()
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);

    let days = (1..=cursor.days_in_month())
        .map(|day| {
            let date = format!("{:04}-{:02}-{:02}", cursor.year, cursor.month, day);
            let events = events
                .iter()
                .filter(|event| event.date == date)
                .map(|event| event.title.clone())
                .collect();
            DayCell {
                day,
                events,
                is_today: today.year() == cursor.year
                    && today.month() == cursor.month
                    && today.day() == day,
                date,
            }
        })
        .collect();

    MonthGrid {
        title: format!("{} {}", MONTH_NAMES[(cursor.month - 1) as usize], cursor.year),
        leading_blanks,
        days,
    }
}

impl MonthGrid {
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for _ in 0..self.leading_blanks {
            html.push_str("<div class=\"calendar-day empty\"></div>\n");
        }
        for cell in &self.days {
            let class = if cell.is_today {
                "calendar-day today"
            } else {
                "calendar-day"
            };
            html.push_str(&format!(
                "<div class=\"{}\" data-date=\"{}\">\n<div class=\"day-number\">{}</div>\n",
                class, cell.date, cell.day
            ));
            for title in &cell.events {
                html.push_str(&format!(
                    "<div class=\"calendar-event\" title=\"{}\">{}</div>\n",
                    html_escape::encode_double_quoted_attribute(title),
                    html_escape::encode_text(title)
                ));
            }
            html.push_str("</div>\n");
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn event_lands_only_in_its_day() {
        let cursor = CalendarCursor::new(2025, 11).unwrap();
        let grid = render_month(cursor, &default_events(), date(2024, 1, 1));

        assert_eq!(grid.title, "November 2025");
        for cell in &grid.days {
            let has_why_me = cell.events.iter().any(|t| t == "1회차 소셜링 why me?");
            assert_eq!(has_why_me, cell.day == 27, "day {}", cell.day);
        }
        assert_eq!(grid.days[27].events, vec!["2회차 소셜링 why not me?"]);
    }

    #[test]
    fn grid_shape_follows_the_month() {
        // 1 November 2025 is a Saturday.
        let grid = render_month(
            CalendarCursor::new(2025, 11).unwrap(),
            &[],
            date(2024, 1, 1),
        );
        assert_eq!(grid.leading_blanks, 6);
        assert_eq!(grid.days.len(), 30);

        let leap = render_month(CalendarCursor::new(2024, 2).unwrap(), &[], date(2024, 1, 1));
        assert_eq!(leap.days.len(), 29);
        // 1 February 2024 is a Thursday.
        assert_eq!(leap.leading_blanks, 4);
    }

    #[test]
    fn today_is_highlighted_once() {
        let grid = render_month(
            CalendarCursor::new(2026, 10).unwrap(),
            &[],
            date(2026, 10, 15),
        );
        let today: Vec<u32> = grid.days.iter().filter(|c| c.is_today).map(|c| c.day).collect();
        assert_eq!(today, vec![15]);

        let other_month = render_month(
            CalendarCursor::new(2026, 9).unwrap(),
            &[],
            date(2026, 10, 15),
        );
        assert!(other_month.days.iter().all(|c| !c.is_today));
    }

    #[test]
    fn navigation_round_trips_across_year_boundaries() {
        let start = CalendarCursor::new(2025, 12).unwrap();
        assert_eq!(start.next(), CalendarCursor::new(2026, 1).unwrap());
        assert_eq!(start.next().prev(), start);
        assert_eq!(CalendarCursor::new(2025, 1).unwrap().prev().to_string(), "2024-12");

        let mut cursor = start;
        for _ in 0..240 {
            cursor = cursor.prev();
        }
        assert_eq!(cursor, CalendarCursor::new(2005, 12).unwrap());
    }

    #[test]
    fn cursors_are_independent() {
        let a = CalendarCursor::new(2025, 11).unwrap();
        let b = a.next();
        assert_eq!(a.to_string(), "2025-11");
        assert_eq!(b.to_string(), "2025-12");
    }

    #[test]
    fn parse_rejects_bad_months() {
        assert_eq!(
            CalendarCursor::parse("2025-11"),
            CalendarCursor::new(2025, 11)
        );
        assert!(CalendarCursor::parse("2025-13").is_none());
        assert!(CalendarCursor::parse("november").is_none());
        assert!(CalendarCursor::parse("2147483647-12").is_none());
        assert!(CalendarCursor::parse("-2147483648-01").is_none());
    }

    #[test]
    fn html_escapes_event_titles() {
        let events = vec![CalendarEvent {
            date: "2025-11-03".to_string(),
            title: "<b>\"Meetup\"</b>".to_string(),
            kind: EventKind::Workshop,
        }];
        let html = render_month(CalendarCursor::new(2025, 11).unwrap(), &events, date(2025, 11, 3))
            .to_html();

        assert_eq!(html.matches("calendar-day empty").count(), 6);
        assert_eq!(html.matches("class=\"calendar-event\"").count(), 1);
        assert!(html.contains(">&lt;b&gt;\"Meetup\"&lt;/b&gt;</div>"));
        assert!(html.contains("<div class=\"calendar-day today\" data-date=\"2025-11-03\">"));
    }
}
