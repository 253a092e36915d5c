use chrono::{NaiveDate, Utc};
use clap::Args;
use mindtrain_core::progress::{CalendarCell, DAYS_OF_WEEK};
use mindtrain_core::{InMemoryHistory, MonthView, ValidationError};

#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show as YYYY-MM (default: current month)
    #[arg(long)]
    month: Option<String>,

    /// Emit the cells as JSON instead of a grid
    #[arg(long)]
    json: bool,
}

fn parse_month(input: &str) -> Result<MonthView, ValidationError> {
    let invalid = || ValidationError::InvalidValue {
        field: "month".into(),
        message: format!("expected YYYY-MM, got '{input}'"),
    };
    let (year, month) = input.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    MonthView::new(year, month)
}

fn render(view: &MonthView, today: NaiveDate, cells: &[CalendarCell]) -> String {
    let mut out = format!("{}\n", view.title());
    out.push_str(&DAYS_OF_WEEK.map(|d| format!("{d:>4}")).concat());
    for (i, cell) in cells.iter().enumerate() {
        if i % 7 == 0 {
            out.push('\n');
        }
        let text = match cell {
            CalendarCell::Blank => String::new(),
            CalendarCell::Day(d) if d.is_completed => format!("{}*", d.day),
            CalendarCell::Day(d) if d.date == today => format!("[{}]", d.day),
            CalendarCell::Day(d) => d.day.to_string(),
        };
        out.push_str(&format!("{text:>4}"));
    }
    out.push('\n');
    out
}

pub fn run(args: CalendarArgs) -> Result<(), Box<dyn std::error::Error>> {
    let today = Utc::now().date_naive();
    let view = match args.month.as_deref() {
        Some(m) => parse_month(m)?,
        None => MonthView::containing(today),
    };
    let history = InMemoryHistory::new();
    let cells = view.cells(today, &history.completed_days());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cells)?);
    } else {
        print!("{}", render(&view, today, &cells));
    }
    Ok(())
}
