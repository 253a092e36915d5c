use chrono::Utc;
use mindtrain_core::{InMemoryHistory, WeeklyStats};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    // History lives for one process only, so a fresh invocation starts empty.
    let history = InMemoryHistory::new();
    let stats = WeeklyStats::from_history(&history, Utc::now().date_naive());
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
