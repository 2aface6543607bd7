use chrono::{DateTime, Local};
use foodlog_core::content::group_by_muscle_group;
use foodlog_core::model::place::Place;
use foodlog_core::model::workout::Workout;
use foodlog_core::{DayKey, FoodRecord, IntakeSummary};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

const BAR_WIDTH: usize = 30;

#[derive(Tabled)]
struct FoodRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Food")]
    name: String,
    #[tabled(rename = "kcal")]
    calories: String,
    #[tabled(rename = "ID")]
    id: String,
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "kcal")]
    total: String,
    #[tabled(rename = "Goal")]
    ratio: String,
}

#[derive(Tabled)]
struct WorkoutRow {
    #[tabled(rename = "Workout")]
    name: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
    #[tabled(rename = "Per week")]
    per_week: u32,
    #[tabled(rename = "Minutes")]
    minutes: u32,
    #[tabled(rename = "kcal")]
    calories: String,
    #[tabled(rename = "About")]
    about: String,
}

#[derive(Tabled)]
struct PlaceRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Place")]
    name: String,
    #[tabled(rename = "Lat")]
    latitude: String,
    #[tabled(rename = "Lon")]
    longitude: String,
}

fn styled<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

/// Text gauge. The bar is capped at full; the percentage is not.
pub fn progress_line(summary: &IntakeSummary) -> String {
    let filled = (summary.ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "{:.0}/{:.0} kcal [{}{}] {:.1}%",
        summary.total,
        summary.goal,
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        summary.ratio * 100.0
    )
}

pub fn show_day(day: DayKey, records: &[FoodRecord], summary: &IntakeSummary) {
    println!("\x1b[1;36m{}\x1b[0m", day);
    if records.is_empty() {
        println!("No food logged.");
    } else {
        let rows = records
            .iter()
            .map(|r| {
                let local: DateTime<Local> = DateTime::from(r.timestamp);
                FoodRow {
                    time: local.format("%d.%m.%Y %H:%M").to_string(),
                    name: r.name.clone(),
                    calories: format!("{:.0}", r.calories),
                    id: r.id.to_string()[..8].to_string(),
                }
            })
            .collect();
        println!("{}", styled::<FoodRow>(rows));
    }
    println!("{}", progress_line(summary));
}

pub fn show_history(history: &[(DayKey, IntakeSummary)]) {
    if history.is_empty() {
        println!("No food logged yet.");
        return;
    }
    let rows = history
        .iter()
        .map(|(day, s)| DayRow {
            day: day.to_string(),
            entries: s.entries,
            total: format!("{:.0}", s.total),
            ratio: format!("{:.1}%", s.ratio * 100.0),
        })
        .collect();
    println!("{}", styled::<DayRow>(rows));
}

fn difficulty_bolts(level: u8) -> String {
    let filled = usize::from(level.min(3));
    format!("{}{}", "#".repeat(filled), ".".repeat(3 - filled))
}

pub fn show_workouts(workouts: &[Workout]) {
    if workouts.is_empty() {
        println!("No workouts found.");
        return;
    }
    for (group, items) in group_by_muscle_group(workouts) {
        println!("\n\x1b[1;36m{}\x1b[0m", group.to_uppercase());
        let rows = items
            .iter()
            .map(|w| WorkoutRow {
                name: if w.is_favorite {
                    format!("* {}", w.name)
                } else {
                    w.name.clone()
                },
                difficulty: difficulty_bolts(w.difficulty().level()),
                per_week: w.workouts_per_week,
                minutes: w.estimated_duration,
                calories: w
                    .estimated_calories_burned
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                about: w.description_preview(40),
            })
            .collect();
        println!("{}", styled::<WorkoutRow>(rows));
    }
}

pub fn show_places(places: &[Place]) {
    if places.is_empty() {
        println!("No places found.");
        return;
    }
    let rows = places
        .iter()
        .map(|p| PlaceRow {
            category: p.category.clone(),
            name: p.name.clone(),
            latitude: format!("{:.5}", p.latitude),
            longitude: format!("{:.5}", p.longitude),
        })
        .collect();
    println!("{}", styled::<PlaceRow>(rows));
}
