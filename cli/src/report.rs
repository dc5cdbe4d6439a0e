use fitlog_core::{DailyHealthRecord, DailyNutrition, Meal, MonthlySummary, WeeklySummary};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct WeekRow {
    #[tabled(rename = "Week ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: u32,
    #[tabled(rename = "Days")]
    days: String,
    #[tabled(rename = "Total Days")]
    total_days: u32,
    #[tabled(rename = "Healthy Days")]
    healthy_days: usize,
    #[tabled(rename = "Days with Nutr.")]
    nutrition_days: usize,
    #[tabled(rename = "Avg Fat")]
    avg_fat: String,
    #[tabled(rename = "Fat by Kg")]
    fat_per_kg: String,
    #[tabled(rename = "Avg Sat.F")]
    avg_saturated_fat: String,
    #[tabled(rename = "Avg Fiber")]
    avg_fiber: String,
    #[tabled(rename = "Avg Prot")]
    avg_protein: String,
    #[tabled(rename = "Prot by Kg")]
    protein_per_kg: String,
    #[tabled(rename = "Avg Carbs")]
    avg_carbohydrate: String,
    #[tabled(rename = "Avg Sug")]
    avg_sugar: String,
    #[tabled(rename = "Tot Exer.")]
    total_exercise: u64,
    #[tabled(rename = "Avg Exer")]
    avg_exercise: String,
    #[tabled(rename = "Avg Weight")]
    avg_weight: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month ID")]
    id: String,
    #[tabled(rename = "Total Days")]
    total_days: u32,
    #[tabled(rename = "Healthy Days")]
    healthy_days: usize,
    #[tabled(rename = "Days with Nutr.")]
    nutrition_days: usize,
    #[tabled(rename = "Avg Fat")]
    avg_fat: String,
    #[tabled(rename = "Fat by Kg")]
    fat_per_kg: String,
    #[tabled(rename = "Avg Prot")]
    avg_protein: String,
    #[tabled(rename = "Prot by Kg")]
    protein_per_kg: String,
    #[tabled(rename = "Avg Carbs")]
    avg_carbohydrate: String,
    #[tabled(rename = "Tot Exer.")]
    total_exercise: u64,
    #[tabled(rename = "Avg Exer")]
    avg_exercise: String,
    #[tabled(rename = "Avg Weight")]
    avg_weight: String,
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Week")]
    week: String,
    #[tabled(rename = "Nutr.")]
    consumed: String,
    #[tabled(rename = "Meals")]
    meals: String,
    #[tabled(rename = "Fat")]
    fat: String,
    #[tabled(rename = "Prot")]
    protein: String,
    #[tabled(rename = "Carbs")]
    carbohydrate: String,
    #[tabled(rename = "Kcal")]
    calories: String,
    #[tabled(rename = "Exer.")]
    exercise: u64,
    #[tabled(rename = "Weight")]
    weight: String,
}

/// Initials of the meals that were eaten, `-` for none.
fn eaten_meals(nutrition: &DailyNutrition) -> String {
    let initials: String = Meal::ALL
        .into_iter()
        .filter(|m| nutrition.meal(*m).consumed)
        .map(|m| m.initial())
        .collect();
    if initials.is_empty() {
        "-".to_string()
    } else {
        initials
    }
}

fn num(value: f64) -> String {
    format!("{:.2}", value)
}

fn finish(mut table: Table, color: bool) -> String {
    table.with(Style::modern());
    if color {
        table.with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    }
    table.to_string()
}

pub fn render_weeks(weeks: &[WeeklySummary], color: bool) -> String {
    let rows = weeks.iter().map(|w| {
        let s = &w.stats;
        WeekRow {
            id: w.id.clone(),
            month: w.month,
            days: w.days_range.clone(),
            total_days: w.covered_days,
            healthy_days: s.day_count,
            nutrition_days: s.nutrition_day_count,
            avg_fat: num(s.avg_fat),
            fat_per_kg: num(s.fat_per_kg),
            avg_saturated_fat: num(s.avg_saturated_fat),
            avg_fiber: num(s.avg_fiber),
            avg_protein: num(s.avg_protein),
            protein_per_kg: num(s.protein_per_kg),
            avg_carbohydrate: num(s.avg_carbohydrate),
            avg_sugar: num(s.avg_sugar),
            total_exercise: s.total_exercise,
            avg_exercise: num(s.avg_exercise),
            avg_weight: num(s.avg_weight),
        }
    });
    finish(Table::new(rows), color)
}

pub fn render_months(months: &[MonthlySummary], color: bool) -> String {
    let rows = months.iter().map(|m| {
        let s = &m.stats;
        MonthRow {
            id: m.id.clone(),
            total_days: m.covered_days,
            healthy_days: s.day_count,
            nutrition_days: s.nutrition_day_count,
            avg_fat: num(s.avg_fat),
            fat_per_kg: num(s.fat_per_kg),
            avg_protein: num(s.avg_protein),
            protein_per_kg: num(s.protein_per_kg),
            avg_carbohydrate: num(s.avg_carbohydrate),
            total_exercise: s.total_exercise,
            avg_exercise: num(s.avg_exercise),
            avg_weight: num(s.avg_weight),
        }
    });
    finish(Table::new(rows), color)
}

pub fn render_days(days: &[DailyHealthRecord], color: bool) -> String {
    let rows = days.iter().map(|d| {
        let n = &d.nutrition;
        DayRow {
            date: d.date.format("%Y-%m-%d (%a)").to_string(),
            week: d.week().to_string(),
            consumed: if n.consumed { "yes" } else { "-" }.to_string(),
            meals: eaten_meals(n),
            fat: format!("{:.1}", n.total_fat),
            protein: format!("{:.1}", n.total_protein),
            carbohydrate: format!("{:.1}", n.total_carbohydrate),
            calories: format!("{:.0}", n.total_calories),
            exercise: d.exercise_minutes,
            weight: if d.has_weight() {
                format!("{:.1}", d.weight)
            } else {
                "-".to_string()
            },
        }
    });
    finish(Table::new(rows), color)
}
