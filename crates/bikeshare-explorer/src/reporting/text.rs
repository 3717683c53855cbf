//! Plain-text report sections.

use crate::dataset::calendar::{day_name, month_name};
use crate::imputers::{ImputationMethod, ImputationNote};
use crate::stats::{Frequency, NumericSummary, Section, StatSummary};
use std::fmt::{self, Write};

/// Shown in place of a statistic with no defined value.
pub const NOT_APPLICABLE: &str = "not applicable";

/// Line printed after every section.
pub const SEPARATOR: &str = "----------------------------------------";

fn heading(section: Section) -> &'static str {
    match section {
        Section::TimeOfTravel => "Calculating The Most Frequent Times of Travel...",
        Section::Stations => "Calculating The Most Popular Stations and Trip...",
        Section::TripDuration => "Calculating Trip Duration...",
        Section::Users => "Calculating User Stats...",
        Section::GenderDuration => "Calculating Gender-Trip Duration Stats...",
        Section::UserTypeTrips => "Calculating Popular Trips by User Type...",
    }
}

fn popular<T>(freq: &Option<Frequency<T>>, show: impl Fn(&T) -> String) -> String {
    match freq {
        Some(f) => format!("{}, Count: {}", show(&f.value), f.count),
        None => NOT_APPLICABLE.to_string(),
    }
}

fn secs(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2} secs", v),
        None => NOT_APPLICABLE.to_string(),
    }
}

fn year(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.0}", v),
        None => NOT_APPLICABLE.to_string(),
    }
}

fn write_counts(out: &mut String, title: &str, counts: &[Frequency<String>]) -> fmt::Result {
    writeln!(out, "{}:", title)?;
    if counts.is_empty() {
        writeln!(out, "  {}", NOT_APPLICABLE)?;
    }
    for f in counts {
        writeln!(out, "  {:<20} {}", f.value, f.count)?;
    }
    Ok(())
}

fn write_gender_split(out: &mut String, label: &str, stats: &NumericSummary) -> fmt::Result {
    writeln!(out, "{} Stats", label)?;
    writeln!(out, "Total travel time - {}: {}", label, secs(Some(stats.total)))?;
    writeln!(out, "Mean travel time - {}: {}", label, secs(stats.mean))?;
    writeln!(out, "Maximum travel time - {}: {}", label, secs(stats.max))?;
    writeln!(out, "Minimum travel time - {}: {}", label, secs(stats.min))
}

fn write_body(out: &mut String, summary: &StatSummary, section: Section) -> fmt::Result {
    match section {
        Section::TimeOfTravel => {
            let time = &summary.time;
            if let Some(month) = &time.popular_month {
                let name = month_name(month.value).unwrap_or(NOT_APPLICABLE);
                writeln!(out, "The popular month is: {}, Count: {}", name, month.count)?;
            }
            if let Some(day) = &time.popular_day {
                let name = day_name(day.value).unwrap_or(NOT_APPLICABLE);
                writeln!(
                    out,
                    "The popular day of the week is: {}, Count: {}",
                    name, day.count
                )?;
            }
            writeln!(
                out,
                "The popular hour of the day is: {}",
                popular(&time.popular_hour, |h| h.to_string())
            )
        }
        Section::Stations => {
            let stations = &summary.stations;
            writeln!(
                out,
                "The most commonly used start station: {}",
                popular(&stations.popular_start, String::clone)
            )?;
            writeln!(
                out,
                "The most commonly used end station: {}",
                popular(&stations.popular_end, String::clone)
            )?;
            writeln!(
                out,
                "The most frequent combination of start & end station trip: {}",
                popular(&stations.popular_trip, String::clone)
            )
        }
        Section::TripDuration => {
            let duration = &summary.trip_duration.summary;
            writeln!(out, "The total travel time: {}", secs(Some(duration.total)))?;
            writeln!(out, "The average travel time: {}", secs(duration.mean))
        }
        Section::Users => {
            let users = &summary.users;
            write_counts(out, "Counts of user types", &users.user_types)?;
            if let Some(genders) = &users.genders {
                writeln!(out)?;
                write_counts(out, "Counts of gender", genders)?;
            }
            if let Some(years) = &users.birth_years {
                writeln!(out)?;
                writeln!(out, "Earliest year of birth: {}", year(years.earliest))?;
                writeln!(out, "Most recent year of birth: {}", year(years.most_recent))?;
                writeln!(
                    out,
                    "Most common year of birth: {}",
                    popular(&years.most_common, |y| format!("{:.0}", y))
                )?;
            }
            Ok(())
        }
        Section::GenderDuration => match &summary.gender_durations {
            Some(split) => {
                write_gender_split(out, "Male", &split.male)?;
                writeln!(out)?;
                write_gender_split(out, "Female", &split.female)
            }
            None => Ok(()),
        },
        Section::UserTypeTrips => {
            let trips = &summary.user_type_trips;
            writeln!(
                out,
                "The most frequent combination of start & end station trip for subscribers: {}",
                popular(&trips.subscriber, String::clone)
            )?;
            writeln!(
                out,
                "The most frequent combination of start & end station trip for customers: {}",
                popular(&trips.customer, String::clone)
            )
        }
    }
}

/// Render one section, or `None` when the section does not apply to the
/// dataset (gender durations without a gender column).
pub fn render_section(
    summary: &StatSummary,
    section: Section,
) -> Result<Option<String>, fmt::Error> {
    if matches!(section, Section::GenderDuration) && summary.gender_durations.is_none() {
        return Ok(None);
    }

    let mut out = String::new();
    writeln!(out, "\n{}\n", heading(section))?;
    write_body(&mut out, summary, section)?;

    if let Some(elapsed) = summary.timing(section) {
        writeln!(out, "\nThis took {} seconds.", elapsed)?;
    }
    out.push_str(SEPARATOR);
    Ok(Some(out))
}

/// Render every applicable section in order, followed by any caveats.
pub fn render_summary(summary: &StatSummary) -> Result<String, fmt::Error> {
    let mut sections = Vec::with_capacity(Section::ALL.len());
    for &section in Section::ALL.iter() {
        if let Some(text) = render_section(summary, section)? {
            sections.push(text);
        }
    }
    let mut out = sections.join("\n");

    if !summary.caveats.is_empty() {
        writeln!(out, "\n\nNotes:")?;
        for caveat in &summary.caveats {
            writeln!(out, "  - {}", caveat)?;
        }
    }
    Ok(out)
}

/// Describe what the imputation stage did.
pub fn render_imputation(notes: &[ImputationNote]) -> Result<String, fmt::Error> {
    let mut out = String::from("Checked for missing values ...............\n");
    for note in notes {
        writeln!(out, "\nmissing values found in column: {}", note.column)?;
        match &note.method {
            ImputationMethod::BackwardFill => {
                writeln!(
                    out,
                    "we used the backward filling (backfill) method to replace missing values"
                )?;
                if note.unresolved > 0 {
                    writeln!(
                        out,
                        "{} trailing value(s) had nothing to fill from and remain missing",
                        note.unresolved
                    )?;
                }
            }
            ImputationMethod::Placeholder(value) => {
                writeln!(out, "we replaced missing values with '{}'", value)?;
            }
        }
    }
    Ok(out)
}
