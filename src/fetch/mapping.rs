//! Profile → scorer input mapping. Pure transform, no I/O.

use chrono::Datelike;

use super::profile::{Education, Experience, LinkedInProfile};
use crate::score::{ScoreInput, StudiedAt, WorkedAt};

/// Map a fetched profile into the shape the scorer expects.
pub fn map_score_input(profile: &LinkedInProfile) -> ScoreInput {
    let current_year = chrono::Utc::now().year();

    let worked_at = profile
        .experiences
        .iter()
        .map(|exp| map_experience(exp, profile, current_year))
        .collect();

    let studied_at = profile.educations.iter().map(map_education).collect();

    ScoreInput {
        username: profile.public_id.clone(),
        connections: profile.connection_count,
        worked_at,
        studied_at,
    }
}

fn map_experience(exp: &Experience, profile: &LinkedInProfile, current_year: i32) -> WorkedAt {
    let start = match (exp.start_year, exp.start_month) {
        (Some(year), Some(month)) => Some(format!("{year}-{month:02}-01")),
        (Some(year), None) => Some(format!("{year}-01-01")),
        _ => None,
    };

    // Current positions have no end date; otherwise fall back to year-end
    // when only the year is known.
    let end = if exp.is_current {
        None
    } else {
        match (exp.end_year, exp.end_month) {
            (Some(year), Some(month)) => Some(format!("{year}-{month:02}-01")),
            (Some(year), None) => Some(format!("{year}-12-31")),
            _ => None,
        }
    };

    let years = exp
        .start_year
        .map(|start_year| exp.end_year.unwrap_or(current_year) - start_year)
        .unwrap_or(0);

    // Employee range and industry are only known for the profile's current
    // company.
    let staff_count_range = profile.company_employee_range.clone().unwrap_or_default();
    let company_industry = if profile.company.as_deref() == Some(exp.company.as_str()) {
        profile.company_industry.clone().unwrap_or_default()
    } else {
        String::new()
    };

    WorkedAt {
        company_name: exp.company.clone(),
        staff_count_range,
        company_industry,
        title: exp.title.clone(),
        start,
        end,
        years,
    }
}

fn map_education(edu: &Education) -> StudiedAt {
    let start = match (edu.start_year, edu.start_month.as_deref()) {
        (Some(year), Some(month)) => Some(format!("{year}-{month}-01")),
        (Some(year), None) => Some(format!("{year}-09-01")),
        _ => None,
    };

    let end = match (edu.end_year, edu.end_month.as_deref()) {
        (Some(year), Some(month)) => Some(format!("{year}-{month}-01")),
        (Some(year), None) => Some(format!("{year}-06-30")),
        _ => None,
    };

    StudiedAt {
        school_name: edu.school.clone(),
        degree_level: edu.degree.clone(),
        field_of_study: edu.field_of_study.clone(),
        start,
        end,
    }
}
