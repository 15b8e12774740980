//! Serde models for the RapidAPI profile payload.
//!
//! The API omits most fields for sparse profiles, so everything defaults.

use serde::{Deserialize, Serialize};

/// An education entry. Month values come back as free-form strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_month: Option<String>,
    pub start_year: Option<i32>,
    pub end_month: Option<String>,
    pub end_year: Option<i32>,
    pub date_range: String,
    pub school_linkedin_url: Option<String>,
}

/// A work experience entry. Months are numeric here, unlike educations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub title: String,
    pub start_month: Option<u32>,
    pub start_year: Option<i32>,
    pub end_month: Option<u32>,
    pub end_year: Option<i32>,
    pub duration: String,
    pub is_current: bool,
    pub location: Option<String>,
    pub description: Option<String>,
    pub company_linkedin_url: Option<String>,
}

/// Profile returned by the fetcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedInProfile {
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub headline: String,
    pub about: Option<String>,

    pub job_title: Option<String>,
    pub company: Option<String>,
    pub company_domain: Option<String>,
    pub company_employee_count: Option<u32>,
    pub company_employee_range: Option<String>,
    pub company_industry: Option<String>,
    pub company_website: Option<String>,

    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,

    pub connection_count: u32,
    pub follower_count: Option<u32>,

    pub educations: Vec<Education>,
    pub experiences: Vec<Experience>,

    pub linkedin_url: String,
    pub profile_image_url: Option<String>,
    pub is_premium: bool,
    pub is_verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_payload_deserializes_with_defaults() {
        let profile: LinkedInProfile = serde_json::from_str(
            r#"{"public_id": "johndoe", "connection_count": 150}"#,
        )
        .unwrap();
        assert_eq!(profile.public_id, "johndoe");
        assert_eq!(profile.connection_count, 150);
        assert!(profile.experiences.is_empty());
        assert!(profile.company.is_none());
        assert!(!profile.is_premium);
    }

    #[test]
    fn experience_months_are_numeric() {
        let exp: Experience = serde_json::from_str(
            r#"{"company": "Acme", "title": "Engineer", "start_month": 3, "start_year": 2019, "is_current": true}"#,
        )
        .unwrap();
        assert_eq!(exp.start_month, Some(3));
        assert!(exp.is_current);
        assert!(exp.end_year.is_none());
    }
}
