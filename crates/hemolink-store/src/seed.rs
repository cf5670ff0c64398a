//! Demo fixtures.
//!
//! The original deployment shipped a handful of donors and one admin so the
//! application is usable straight away. [`seed_demo_data`] recreates them,
//! but only into a store that has no people yet; an already-populated store
//! is left untouched.

use chrono::NaiveDate;

use crate::database::Database;
use crate::error::Result;
use crate::models::{BloodGroup, NewPerson, Role};

/// Donor passwords in the demo fixtures.
pub const DEMO_DONOR_PASSWORD: &str = "123";
/// Admin password in the demo fixtures.
pub const DEMO_ADMIN_PASSWORD: &str = "admin";

/// Populate an empty store with the demo donors and admin.
///
/// Returns `true` if fixtures were inserted, `false` if the store already
/// had people.
pub fn seed_demo_data(db: &Database) -> Result<bool> {
    if !db.list_people(None)?.is_empty() {
        return Ok(false);
    }

    for person in fixtures() {
        db.create_person(person)?;
    }

    tracing::info!("seeded demo data");
    Ok(true)
}

fn fixtures() -> Vec<NewPerson> {
    let donor = |name: &str,
                 email: &str,
                 phone: &str,
                 city: &str,
                 country: &str,
                 blood_group: BloodGroup,
                 last_donation: Option<(i32, u32, u32)>,
                 is_verified: bool,
                 contact_visible: bool| NewPerson {
        name: name.to_string(),
        email: email.to_string(),
        password: Some(DEMO_DONOR_PASSWORD.to_string()),
        role: Role::Donor,
        phone: phone.to_string(),
        city: city.to_string(),
        country: country.to_string(),
        blood_group,
        last_donation_date: last_donation.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        is_verified,
        contact_visible,
        is_phone_verified: true,
    };

    vec![
        donor(
            "John Doe",
            "john.doe@example.com",
            "123-456-7890",
            "New York",
            "USA",
            BloodGroup::APositive,
            Some((2023, 10, 15)),
            true,
            true,
        ),
        donor(
            "Jane Smith",
            "jane.smith@example.com",
            "234-567-8901",
            "London",
            "UK",
            BloodGroup::ONegative,
            None,
            true,
            true,
        ),
        donor(
            "Peter Jones",
            "peter.jones@example.com",
            "345-678-9012",
            "New York",
            "USA",
            BloodGroup::BPositive,
            Some((2024, 5, 15)),
            true,
            false,
        ),
        donor(
            "Mary Williams",
            "mary.williams@example.com",
            "456-789-0123",
            "Sydney",
            "Australia",
            BloodGroup::APositive,
            Some((2024, 1, 20)),
            false,
            true,
        ),
        donor(
            "David Lee",
            "david.lee@example.com",
            "567-890-1234",
            "Toronto",
            "Canada",
            BloodGroup::AbPositive,
            Some((2023, 1, 1)),
            true,
            true,
        ),
        NewPerson {
            name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            password: Some(DEMO_ADMIN_PASSWORD.to_string()),
            role: Role::Admin,
            phone: "555-555-5555".to_string(),
            city: "AdminCity".to_string(),
            country: "AdminCountry".to_string(),
            blood_group: BloodGroup::AbPositive,
            last_donation_date: None,
            is_verified: true,
            contact_visible: false,
            is_phone_verified: true,
        },
    ]
}
