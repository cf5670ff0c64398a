//! CRUD operations for [`Person`] records.
//!
//! Donors and admins live in one persisted collection partitioned only by
//! the `role` field. Email and role are immutable after creation: the update
//! payload has no such fields, so there is a single code path enforcing
//! both.

use crate::database::{numeric_id, Database, PEOPLE_KEY};
use crate::digest::digest;
use crate::error::{Result, StoreError};
use crate::models::{DonorFilter, NewPerson, Person, PersonUpdate, Role};

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new person, assigning its id and digesting the password.
    ///
    /// Email uniqueness is the caller's responsibility (the auth layer
    /// checks before registering); the store itself appends unconditionally.
    pub fn create_person(&self, new: NewPerson) -> Result<Person> {
        let person = Person {
            id: self.next_id(),
            name: new.name,
            email: new.email,
            password: new.password.as_deref().map(digest).unwrap_or_default(),
            role: new.role,
            phone: new.phone,
            city: new.city,
            country: new.country,
            blood_group: new.blood_group,
            last_donation_date: new.last_donation_date,
            is_verified: new.is_verified,
            contact_visible: new.contact_visible,
            is_phone_verified: new.is_phone_verified,
        };

        let mut people: Vec<Person> = self.read_collection(PEOPLE_KEY)?;
        people.push(person.clone());
        self.write_collection(PEOPLE_KEY, &people)?;

        tracing::debug!(id = %person.id, role = ?person.role, "created person");
        Ok(person)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// List all people, optionally restricted to one role, sorted ascending
    /// by numeric id (creation order).
    pub fn list_people(&self, role: Option<Role>) -> Result<Vec<Person>> {
        let mut people: Vec<Person> = self.read_collection(PEOPLE_KEY)?;
        if let Some(role) = role {
            people.retain(|p| p.role == role);
        }
        people.sort_by_key(|p| numeric_id(&p.id));
        Ok(people)
    }

    /// Look up a person by id. Absence is not an error.
    pub fn get_person(&self, id: &str) -> Result<Option<Person>> {
        let people: Vec<Person> = self.read_collection(PEOPLE_KEY)?;
        Ok(people.into_iter().find(|p| p.id == id))
    }

    /// Look up a person by email, case-insensitively. Absence is not an
    /// error.
    pub fn get_person_by_email(&self, email: &str) -> Result<Option<Person>> {
        let people: Vec<Person> = self.read_collection(PEOPLE_KEY)?;
        Ok(people
            .into_iter()
            .find(|p| p.email.eq_ignore_ascii_case(email)))
    }

    /// List verified donors matching `filter`, sorted by id.
    ///
    /// Blood group matches exactly; city and country match as
    /// case-insensitive substrings.
    pub fn search_donors(&self, filter: &DonorFilter) -> Result<Vec<Person>> {
        let mut donors = self.list_people(Some(Role::Donor))?;
        donors.retain(|p| p.is_verified);

        if let Some(group) = filter.blood_group {
            donors.retain(|p| p.blood_group == group);
        }
        if let Some(city) = &filter.city {
            let needle = city.to_lowercase();
            donors.retain(|p| p.city.to_lowercase().contains(&needle));
        }
        if let Some(country) = &filter.country {
            let needle = country.to_lowercase();
            donors.retain(|p| p.country.to_lowercase().contains(&needle));
        }
        Ok(donors)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Apply a partial update to the person with `id`.
    ///
    /// Fails with [`StoreError::NotFound`] if no such record exists; never
    /// creates one. A supplied plaintext password is re-digested before
    /// storage, an omitted one preserves the stored digest. Returns the
    /// merged record.
    pub fn update_person(&self, id: &str, update: PersonUpdate) -> Result<Person> {
        let mut people: Vec<Person> = self.read_collection(PEOPLE_KEY)?;
        let person = people
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(name) = update.name {
            person.name = name;
        }
        if let Some(plaintext) = update.password {
            person.password = digest(&plaintext);
        }
        if let Some(phone) = update.phone {
            person.phone = phone;
        }
        if let Some(city) = update.city {
            person.city = city;
        }
        if let Some(country) = update.country {
            person.country = country;
        }
        if let Some(group) = update.blood_group {
            person.blood_group = group;
        }
        if let Some(date) = update.last_donation_date {
            person.last_donation_date = date;
        }
        if let Some(verified) = update.is_verified {
            person.is_verified = verified;
        }
        if let Some(visible) = update.contact_visible {
            person.contact_visible = visible;
        }
        if let Some(phone_verified) = update.is_phone_verified {
            person.is_phone_verified = phone_verified;
        }

        let updated = person.clone();
        self.write_collection(PEOPLE_KEY, &people)?;

        tracing::debug!(id = %updated.id, "updated person");
        Ok(updated)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a person by id. Silently does nothing when absent.
    pub fn delete_person(&self, id: &str) -> Result<()> {
        let mut people: Vec<Person> = self.read_collection(PEOPLE_KEY)?;
        let before = people.len();
        people.retain(|p| p.id != id);

        if people.len() != before {
            self.write_collection(PEOPLE_KEY, &people)?;
            tracing::debug!(id, "deleted person");
        }
        Ok(())
    }
}
