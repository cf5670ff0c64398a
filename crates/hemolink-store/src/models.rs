//! Domain model structs persisted in the local store.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be persisted
//! as JSON and handed directly to a UI layer. Field names are serialized in
//! camelCase to match the documents the original web client wrote.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Role & blood group
// ---------------------------------------------------------------------------

/// Account role. Immutable after creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Donor,
    Admin,
}

/// The eight ABO/Rh blood groups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

// ---------------------------------------------------------------------------
// Person
// ---------------------------------------------------------------------------

/// A donor or admin account record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique identifier: a numeric string derived from creation time,
    /// strictly increasing across creations in one process.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address, unique case-insensitively across all roles.
    pub email: String,
    /// One-way password digest (lowercase hex), or empty if no password was
    /// ever supplied.
    pub password: String,
    pub role: Role,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub blood_group: BloodGroup,
    /// Date of the most recent donation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_donation_date: Option<NaiveDate>,
    /// Admin-approval flag. Donors cannot log in until an admin sets this.
    pub is_verified: bool,
    /// Whether contact details are shown to other users.
    pub contact_visible: bool,
    pub is_phone_verified: bool,
}

/// Payload for creating a [`Person`]. The store assigns the id and digests
/// the password.
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub email: String,
    /// Plaintext password; digested before storage. `None` stores an empty
    /// digest.
    pub password: Option<String>,
    pub role: Role,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub blood_group: BloodGroup,
    pub last_donation_date: Option<NaiveDate>,
    pub is_verified: bool,
    pub contact_visible: bool,
    pub is_phone_verified: bool,
}

/// Partial update payload for [`Person`]. Email and role are deliberately
/// absent: they are immutable through the update path.
#[derive(Debug, Clone, Default)]
pub struct PersonUpdate {
    pub name: Option<String>,
    /// New plaintext password; digested before storage. `None` preserves the
    /// stored digest unchanged.
    pub password: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub last_donation_date: Option<Option<NaiveDate>>,
    pub is_verified: Option<bool>,
    pub contact_visible: Option<bool>,
    pub is_phone_verified: Option<bool>,
}

/// Filter for the donor search. Empty filter matches every verified donor.
#[derive(Debug, Clone, Default)]
pub struct DonorFilter {
    /// Exact blood group match.
    pub blood_group: Option<BloodGroup>,
    /// Case-insensitive substring match on city.
    pub city: Option<String>,
    /// Case-insensitive substring match on country.
    pub country: Option<String>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A directed text message between two [`Person`]s.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier; numeric string derived from creation time, so it
    /// doubles as a total order key.
    pub id: String,
    /// Sender's person id.
    pub from: String,
    /// Recipient's person id.
    pub to: String,
    /// Body text.
    pub message: String,
    /// Creation time as epoch milliseconds.
    pub timestamp: i64,
    /// Whether the recipient has read the message. Flips false to true only.
    pub is_read: bool,
}

// ---------------------------------------------------------------------------
// Conversation (derived)
// ---------------------------------------------------------------------------

/// Summary of all messages between one user and one counterpart.
///
/// Derived on every query; never persisted and never cached.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// The counterpart's account record.
    pub other_user: Person,
    /// The most recent message exchanged with the counterpart.
    pub last_message: Message,
    /// Count of unread messages addressed to the querying user.
    pub unread_count: usize,
}
