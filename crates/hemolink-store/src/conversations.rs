//! Per-counterpart conversation aggregation.
//!
//! A [`Conversation`] is derived state: the counterpart's record, the most
//! recent message exchanged with them, and how many of their messages the
//! querying user has not read. The whole list is recomputed on every call;
//! nothing here is cached or persisted.

use std::collections::HashMap;

use crate::database::{numeric_id, Database};
use crate::error::Result;
use crate::models::{Conversation, Message};

impl Database {
    /// Build the conversation list for `user`, ordered most-recent first.
    ///
    /// Groups whose counterpart no longer resolves to a person (deleted
    /// account) are dropped rather than reported as errors. Last-message
    /// selection orders by timestamp with the id as tie-break, which equals
    /// creation order since ids increase monotonically.
    pub fn conversations_for(&self, user: &str) -> Result<Vec<Conversation>> {
        let messages = self.list_messages()?;

        let mut by_counterpart: HashMap<String, Vec<Message>> = HashMap::new();
        for m in messages {
            let other = if m.from == user {
                &m.to
            } else if m.to == user {
                &m.from
            } else {
                continue;
            };
            by_counterpart.entry(other.clone()).or_default().push(m);
        }

        let mut conversations = Vec::with_capacity(by_counterpart.len());
        for (other_id, mut group) in by_counterpart {
            let Some(other_user) = self.get_person(&other_id)? else {
                continue;
            };

            group.sort_by_key(|m| std::cmp::Reverse((m.timestamp, numeric_id(&m.id))));
            let unread_count = group.iter().filter(|m| m.to == user && !m.is_read).count();
            // The group is never empty: it only exists because a message put
            // it there.
            let Some(last_message) = group.into_iter().next() else {
                continue;
            };

            conversations.push(Conversation {
                other_user,
                last_message,
                unread_count,
            });
        }

        conversations.sort_by_key(|c| {
            std::cmp::Reverse((c.last_message.timestamp, numeric_id(&c.last_message.id)))
        });
        Ok(conversations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodGroup, NewPerson, Role};

    fn person(db: &Database, name: &str) -> String {
        db.create_person(NewPerson {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password: None,
            role: Role::Donor,
            phone: String::new(),
            city: String::new(),
            country: String::new(),
            blood_group: BloodGroup::OPositive,
            last_donation_date: None,
            is_verified: true,
            contact_visible: true,
            is_phone_verified: true,
        })
        .unwrap()
        .id
    }

    #[test]
    fn empty_store_yields_no_conversations() {
        let db = Database::in_memory();
        let me = person(&db, "Me");
        assert!(db.conversations_for(&me).unwrap().is_empty());
    }

    #[test]
    fn most_recent_counterpart_sorts_first() {
        let db = Database::in_memory();
        let me = person(&db, "Me");
        let x = person(&db, "X");
        let y = person(&db, "Y");

        db.send_message(&me, &x, "to x").unwrap();
        db.send_message(&y, &me, "from y").unwrap();

        let conversations = db.conversations_for(&me).unwrap();
        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].other_user.id, y);
        assert_eq!(conversations[1].other_user.id, x);
    }

    #[test]
    fn last_message_is_newest_in_group() {
        let db = Database::in_memory();
        let me = person(&db, "Me");
        let x = person(&db, "X");

        db.send_message(&me, &x, "first").unwrap();
        let newest = db.send_message(&x, &me, "second").unwrap();

        let conversations = db.conversations_for(&me).unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].last_message, newest);
    }

    #[test]
    fn unread_count_excludes_own_messages() {
        let db = Database::in_memory();
        let me = person(&db, "Me");
        let x = person(&db, "X");

        db.send_message(&x, &me, "one").unwrap();
        db.send_message(&x, &me, "two").unwrap();
        db.send_message(&me, &x, "mine, unread by X").unwrap();

        let conversations = db.conversations_for(&me).unwrap();
        assert_eq!(conversations[0].unread_count, 2);

        db.mark_read(&x, &me).unwrap();
        let conversations = db.conversations_for(&me).unwrap();
        assert_eq!(conversations[0].unread_count, 0);
    }

    #[test]
    fn deleted_counterpart_drops_the_group() {
        let db = Database::in_memory();
        let me = person(&db, "Me");
        let x = person(&db, "X");
        let y = person(&db, "Y");

        db.send_message(&x, &me, "hello").unwrap();
        db.send_message(&y, &me, "hi").unwrap();
        db.delete_person(&x).unwrap();

        let conversations = db.conversations_for(&me).unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].other_user.id, y);
    }

    #[test]
    fn uninvolved_messages_are_ignored() {
        let db = Database::in_memory();
        let me = person(&db, "Me");
        let x = person(&db, "X");
        let y = person(&db, "Y");

        db.send_message(&x, &y, "not mine").unwrap();
        assert!(db.conversations_for(&me).unwrap().is_empty());
    }
}
