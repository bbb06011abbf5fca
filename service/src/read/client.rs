//! [`Client`]-related read definitions.

#[cfg(doc)]
use crate::domain::Client;

pub mod search {
    //! [`Client`] search definitions.

    use crate::domain::Client;

    /// Criteria of a [`Client`] search.
    #[derive(Clone, Debug, Default)]
    pub struct Criteria {
        /// Free-text query matched against [`Client`]'s name, email and
        /// phone.
        pub text: Option<String>,
    }

    impl Criteria {
        /// Returns the [`Client`]s out of the provided `records` matching
        /// these [`Criteria`], in their original order.
        ///
        /// Name and email are matched ignoring case, while phone is matched
        /// verbatim.
        #[must_use]
        pub fn apply(&self, records: &[Client]) -> Vec<Client> {
            let Some(query) =
                self.text.as_deref().map(str::trim).filter(|q| !q.is_empty())
            else {
                return records.to_vec();
            };
            let lowered = query.to_lowercase();

            records
                .iter()
                .filter(|c| {
                    let name: &str = c.name.as_ref();
                    let email: &str = c.email.as_ref();
                    let phone: &str = c.phone.as_ref();

                    name.to_lowercase().contains(&lowered)
                        || email.to_lowercase().contains(&lowered)
                        || phone.contains(query)
                })
                .cloned()
                .collect()
        }
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    //! [`Client`] fixtures for tests.

    use common::DateTime;

    use crate::domain::{client, Client};

    /// Creates a [`client::Draft`] of an active client.
    pub(crate) fn draft(name: &str, email: &str, phone: &str) -> client::Draft {
        client::Draft {
            name: client::Name::new(name).unwrap(),
            email: client::Email::new(email).unwrap(),
            phone: client::Phone::new(phone).unwrap(),
            status: client::Status::Active,
            interested_properties: vec![],
        }
    }

    /// Creates a [`Client`] with the provided `id`.
    pub(crate) fn client(
        id: u32,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Client {
        Client::new(
            id.into(),
            draft(name, email, phone),
            DateTime::now().coerce(),
        )
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::Client;

    use super::{fixture::client, search::Criteria};

    fn sample() -> Vec<Client> {
        vec![
            client(1, "Jane Doe", "jane@example.com", "+1 555 0100"),
            client(2, "John Smith", "JOHN@corp.test", "555-0199"),
            client(3, "Ann Lee", "ann@lee.test", "(555) 0142"),
        ]
    }

    fn search(q: Option<&str>) -> Vec<u32> {
        Criteria {
            text: q.map(Into::into),
        }
        .apply(&sample())
        .into_iter()
        .map(|c| c.id.into())
        .collect()
    }

    #[test]
    fn returns_all_without_query() {
        assert_eq!(search(None), [1, 2, 3]);
        assert_eq!(search(Some("  ")), [1, 2, 3]);
    }

    #[test]
    fn matches_name_and_email_ignoring_case() {
        assert_eq!(search(Some("JANE")), [1]);
        assert_eq!(search(Some("john@corp")), [2]);
        assert_eq!(search(Some(".test")), [2, 3]);
    }

    #[test]
    fn matches_phone_verbatim() {
        assert_eq!(search(Some("0199")), [2]);
        assert_eq!(search(Some("(555)")), [3]);
        assert_eq!(search(Some("555")), [1, 2, 3]);
    }
}
