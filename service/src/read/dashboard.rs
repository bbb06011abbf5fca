//! [`Stats`] definitions.

use common::{Amount, Percent};

use crate::domain::{property, Client, Property};

/// Summary of the agency activity.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stats {
    /// Total number of [`Property`] listings.
    pub total_listings: usize,

    /// Number of [`property::Status::Available`] [`Property`] listings.
    pub available_listings: usize,

    /// Total number of [`Client`]s.
    pub total_clients: usize,

    /// Commission earned on [`property::Status::Sold`] [`Property`]s.
    pub revenue: Amount,

    /// Most recent [`Property`] listings, in store order.
    pub recent: Vec<Property>,
}

impl Stats {
    /// Computes [`Stats`] out of the provided records.
    #[must_use]
    pub fn new(
        properties: &[Property],
        clients: &[Client],
        commission: Percent,
        recent_limit: usize,
    ) -> Self {
        let sold = properties
            .iter()
            .filter(|p| p.status == property::Status::Sold)
            .map(|p| p.price)
            .sum();

        Self {
            total_listings: properties.len(),
            available_listings: properties
                .iter()
                .filter(|p| p.status == property::Status::Available)
                .count(),
            total_clients: clients.len(),
            revenue: commission.of(sold),
            recent: properties.iter().take(recent_limit).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{Amount, Percent};

    use crate::{
        domain::property,
        read::{client::fixture::client, property::fixture::property},
    };

    use super::Stats;

    #[test]
    fn summarizes_records() {
        let mut properties = (1..=6)
            .map(|id| property(id, 100_000 * id, i64::from(id)))
            .collect::<Vec<_>>();
        properties[1].status = property::Status::Sold;
        properties[3].status = property::Status::Sold;
        properties[4].status = property::Status::Pending;
        let clients =
            vec![client(1, "Jane Doe", "jane@example.com", "555 0100")];

        let stats = Stats::new(
            &properties,
            &clients,
            Percent::from_str("3").unwrap(),
            4,
        );

        assert_eq!(stats.total_listings, 6);
        assert_eq!(stats.available_listings, 3);
        assert_eq!(stats.total_clients, 1);
        assert_eq!(stats.revenue, Amount::from(18_000));
        assert_eq!(
            stats.recent.iter().map(|p| u32::from(p.id)).collect::<Vec<_>>(),
            [1, 2, 3, 4],
        );
    }

    #[test]
    fn handles_empty_store() {
        let stats = Stats::new(&[], &[], Percent::from_str("3").unwrap(), 4);

        assert_eq!(stats.total_listings, 0);
        assert_eq!(stats.revenue, Amount::ZERO);
        assert!(stats.recent.is_empty());
    }

    #[test]
    fn saturates_revenue_of_huge_prices() {
        let huge = Amount::from_str("50000000000000000000000000000").unwrap();
        let properties = (1..=2)
            .map(|id| {
                let mut p = property(id, 0, i64::from(id));
                p.price = huge;
                p.status = property::Status::Sold;
                p
            })
            .collect::<Vec<_>>();

        let stats = Stats::new(
            &properties,
            &[],
            Percent::from_str("100").unwrap(),
            4,
        );

        assert_eq!(stats.revenue, Amount::MAX);
        assert_eq!(stats.total_listings, 2);
    }
}
