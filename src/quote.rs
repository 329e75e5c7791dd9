//! Quote assembly for one destination and catalog snapshot.
//!
//! Ties the pipeline together: resolve the address, classify the zone, run
//! eligibility and reselection, then price and schedule each surviving
//! method. Holds no state beyond its injected collaborators.

use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::eligibility::{reselect, EligibilityOutcome, SelectionChange};
use crate::geocode::{AddressResolver, GeocoderClient};
use crate::models::{DeliveryMethod, Zone};
use crate::pricing::{delivery_cost, order_total, Cost};
use crate::schedule::{available_dates, DeliveryDateOption};
use crate::zones::ZoneClassifier;

/// Cost and offerable dates for one eligible method.
#[derive(Debug)]
pub struct MethodQuote<'a> {
    pub method: &'a DeliveryMethod,
    pub cost: Cost,
    pub dates: Vec<DeliveryDateOption>,
}

/// Everything the checkout surface needs after an address change.
#[derive(Debug)]
pub struct Assessment<'a> {
    pub zone: Zone,
    pub eligibility: EligibilityOutcome<'a>,
    pub quotes: Vec<MethodQuote<'a>>,
    /// Subtotal plus the selected method's delivery cost. An undetermined
    /// cost contributes nothing; the quote's [`Cost`] carries that state.
    pub order_total: Decimal,
}

pub struct QuoteService {
    classifier: ZoneClassifier,
    resolver: Arc<dyn AddressResolver>,
}

impl QuoteService {
    pub fn new(classifier: ZoneClassifier, resolver: Arc<dyn AddressResolver>) -> Self {
        Self {
            classifier,
            resolver,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            ZoneClassifier::from_config(&config.boundaries)?,
            Arc::new(GeocoderClient::from_config(&config.geocoder)?),
        ))
    }

    /// Assess a free-text destination address.
    ///
    /// Resolution failure degrades to `Zone::Unknown`; only requirement-free
    /// methods survive in that case.
    pub async fn assess<'a>(
        &self,
        address: &str,
        methods: &'a [DeliveryMethod],
        current_selection: Option<i64>,
        subtotal: Decimal,
        now: NaiveDateTime,
    ) -> Assessment<'a> {
        let coordinate = self
            .resolver
            .resolve_first(address)
            .await
            .map(|resolved| resolved.coordinate);
        let zone = self.classifier.classify(coordinate);
        debug!("assessing {:?} in zone {}", address, zone);
        self.assess_zone(zone, methods, current_selection, subtotal, now)
    }

    /// Assess an already-classified destination.
    pub fn assess_zone<'a>(
        &self,
        zone: Zone,
        methods: &'a [DeliveryMethod],
        current_selection: Option<i64>,
        subtotal: Decimal,
        now: NaiveDateTime,
    ) -> Assessment<'a> {
        let eligibility = reselect(zone, methods, current_selection);

        let quotes: Vec<MethodQuote<'a>> = eligibility
            .eligible
            .iter()
            .map(|&method| MethodQuote {
                method,
                cost: delivery_cost(method, zone, subtotal),
                dates: available_dates(method, now),
            })
            .collect();

        let selected = match eligibility.change {
            SelectionChange::AutoSelected(id) | SelectionChange::Retained(id) => Some(id),
            _ => None,
        };
        let order_total = selected
            .and_then(|id| quotes.iter().find(|quote| quote.method.id == id))
            .map(|quote| order_total(subtotal, quote.cost))
            .unwrap_or(subtotal);

        Assessment {
            zone,
            eligibility,
            quotes,
            order_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::ResolvedAddress;
    use crate::models::{GeoPoint, MethodKind, PricingPolicy, ZoneTier};
    use crate::zones::{ZoneBoundary, ZoneIndex};
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    struct StaticResolver {
        known: Option<(String, GeoPoint)>,
    }

    #[async_trait]
    impl AddressResolver for StaticResolver {
        async fn resolve(&self, query: &str) -> Vec<ResolvedAddress> {
            match &self.known {
                Some((address, point)) if address == query => vec![ResolvedAddress {
                    coordinate: *point,
                    country: None,
                    region: None,
                    city: None,
                    postcode: None,
                }],
                _ => Vec::new(),
            }
        }
    }

    fn classifier() -> ZoneClassifier {
        let inner = ZoneBoundary::new(
            ZoneTier::Inner,
            &[[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0]],
        )
        .unwrap();
        let outer = ZoneBoundary::new(
            ZoneTier::Outer,
            &[[0.0, 0.0], [3.0, 0.0], [3.0, 3.0], [0.0, 3.0]],
        )
        .unwrap();
        ZoneClassifier::new(ZoneIndex::build(vec![inner, outer]))
    }

    fn catalog() -> Vec<DeliveryMethod> {
        let mut courier = DeliveryMethod::new(1, "Courier", MethodKind::Courier);
        courier.pricing = PricingPolicy::Fixed { amount: dec!(300) };

        let mut express = DeliveryMethod::new(2, "Express", MethodKind::Express);
        express.pricing = PricingPolicy::Fixed { amount: dec!(700) };
        express.zone_requirement = Some(Zone::Ckad);

        vec![courier, express]
    }

    fn monday_morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn resolved_address_is_classified_and_quoted() {
        let service = QuoteService::new(
            classifier(),
            Arc::new(StaticResolver {
                known: Some(("Tverskaya 1".to_string(), GeoPoint::new(1.5, 1.5))),
            }),
        );

        let methods = catalog();
        let assessment = service
            .assess("Tverskaya 1", &methods, None, dec!(5000), monday_morning())
            .await;

        assert_eq!(assessment.zone, Zone::Mkad);
        // The CKAD-only express method drops out; the courier is the single
        // survivor and gets auto-selected.
        assert_eq!(assessment.quotes.len(), 1);
        assert_eq!(
            assessment.eligibility.change,
            SelectionChange::AutoSelected(1)
        );
        assert_eq!(assessment.quotes[0].cost, Cost::Amount(dec!(300)));
        assert!(!assessment.quotes[0].dates.is_empty());
        assert_eq!(assessment.order_total, dec!(5300));
    }

    #[tokio::test]
    async fn unresolvable_address_degrades_to_unknown_zone() {
        let service = QuoteService::new(classifier(), Arc::new(StaticResolver { known: None }));

        let methods = catalog();
        let assessment = service
            .assess("gibberish", &methods, Some(2), dec!(5000), monday_morning())
            .await;

        assert_eq!(assessment.zone, Zone::Unknown);
        // Only the requirement-free courier survives; the previous express
        // selection is invalidated.
        assert_eq!(assessment.quotes.len(), 1);
        assert!(assessment.eligibility.previous_invalidated);
    }

    #[tokio::test]
    async fn undetermined_price_does_not_inflate_the_total() {
        let mut method = DeliveryMethod::new(3, "Regional", MethodKind::Courier);
        method.pricing = PricingPolicy::ZoneTable {
            prices: std::collections::HashMap::new(),
        };
        let methods = vec![method];

        let service = QuoteService::new(classifier(), Arc::new(StaticResolver { known: None }));
        let assessment =
            service.assess_zone(Zone::Region, &methods, None, dec!(5000), monday_morning());

        assert_eq!(assessment.quotes[0].cost, Cost::Undetermined);
        assert_eq!(assessment.order_total, dec!(5000));
    }
}
