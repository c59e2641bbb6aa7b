//! In-memory gauge service for tests and embedding.
//!
//! [`InMemoryGaugeService`] keeps gauges in a keel-store
//! [`InMemoryRepository`] keyed by gauge name, so gauges list in name order.

use keel_store::{InMemoryRepository, Repository, StoreConfig};
use tracing::debug;

use crate::error::Result;
use crate::gauge::Gauge;
use crate::traits::GaugeService;

fn gauge_name(gauge: &Gauge) -> String {
    gauge.name.clone()
}

type GaugeRepository = InMemoryRepository<Gauge, String, fn(&Gauge) -> String>;

/// An in-memory implementation of [`GaugeService`].
#[derive(Debug)]
pub struct InMemoryGaugeService {
    gauges: GaugeRepository,
}

impl InMemoryGaugeService {
    /// Create an empty gauge service.
    pub fn new() -> Self {
        Self {
            gauges: InMemoryRepository::with_config(
                StoreConfig::named("gauges"),
                gauge_name as fn(&Gauge) -> String,
            ),
        }
    }

    /// All gauges in name order.
    pub fn gauges(&self) -> Result<Vec<Gauge>> {
        Ok(self.gauges.find_all()?)
    }

    /// Remove the gauge called `name`. Returns `true` if it existed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        Ok(self.gauges.delete(&name.to_string())?)
    }
}

impl Default for InMemoryGaugeService {
    fn default() -> Self {
        Self::new()
    }
}

impl GaugeService for InMemoryGaugeService {
    fn get_or_create(&self, name: &str) -> Result<Gauge> {
        Ok(self.gauges.find_or_insert_with(name.to_string(), || {
            debug!(gauge = name, "creating gauge");
            Gauge::new(name)
        })?)
    }

    fn set_value(&self, name: &str, value: i64) -> Result<()> {
        self.gauges.save(Gauge::new(name).with_value(value))?;
        Ok(())
    }

    fn find(&self, name: &str) -> Result<Option<Gauge>> {
        Ok(self.gauges.find_one(&name.to_string())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_creates_zero_gauge() {
        let svc = InMemoryGaugeService::new();
        let g = svc.get_or_create("requests").unwrap();
        assert_eq!(g, Gauge::new("requests"));
        assert!(svc.find("requests").unwrap().is_some());
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let svc = InMemoryGaugeService::new();
        svc.get_or_create("q").unwrap();
        svc.set_value("q", 42).unwrap();
        let g = svc.get_or_create("q").unwrap();
        assert_eq!(g.value, 42);
        assert_eq!(svc.gauges().unwrap().len(), 1);
    }

    #[test]
    fn get_or_create_after_set_value_keeps_value() {
        let svc = InMemoryGaugeService::new();
        svc.set_value("early", 9).unwrap();
        assert_eq!(svc.get_or_create("early").unwrap().value, 9);
        assert_eq!(svc.find("early").unwrap().unwrap().value, 9);
    }

    #[test]
    fn concurrent_get_or_create_never_resets_value() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        for round in 0..200 {
            let svc = Arc::new(InMemoryGaugeService::new());
            let barrier = Arc::new(Barrier::new(2));
            let name = format!("g{round}");

            let creator = {
                let (svc, barrier, name) = (Arc::clone(&svc), Arc::clone(&barrier), name.clone());
                thread::spawn(move || {
                    barrier.wait();
                    svc.get_or_create(&name).unwrap();
                })
            };
            let setter = {
                let (svc, barrier, name) = (Arc::clone(&svc), Arc::clone(&barrier), name.clone());
                thread::spawn(move || {
                    barrier.wait();
                    svc.set_value(&name, 7).unwrap();
                })
            };
            creator.join().expect("creator should not panic");
            setter.join().expect("setter should not panic");

            // Whichever ran first, the written value must survive.
            assert_eq!(svc.find(&name).unwrap().unwrap().value, 7);
        }
    }

    #[test]
    fn set_value_creates_missing_gauge() {
        let svc = InMemoryGaugeService::new();
        svc.set_value("fresh", -7).unwrap();
        assert_eq!(svc.find("fresh").unwrap().unwrap().value, -7);
    }

    #[test]
    fn find_missing_is_none() {
        let svc = InMemoryGaugeService::new();
        assert!(svc.find("nope").unwrap().is_none());
    }

    #[test]
    fn gauges_listed_in_name_order() {
        let svc = InMemoryGaugeService::new();
        for name in ["zeta", "alpha", "mu"] {
            svc.get_or_create(name).unwrap();
        }
        let names: Vec<String> = svc.gauges().unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["alpha", "mu", "zeta"]);
    }

    #[test]
    fn remove_gauge() {
        let svc = InMemoryGaugeService::new();
        svc.get_or_create("temp").unwrap();
        assert!(svc.remove("temp").unwrap());
        assert!(!svc.remove("temp").unwrap());
        assert!(svc.find("temp").unwrap().is_none());
    }
}
