//! In-memory `TrafficSource` implementations for handler tests.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::{AttackTypeCount, PacketLengthAvg, ProtocolCount, QueryError, TrafficSource};
use crate::{template, AppState};

#[derive(Clone, Debug)]
pub struct Record {
    /// `YYYY-MM-DD HH:MM:SS`; bounds compare lexically, as ISO dates do.
    pub timestamp: &'static str,
    pub attack_type: &'static str,
    pub packet_length: Option<f64>,
    pub protocol: &'static str,
}

pub fn record(
    timestamp: &'static str,
    attack_type: &'static str,
    packet_length: f64,
    protocol: &'static str,
) -> Record {
    Record {
        timestamp,
        attack_type,
        packet_length: Some(packet_length),
        protocol,
    }
}

/// Evaluates the three aggregates over a fixed record list with the same
/// grouping and ordering the SQL uses, NULL handling included: `avg` skips
/// missing lengths and descending order puts NULL averages first.
pub struct MemorySource {
    pub records: Vec<Record>,
}

#[async_trait]
impl TrafficSource for MemorySource {
    async fn attack_type_counts(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<AttackTypeCount>, QueryError> {
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for r in &self.records {
            if r.timestamp > start_date && r.timestamp < end_date {
                *counts.entry(r.attack_type).or_default() += 1;
            }
        }
        let mut out: Vec<AttackTypeCount> = counts
            .into_iter()
            .map(|(attack_type, count)| AttackTypeCount {
                attack_type: attack_type.to_string(),
                count,
            })
            .collect();
        out.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.attack_type.cmp(&b.attack_type))
        });
        Ok(out)
    }

    async fn packet_length_averages(&self) -> Result<Vec<PacketLengthAvg>, QueryError> {
        let mut sums: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
        for r in &self.records {
            let e = sums.entry(r.attack_type).or_insert((0.0, 0));
            if let Some(len) = r.packet_length {
                e.0 += len;
                e.1 += 1;
            }
        }
        let mut out: Vec<PacketLengthAvg> = sums
            .into_iter()
            .map(|(attack_type, (sum, n))| PacketLengthAvg {
                attack_type: attack_type.to_string(),
                avg_packet_length: (n > 0).then(|| sum / f64::from(n)),
            })
            .collect();
        out.sort_by(|a, b| {
            let by_avg = match (a.avg_packet_length, b.avg_packet_length) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(x), Some(y)) => y.total_cmp(&x),
            };
            by_avg.then_with(|| a.attack_type.cmp(&b.attack_type))
        });
        Ok(out)
    }

    async fn protocol_counts(&self) -> Result<Vec<ProtocolCount>, QueryError> {
        let mut counts: BTreeMap<(&str, &str), i64> = BTreeMap::new();
        for r in &self.records {
            *counts.entry((r.attack_type, r.protocol)).or_default() += 1;
        }
        let mut out: Vec<ProtocolCount> = counts
            .into_iter()
            .map(|((attack_type, protocol), protocol_count)| ProtocolCount {
                attack_type: attack_type.to_string(),
                protocol: protocol.to_string(),
                protocol_count,
            })
            .collect();
        out.sort_by(|a, b| {
            a.attack_type
                .cmp(&b.attack_type)
                .then_with(|| b.protocol_count.cmp(&a.protocol_count))
                .then_with(|| a.protocol.cmp(&b.protocol))
        });
        Ok(out)
    }
}

/// Every call fails with the given error.
pub struct FailingSource(pub QueryError);

#[async_trait]
impl TrafficSource for FailingSource {
    async fn attack_type_counts(
        &self,
        _: &str,
        _: &str,
    ) -> Result<Vec<AttackTypeCount>, QueryError> {
        Err(self.0.clone())
    }

    async fn packet_length_averages(&self) -> Result<Vec<PacketLengthAvg>, QueryError> {
        Err(self.0.clone())
    }

    async fn protocol_counts(&self) -> Result<Vec<ProtocolCount>, QueryError> {
        Err(self.0.clone())
    }
}

pub fn state(source: impl TrafficSource + 'static) -> AppState {
    AppState {
        source: Arc::new(source),
        tera: template::load().expect("templates compile"),
    }
}

/// Three in-range records: two DDoS, one Benign.
pub fn small_sample() -> MemorySource {
    MemorySource {
        records: vec![
            record("2022-03-01 09:00:00", "DDoS", 1200.0, "UDP"),
            record("2022-03-01 09:00:05", "DDoS", 800.0, "TCP"),
            record("2022-06-15 12:30:00", "Benign", 400.0, "TCP"),
        ],
    }
}

/// Spread over time, attack types and protocols, some records outside the
/// default date bounds.
pub fn wide_sample() -> MemorySource {
    MemorySource {
        records: vec![
            record("2020-12-31 23:59:59", "DDoS", 1500.0, "UDP"),
            record("2021-05-02 10:00:00", "DDoS", 1400.0, "UDP"),
            record("2021-05-02 10:00:01", "DDoS", 1300.0, "TCP"),
            record("2021-07-09 08:00:00", "PortScan", 60.0, "TCP"),
            record("2021-07-09 08:00:01", "PortScan", 64.0, "TCP"),
            record("2021-07-09 08:00:02", "PortScan", 62.0, "TCP"),
            record("2021-11-20 16:45:00", "Benign", 500.0, "TCP"),
            record("2022-01-04 11:11:11", "Benign", 700.0, "UDP"),
            record("2022-08-30 02:00:00", "Bot", 250.0, "ICMP"),
            record("2023-02-01 00:00:00", "Bot", 300.0, "ICMP"),
        ],
    }
}

/// `wide_sample` plus a group whose packet lengths were never recorded.
pub fn sample_with_missing_lengths() -> MemorySource {
    let mut source = wide_sample();
    for ts in ["2022-02-02 02:02:02", "2022-02-02 02:02:03"] {
        source.records.push(Record {
            timestamp: ts,
            attack_type: "Unlabeled",
            packet_length: None,
            protocol: "TCP",
        });
    }
    source
}
