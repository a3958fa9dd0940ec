use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow, PgSslMode};
use sqlx::{Connection, Row};

use crate::config::DbSettings;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("query failed: {0}")]
    Query(String),
}

/* Types for query results */

#[derive(serde::Serialize, Clone, Debug, PartialEq)]
pub struct AttackTypeCount {
    pub attack_type: String,
    pub count: i64,
}

#[derive(serde::Serialize, Clone, Debug, PartialEq)]
pub struct PacketLengthAvg {
    pub attack_type: String,
    /// NULL when every packet length in the group is NULL.
    pub avg_packet_length: Option<f64>,
}

#[derive(serde::Serialize, Clone, Debug, PartialEq)]
pub struct ProtocolCount {
    pub attack_type: String,
    pub protocol: String,
    pub protocol_count: i64,
}

/// The aggregate reads the dashboard needs. Each call stands alone: the
/// Postgres implementation opens and closes its own connection.
#[async_trait]
pub trait TrafficSource: Send + Sync {
    /// Records per attack type with `start_date < timestamp < end_date`,
    /// largest count first.
    async fn attack_type_counts(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<AttackTypeCount>, QueryError>;

    /// Mean packet length per attack type over all records, largest first.
    /// Groups without any packet length sort ahead of the rest.
    async fn packet_length_averages(&self) -> Result<Vec<PacketLengthAvg>, QueryError>;

    /// Protocol counts per (attack type, protocol), attack type ascending then
    /// count descending.
    async fn protocol_counts(&self) -> Result<Vec<ProtocolCount>, QueryError>;
}

pub fn connect_options(db: &DbSettings) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&db.host)
        .port(db.port)
        .database(&db.name)
        .username(&db.user)
        .password(&db.password)
        .ssl_mode(PgSslMode::Require)
        .options([("timezone", db.timezone.as_str())])
}

/// Open one connection for the current request. No retry.
pub async fn connect(db: &DbSettings) -> Result<PgConnection, QueryError> {
    let conn = PgConnection::connect_with(&connect_options(db))
        .await
        .map_err(|e| QueryError::Connect(e.to_string()))?;
    log::debug!(
        "db connection acquired host={} port={} dbname={} timezone={}",
        db.host,
        db.port,
        db.name,
        db.timezone
    );
    Ok(conn)
}

/* SQL */

pub fn attack_type_counts_sql(schema: &str) -> String {
    format!(
        r#"
        SELECT "Attack Type" AS attack_type, count(*) AS count
        FROM {schema}.traffic_total_info
        WHERE timestamp > $1::text::timestamptz AND timestamp < $2::text::timestamptz
        GROUP BY "Attack Type"
        ORDER BY count DESC, attack_type ASC
        "#
    )
}

pub fn packet_length_averages_sql(schema: &str) -> String {
    format!(
        r#"
        SELECT "Attack Type" AS attack_type,
               avg("Packet Length")::float8 AS avg_packet_length
        FROM {schema}.traffic_total_info
        GROUP BY "Attack Type"
        ORDER BY avg_packet_length DESC, attack_type ASC
        "#
    )
}

pub fn protocol_counts_sql(schema: &str) -> String {
    format!(
        r#"
        SELECT "Attack Type" AS attack_type, protocol, count(protocol) AS protocol_count
        FROM {schema}.traffic_total_info
        GROUP BY "Attack Type", protocol
        ORDER BY attack_type ASC, protocol_count DESC, protocol ASC
        "#
    )
}

/* Row mapping. NULL labels become empty strings. */

fn label(r: &PgRow, column: &str) -> Result<String, sqlx::Error> {
    Ok(r.try_get::<Option<String>, _>(column)?.unwrap_or_default())
}

fn attack_type_count(r: &PgRow) -> Result<AttackTypeCount, sqlx::Error> {
    Ok(AttackTypeCount {
        attack_type: label(r, "attack_type")?,
        count: r.try_get("count")?,
    })
}

fn packet_length_avg(r: &PgRow) -> Result<PacketLengthAvg, sqlx::Error> {
    Ok(PacketLengthAvg {
        attack_type: label(r, "attack_type")?,
        avg_packet_length: r.try_get("avg_packet_length")?,
    })
}

fn protocol_count(r: &PgRow) -> Result<ProtocolCount, sqlx::Error> {
    Ok(ProtocolCount {
        attack_type: label(r, "attack_type")?,
        protocol: label(r, "protocol")?,
        protocol_count: r.try_get("protocol_count")?,
    })
}

/// Closes the connection whatever the query outcome, then maps the outcome.
async fn close_after<T>(
    conn: PgConnection,
    result: Result<Vec<PgRow>, sqlx::Error>,
    map: fn(&PgRow) -> Result<T, sqlx::Error>,
) -> Result<Vec<T>, QueryError> {
    if let Err(e) = conn.close().await {
        log::debug!("db connection close failed: {e}");
    }
    let rows = result.map_err(|e| QueryError::Query(e.to_string()))?;
    rows.iter()
        .map(map)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| QueryError::Query(e.to_string()))
}

/// `TrafficSource` over `traffic_total_info`, one connection per call.
pub struct PgTrafficSource {
    settings: DbSettings,
}

impl PgTrafficSource {
    pub fn new(settings: DbSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl TrafficSource for PgTrafficSource {
    async fn attack_type_counts(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<AttackTypeCount>, QueryError> {
        let sql = attack_type_counts_sql(&self.settings.schema);
        let mut conn = connect(&self.settings).await?;
        let result = sqlx::query(&sql)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(&mut conn)
            .await;
        close_after(conn, result, attack_type_count).await
    }

    async fn packet_length_averages(&self) -> Result<Vec<PacketLengthAvg>, QueryError> {
        let sql = packet_length_averages_sql(&self.settings.schema);
        let mut conn = connect(&self.settings).await?;
        let result = sqlx::query(&sql).fetch_all(&mut conn).await;
        close_after(conn, result, packet_length_avg).await
    }

    async fn protocol_counts(&self) -> Result<Vec<ProtocolCount>, QueryError> {
        let sql = protocol_counts_sql(&self.settings.schema);
        let mut conn = connect(&self.settings).await?;
        let result = sqlx::query(&sql).fetch_all(&mut conn).await;
        close_after(conn, result, protocol_count).await
    }
}
