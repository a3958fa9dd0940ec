use serde::Serialize;
use tera::{Context, Tera};

use crate::dataset::Dataset;
use crate::db::{AttackTypeCount, PacketLengthAvg, ProtocolCount};
use crate::flash::Flash;
use crate::templates;

#[derive(Debug)]
pub struct RenderError(pub String);

impl From<tera::Error> for RenderError {
    fn from(e: tera::Error) -> Self {
        // tera keeps the useful part in the source chain
        let mut msg = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(inner) = source {
            msg.push_str(": ");
            msg.push_str(&inner.to_string());
            source = inner.source();
        }
        RenderError(msg)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self { RenderError(e.to_string()) }
}

/// Compile the built-in templates.
pub fn load() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", templates::BASE_HTML),
        ("status.html", templates::STATUS_HTML),
        ("index.html", templates::INDEX_HTML),
        ("main.html", templates::MAIN_HTML),
        ("attack_type_analysis.html", templates::ATTACK_TYPE_ANALYSIS_HTML),
        ("packet_analysis.html", templates::PACKET_ANALYSIS_HTML),
        ("protocol_analysis.html", templates::PROTOCOL_ANALYSIS_HTML),
    ])?;
    Ok(tera)
}

fn base_context<T>(flashes: &[Flash], data: &Dataset<T>) -> Context {
    let mut ctx = Context::new();
    ctx.insert("flashes", flashes);
    ctx.insert("status", data.status());
    ctx.insert("error", &data.error());
    ctx
}

pub fn index_page(tera: &Tera, flashes: &[Flash]) -> Result<String, RenderError> {
    let mut ctx = Context::new();
    ctx.insert("flashes", flashes);
    Ok(tera.render("index.html", &ctx)?)
}

pub fn main_page(tera: &Tera, flashes: &[Flash]) -> Result<String, RenderError> {
    let mut ctx = Context::new();
    ctx.insert("flashes", flashes);
    Ok(tera.render("main.html", &ctx)?)
}

pub fn attack_type_page(
    tera: &Tera,
    data: &Dataset<AttackTypeCount>,
    start_date: &str,
    end_date: &str,
    flashes: &[Flash],
) -> Result<String, RenderError> {
    let rows = data.rows();
    let labels: Vec<&str> = rows.iter().map(|r| r.attack_type.as_str()).collect();
    let values: Vec<i64> = rows.iter().map(|r| r.count).collect();

    let mut ctx = base_context(flashes, data);
    ctx.insert("traffic_data", rows);
    ctx.insert("start_date", start_date);
    ctx.insert("end_date", end_date);
    ctx.insert("labels_json", &serde_json::to_string(&labels)?);
    ctx.insert("values_json", &serde_json::to_string(&values)?);
    Ok(tera.render("attack_type_analysis.html", &ctx)?)
}

pub fn packet_page(
    tera: &Tera,
    data: &Dataset<PacketLengthAvg>,
    flashes: &[Flash],
) -> Result<String, RenderError> {
    let rows = data.rows();
    let labels: Vec<&str> = rows.iter().map(|r| r.attack_type.as_str()).collect();
    let values: Vec<Option<f64>> = rows.iter().map(|r| r.avg_packet_length).collect();

    let mut ctx = base_context(flashes, data);
    ctx.insert("packet_data", rows);
    ctx.insert("labels_json", &serde_json::to_string(&labels)?);
    ctx.insert("values_json", &serde_json::to_string(&values)?);
    Ok(tera.render("packet_analysis.html", &ctx)?)
}

pub fn protocol_page(
    tera: &Tera,
    data: &Dataset<ProtocolCount>,
    flashes: &[Flash],
) -> Result<String, RenderError> {
    let rows = data.rows();
    let (labels, series) = protocol_series(rows);

    let mut ctx = base_context(flashes, data);
    ctx.insert("protocol_data", rows);
    ctx.insert("labels_json", &serde_json::to_string(&labels)?);
    ctx.insert("datasets_json", &serde_json::to_string(&series)?);
    Ok(tera.render("protocol_analysis.html", &ctx)?)
}

/// One stacked-bar series: counts of a single protocol across attack types.
#[derive(Serialize, Debug, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<i64>,
}

/// Pivot (attack type, protocol, count) rows into chart labels (attack types)
/// and one series per protocol. Both keep first-seen order, so the chart
/// follows the table ordering. Missing combinations are 0.
pub fn protocol_series(rows: &[ProtocolCount]) -> (Vec<String>, Vec<ChartSeries>) {
    let mut labels: Vec<String> = Vec::new();
    for r in rows {
        if !labels.contains(&r.attack_type) {
            labels.push(r.attack_type.clone());
        }
    }

    let mut series: Vec<ChartSeries> = Vec::new();
    for r in rows {
        let col = labels.iter().position(|l| *l == r.attack_type).unwrap_or(0);
        let idx = match series.iter().position(|s| s.label == r.protocol) {
            Some(i) => i,
            None => {
                series.push(ChartSeries {
                    label: r.protocol.clone(),
                    data: vec![0; labels.len()],
                });
                series.len() - 1
            }
        };
        series[idx].data[col] += r.protocol_count;
    }
    (labels, series)
}
