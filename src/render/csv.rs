use crate::model::ComparisonReport;
use anyhow::anyhow;

/// One row per (metric, step): `metric,x,baseline,alternative`.
pub fn render_csv(report: &ComparisonReport) -> anyhow::Result<String> {
    let mut w = ::csv::Writer::from_writer(Vec::new());
    w.write_record(["metric", "x", "baseline", "alternative"])?;

    for ds in &report.datasets {
        let metric = ds.metric.key();
        for (b, a) in ds.baseline.points.iter().zip(&ds.alternative.points) {
            w.write_record([
                metric.to_string(),
                b.x.to_string(),
                b.y.to_string(),
                a.y.to_string(),
            ])?;
        }
    }

    let bytes = w
        .into_inner()
        .map_err(|e| anyhow!("flush csv writer: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
