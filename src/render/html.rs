use crate::model::ComparisonReport;

/// Render a self-contained HTML page with one line chart per metric
/// (report embedded as JSON, charts drawn as SVG on load).
///
/// Important: we avoid `format!()` because the page contains many `{}` from JS
/// template literals (e.g., `${x}`), which would conflict with Rust formatting.
pub fn render_html_report(report: &ComparisonReport) -> anyhow::Result<String> {
    // `</` inside a <script> block would end it early.
    let json = serde_json::to_string(report)?.replace("</", "<\\/");

    const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Consistent Hashing vs CuckooRings</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }
  .warn { color: #a15c00; font-size: 13px; margin-top: 6px; }
  .charts { display: flex; flex-wrap: wrap; gap: 16px; padding: 16px; }
  .chart { border: 1px solid #eee; border-radius: 6px; padding: 8px; }
  .chart h3 { margin: 4px 0 8px; font-size: 15px; font-weight: 600; }
  svg text { font-size: 11px; fill: #444; }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
  <div id="warnings"></div>
</header>
<div class="charts" id="charts"></div>

<script>
const DATA = __DATA__;

const COLORS = { baseline: "red", alternative: "blue" };
const W = 520, H = 320, PAD = { l: 64, r: 16, t: 16, b: 44 };

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function fmt(v) {
  if (Math.abs(v) >= 10000) return v.toExponential(1);
  return (Math.round(v * 1000) / 1000).toString();
}

function renderSummary() {
  const s = DATA.sweep;
  document.getElementById("summary").innerHTML = `
    <span class="pill">records: <b>${DATA.records}</b></span>
    <span class="pill">sweep steps: <b>${s.num_sweep_steps}</b></span>
    <span class="pill">step size: <b>${s.step_size}</b></span>
    <span class="pill">trials: <b>${s.trial_count}</b></span>
  `;
  const w = document.getElementById("warnings");
  for (const warn of DATA.warnings) {
    const div = document.createElement("div");
    div.className = "warn";
    div.textContent = "warning: " + JSON.stringify(warn);
    w.appendChild(div);
  }
}

function renderChart(ds) {
  const all = ds.baseline.points.concat(ds.alternative.points);
  const xs = all.map(p => p.x), ys = all.map(p => p.y);
  const x0 = Math.min(...xs), x1 = Math.max(...xs);
  const y0 = Math.min(0, ...ys), y1 = Math.max(...ys);
  const sx = x => PAD.l + (x1 === x0 ? 0.5 : (x - x0) / (x1 - x0)) * (W - PAD.l - PAD.r);
  const sy = y => H - PAD.b - (y1 === y0 ? 0.5 : (y - y0) / (y1 - y0)) * (H - PAD.t - PAD.b);

  const line = (series, color) => {
    const d = series.points.map((p, i) => `${i ? "L" : "M"}${sx(p.x)},${sy(p.y)}`).join(" ");
    return `<path d="${d}" fill="none" stroke="${color}" stroke-width="1.5"/>`;
  };

  let ticks = "";
  for (let i = 0; i <= 4; i++) {
    const yv = y0 + (y1 - y0) * i / 4;
    ticks += `<text x="${PAD.l - 6}" y="${sy(yv) + 4}" text-anchor="end">${fmt(yv)}</text>`;
    const xv = x0 + (x1 - x0) * i / 4;
    ticks += `<text x="${sx(xv)}" y="${H - PAD.b + 16}" text-anchor="middle">${fmt(xv)}</text>`;
  }

  const legend = `
    <rect x="${PAD.l + 8}" y="${PAD.t}" width="12" height="3" fill="${COLORS.baseline}"/>
    <text x="${PAD.l + 26}" y="${PAD.t + 5}">${escapeHtml(ds.baseline.label)}</text>
    <rect x="${PAD.l + 8}" y="${PAD.t + 14}" width="12" height="3" fill="${COLORS.alternative}"/>
    <text x="${PAD.l + 26}" y="${PAD.t + 19}">${escapeHtml(ds.alternative.label)}</text>
  `;

  const div = document.createElement("div");
  div.className = "chart";
  div.innerHTML = `
    <h3>${escapeHtml(ds.title)}</h3>
    <svg width="${W}" height="${H}">
      <line x1="${PAD.l}" y1="${H - PAD.b}" x2="${W - PAD.r}" y2="${H - PAD.b}" stroke="#999"/>
      <line x1="${PAD.l}" y1="${PAD.t}" x2="${PAD.l}" y2="${H - PAD.b}" stroke="#999"/>
      ${ticks}
      ${line(ds.baseline, COLORS.baseline)}
      ${line(ds.alternative, COLORS.alternative)}
      ${legend}
      <text x="${(W + PAD.l) / 2}" y="${H - 6}" text-anchor="middle">${escapeHtml(DATA.x_label)}</text>
      <text transform="translate(12,${(H - PAD.b) / 2}) rotate(-90)" text-anchor="middle">${escapeHtml(ds.y_label)}</text>
    </svg>
  `;
  document.getElementById("charts").appendChild(div);
}

renderSummary();
for (const ds of DATA.datasets) renderChart(ds);
</script>
</body>
</html>
"##;

    Ok(TEMPLATE.replace("__DATA__", &json))
}
