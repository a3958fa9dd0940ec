pub static BASE_HTML: &str = r###"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <title>{% block title %}Traffic dashboard{% endblock title %}</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
  <style>
    body { font-family: sans-serif; margin: 2rem; }
    nav a { margin-right: 1rem; }
    table { border-collapse: collapse; margin-top: 1rem; }
    th, td { border: 1px solid #ccc; padding: 4px 10px; }
    .alert { padding: .5rem 1rem; margin: .5rem 0; border-radius: 4px; }
    .alert-danger { background: #f8d7da; color: #842029; }
    .alert-info { background: #cff4fc; color: #055160; }
    .chart-box { max-width: 900px; }
  </style>
</head>
<body>
  <nav>
    <a href="/main">Main</a>
    <a href="/attack-type-analysis">Attack types</a>
    <a href="/packet-analysis">Packet length</a>
    <a href="/protocol-analysis">Protocols</a>
  </nav>
  {% for f in flashes %}
  <div class="alert alert-{{ f.category }}">{{ f.message }}</div>
  {% endfor %}
  {% block content %}{% endblock content %}
  <script>
    document.querySelectorAll("canvas.chart").forEach(function (el) {
      var labels = JSON.parse(el.dataset.labels);
      var datasets = el.dataset.datasets
        ? JSON.parse(el.dataset.datasets)
        : [{ label: el.dataset.title, data: JSON.parse(el.dataset.values) }];
      new Chart(el, {
        type: "bar",
        data: { labels: labels, datasets: datasets },
        options: { scales: { x: { stacked: !!el.dataset.stacked }, y: { stacked: !!el.dataset.stacked, beginAtZero: true } } }
      });
    });
  </script>
</body>
</html>
"###;

pub static STATUS_HTML: &str = r###"
{% if status == "empty" %}
<p class="no-data">No records found</p>
{% elif status == "failed" %}
<p class="query-failed">Query failed, showing no data</p>
{% endif %}
"###;

pub static INDEX_HTML: &str = r###"{% extends "base.html" %}
{% block content %}
<h1>Network traffic dashboard</h1>
<p>Aggregate views over recorded network traffic.</p>
<p><a href="/main">Open the dashboard</a></p>
{% endblock content %}
"###;

pub static MAIN_HTML: &str = r###"{% extends "base.html" %}
{% block title %}Main{% endblock title %}
{% block content %}
<h2>Reports</h2>
<ul>
  <li><a href="/attack-type-analysis">Attack type analysis</a>: records per attack type in a date range</li>
  <li><a href="/packet-analysis">Packet analysis</a>: average packet length per attack type</li>
  <li><a href="/protocol-analysis">Protocol analysis</a>: protocol distribution per attack type</li>
</ul>
{% endblock content %}
"###;

pub static ATTACK_TYPE_ANALYSIS_HTML: &str = r###"{% extends "base.html" %}
{% block title %}Attack type analysis{% endblock title %}
{% block content %}
<h2>Attack type analysis</h2>
<form method="get" action="/attack-type-analysis">
  <label>From <input type="text" name="start_date" value="{{ start_date }}"></label>
  <label>To <input type="text" name="end_date" value="{{ end_date }}"></label>
  <button type="submit">Apply</button>
</form>
{% include "status.html" %}
{% if status == "ok" %}
<div class="chart-box">
  <canvas class="chart" data-title="Records" data-labels="{{ labels_json }}" data-values="{{ values_json }}"></canvas>
</div>
{% endif %}
<table>
  <tr><th>Attack Type</th><th>Count</th></tr>
  {% for r in traffic_data %}
  <tr><td>{{ r.attack_type }}</td><td>{{ r.count }}</td></tr>
  {% endfor %}
</table>
{% endblock content %}
"###;

pub static PACKET_ANALYSIS_HTML: &str = r###"{% extends "base.html" %}
{% block title %}Packet analysis{% endblock title %}
{% block content %}
<h2>Average packet length by attack type</h2>
{% include "status.html" %}
{% if status == "ok" %}
<div class="chart-box">
  <canvas class="chart" data-title="Avg packet length" data-labels="{{ labels_json }}" data-values="{{ values_json }}"></canvas>
</div>
{% endif %}
<table>
  <tr><th>Attack Type</th><th>Avg Packet Length</th></tr>
  {% for r in packet_data %}
  <tr><td>{{ r.attack_type }}</td><td>{% if r.avg_packet_length is number %}{{ r.avg_packet_length | round(precision=2) }}{% endif %}</td></tr>
  {% endfor %}
</table>
{% endblock content %}
"###;

pub static PROTOCOL_ANALYSIS_HTML: &str = r###"{% extends "base.html" %}
{% block title %}Protocol analysis{% endblock title %}
{% block content %}
<h2>Protocol distribution by attack type</h2>
{% include "status.html" %}
{% if status == "ok" %}
<div class="chart-box">
  <canvas class="chart" data-stacked="1" data-labels="{{ labels_json }}" data-datasets="{{ datasets_json }}"></canvas>
</div>
{% endif %}
<table>
  <tr><th>Attack Type</th><th>Protocol</th><th>Count</th></tr>
  {% for r in protocol_data %}
  <tr><td>{{ r.attack_type }}</td><td>{{ r.protocol }}</td><td>{{ r.protocol_count }}</td></tr>
  {% endfor %}
</table>
{% endblock content %}
"###;
