use crate::models::HomeSummary;

pub fn render_index(summary: &HomeSummary) -> String {
    INDEX_HTML
        .replace("{{ACTIVE}}", &summary.active_pregnancies.to_string())
        .replace("{{DELIVERIES}}", &summary.total_deliveries.to_string())
        .replace("{{NORMAL}}", &summary.normal_delivery_count.to_string())
        .replace("{{CSECTION}}", &summary.c_section_delivery_count.to_string())
        .replace("{{BABIES}}", &summary.total_babies.to_string())
        .replace("{{APPOINTMENTS}}", &summary.todays_appointments.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Healthcare Dashboard</title>
  <style>
    :root {
      --bg-1: #eef2ff;
      --bg-2: #eff6ff;
      --ink: #111827;
      --muted: #4b5563;
      --actual: #2563eb;
      --predicted: #ef4444;
      --average: #5a9690;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(30, 41, 59, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1120px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 3vw, 2.4rem);
    }

    select {
      padding: 10px 14px;
      border-radius: 10px;
      border: 1px solid #d1d5db;
      background: white;
      font-size: 0.95rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      padding: 20px;
      border: 1px solid #e5e7eb;
      box-shadow: var(--shadow);
    }

    .stat {
      display: grid;
      gap: 6px;
    }

    .stat .value {
      font-size: 1.9rem;
      font-weight: 700;
    }

    .stat .label {
      color: var(--muted);
      font-size: 0.95rem;
    }

    .split {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
      gap: 16px;
    }

    .bar {
      height: 14px;
      border-radius: 999px;
      background: #e5e7eb;
      overflow: hidden;
      margin: 8px 0 18px;
    }

    .bar span {
      display: block;
      height: 100%;
      border-radius: 999px;
    }

    .bar .normal {
      background: #10b981;
    }

    .bar .csection {
      background: #3b82f6;
    }

    .outcomes {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 10px;
      text-align: center;
    }

    .chart-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .chart-header h2 {
      margin: 0;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: #e0e7ff;
      border-radius: 999px;
    }

    .tab {
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font-weight: 600;
      background: transparent;
      color: var(--muted);
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--actual);
    }

    #chart {
      width: 100%;
      height: 300px;
      display: block;
    }

    .chart-label {
      fill: #6b7280;
      font-size: 11px;
    }

    .chart-grid {
      stroke: #e0e0e0;
      stroke-dasharray: 3 3;
    }

    .series-observed {
      fill: none;
      stroke: var(--actual);
      stroke-width: 2;
    }

    .series-predicted {
      fill: none;
      stroke: var(--predicted);
      stroke-width: 2;
      stroke-dasharray: 5 5;
    }

    .series-average {
      fill: none;
      stroke: var(--average);
      stroke-width: 3;
    }

    .legend {
      display: flex;
      gap: 18px;
      font-size: 0.9rem;
      color: var(--muted);
    }

    .legend i {
      display: inline-block;
      width: 18px;
      height: 3px;
      margin-right: 6px;
      vertical-align: middle;
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #b91c1c;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Healthcare Dashboard</h1>
      <select id="address" aria-label="Location">
        <option value="all">All Locations</option>
      </select>
    </header>

    <div class="status" id="status"></div>

    <section class="panel">
      <div class="card stat"><span class="value" id="kpi-active">{{ACTIVE}}</span><span class="label">Active Pregnancies</span></div>
      <div class="card stat"><span class="value" id="kpi-deliveries">{{DELIVERIES}}</span><span class="label">Total Deliveries</span></div>
      <div class="card stat"><span class="value" id="kpi-normal">{{NORMAL}}</span><span class="label">Normal Deliveries</span></div>
      <div class="card stat"><span class="value" id="kpi-csection">{{CSECTION}}</span><span class="label">C-Section Deliveries</span></div>
      <div class="card stat"><span class="value" id="kpi-babies">{{BABIES}}</span><span class="label">Babies Born</span></div>
      <div class="card stat"><span class="value" id="kpi-appointments">{{APPOINTMENTS}}</span><span class="label">Today's Appointments</span></div>
    </section>

    <section class="split">
      <div class="card">
        <h3>Delivery Methods</h3>
        <div>Normal Deliveries <strong id="rate-normal">0%</strong></div>
        <div class="bar"><span class="normal" id="bar-normal" style="width: 0%"></span></div>
        <div>C-Section Deliveries <strong id="rate-csection">0%</strong></div>
        <div class="bar"><span class="csection" id="bar-csection" style="width: 0%"></span></div>
      </div>
      <div class="card">
        <h3>Delivery Types</h3>
        <div class="outcomes">
          <div><strong id="type-matured">0%</strong><div class="label" id="count-matured">Matured (0)</div></div>
          <div><strong id="type-premature">0%</strong><div class="label" id="count-premature">Premature (0)</div></div>
          <div><strong id="type-mortality">0%</strong><div class="label" id="count-mortality">Mortality (0)</div></div>
        </div>
      </div>
    </section>

    <section class="card">
      <div class="chart-header">
        <div>
          <h2 id="chart-title">Maternal Weight</h2>
          <select id="patient" aria-label="Patient"></select>
        </div>
        <div class="tabs" role="tablist">
          <button class="tab active" type="button" data-metric="weight">Weight</button>
          <button class="tab" type="button" data-metric="fundal_height">Fundal Height</button>
          <button class="tab" type="button" data-metric="hemoglobin">Hemoglobin</button>
          <button class="tab" type="button" data-metric="blood_pressure">Blood Pressure</button>
        </div>
      </div>
      <svg id="chart" viewBox="0 0 720 300" aria-label="Vitals chart" role="img"></svg>
      <div class="legend">
        <span><i style="background: var(--actual)"></i>Observed</span>
        <span><i style="background: var(--predicted)"></i>Predicted</span>
        <span><i style="background: var(--average)"></i>Average</span>
      </div>
    </section>
  </main>

  <script>
    const TITLES = {
      weight: 'Maternal Weight',
      fundal_height: 'Fetal Growth',
      hemoglobin: 'Hemoglobin',
      blood_pressure: 'Blood Pressure'
    };

    const statusEl = document.getElementById('status');
    const addressEl = document.getElementById('address');
    const patientEl = document.getElementById('patient');
    const chartEl = document.getElementById('chart');
    const chartTitleEl = document.getElementById('chart-title');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    let activeMetric = 'weight';

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const setText = (id, value) => {
      document.getElementById(id).textContent = value;
    };

    const getJson = async (url) => {
      const res = await fetch(url);
      if (!res.ok) {
        throw new Error((await res.text()) || `Request failed: ${res.status}`);
      }
      return res.json();
    };

    const renderSummary = (summary) => {
      setText('kpi-active', summary.activePregnancies.toLocaleString());
      setText('kpi-deliveries', summary.totalDeliveries.toLocaleString());
      setText('kpi-normal', summary.normalDeliveryCount.toLocaleString());
      setText('kpi-csection', summary.cSectionDeliveryCount.toLocaleString());
      setText('kpi-babies', summary.totalBabies.toLocaleString());
      setText('kpi-appointments', summary.todaysAppointments.toLocaleString());
      setText('rate-normal', `${summary.normalDeliveryRate}%`);
      setText('rate-csection', `${summary.cSectionRate}%`);
      document.getElementById('bar-normal').style.width = `${summary.normalDeliveryRate}%`;
      document.getElementById('bar-csection').style.width = `${summary.cSectionRate}%`;
      const types = summary.deliveryTypes;
      setText('type-matured', `${types.matured}%`);
      setText('type-premature', `${types.premature}%`);
      setText('type-mortality', `${types.mortality}%`);
      setText('count-matured', `Matured (${types.maturedCount})`);
      setText('count-premature', `Premature (${types.prematureCount})`);
      setText('count-mortality', `Mortality (${types.mortalityCount})`);
      if (summary.filter) {
        setStatus(`Showing data for: ${summary.filter.address} (${summary.filter.patientCount} patients)`, 'info');
      } else {
        setStatus('', '');
      }
    };

    const seriesClass = (field) => {
      if (field.startsWith('PREDICTED_')) {
        return 'series-predicted';
      }
      if (field.startsWith('AVG_')) {
        return 'series-average';
      }
      return 'series-observed';
    };

    const renderChart = (view) => {
      const rows = view.rows;
      if (!rows.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }

      const width = 720;
      const height = 300;
      const left = 48;
      const right = 20;
      const top = 16;
      const bottom = 32;
      const { min, max } = view.range;
      const span = max - min || 1;
      const firstWeek = rows[0].GESTATIONAL_AGE_WEEKS;
      const lastWeek = rows[rows.length - 1].GESTATIONAL_AGE_WEEKS;
      const weekSpan = lastWeek - firstWeek || 1;
      const x = (week) => left + ((week - firstWeek) * (width - left - right)) / weekSpan;
      const y = (value) => height - bottom - ((value - min) * (height - top - bottom)) / span;

      let grid = '';
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (span * i) / ticks;
        grid += `<line class="chart-grid" x1="${left}" y1="${y(value)}" x2="${width - right}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${left - 8}" y="${y(value) + 4}" text-anchor="end">${Math.round(value)}</text>`;
      }

      const labelEvery = rows.length > 12 ? 4 : 1;
      const xLabels = rows
        .filter((_, index) => index % labelEvery === 0)
        .map((row) => `<text class="chart-label" x="${x(row.GESTATIONAL_AGE_WEEKS)}" y="${height - 10}" text-anchor="middle">${row.GESTATIONAL_AGE_WEEKS}w</text>`)
        .join('');

      const paths = view.fields
        .map((field) => {
          const points = rows.filter((row) => row[field] != null);
          if (!points.length) {
            return '';
          }
          const d = points
            .map((row, index) => `${index === 0 ? 'M' : 'L'} ${x(row.GESTATIONAL_AGE_WEEKS).toFixed(2)} ${y(row[field]).toFixed(2)}`)
            .join(' ');
          return `<path class="${seriesClass(field)}" d="${d}"><title>${field} (${view.unit})</title></path>`;
        })
        .join('');

      chartEl.innerHTML = `${grid}${paths}${xLabels}`;
    };

    const loadSummary = async () => {
      const address = addressEl.value;
      const query = address === 'all' ? '' : `?address=${encodeURIComponent(address)}`;
      renderSummary(await getJson(`/api/home-summary${query}`));
    };

    const loadChart = async () => {
      chartTitleEl.textContent = TITLES[activeMetric];
      if (!patientEl.value) {
        renderChart({ rows: [], fields: [], range: { min: 0, max: 100 }, unit: '' });
        return;
      }
      const id = encodeURIComponent(patientEl.value);
      renderChart(await getJson(`/api/patients/${id}/charts/${activeMetric}`));
    };

    const init = async () => {
      const [addresses, patients] = await Promise.all([
        getJson('/api/patient-addresses'),
        getJson('/api/patients')
      ]);
      addressEl.replaceChildren(
        ...addresses.addresses.map((option) => new Option(option.label, option.value))
      );
      patientEl.replaceChildren(
        ...patients.map((patient) => new Option(patient.name, patient.id))
      );
      await Promise.all([loadSummary(), loadChart()]);
    };

    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        activeMetric = button.dataset.metric;
        tabs.forEach((tab) => tab.classList.toggle('active', tab === button));
        loadChart().catch((err) => setStatus(err.message, 'error'));
      });
    });

    addressEl.addEventListener('change', () => {
      loadSummary().catch((err) => setStatus(err.message, 'error'));
    });

    patientEl.addEventListener('change', () => {
      loadChart().catch((err) => setStatus(err.message, 'error'));
    });

    init().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
