//! Interactive HTML dashboard renderer.
//!
//! Generates one standalone HTML file with the full record tree embedded as
//! literal data. Features:
//! - Home view with one button per year and run metadata
//! - Monthly dashboard with KPI cards, a metric table, and the cumulative
//!   chart (budget-pacing trend included)
//! - Whole-year view rendering the 13-slot histogram on a dual axis
//! - Cross-year comparison with per-year toggles
//! - Warning banner for sources that failed to load
//!
//! The only remote assets are the charting script and a web font; every view
//! switch and chart redraw happens client-side with no network calls.

use budgetpace_core::{MonthNames, RenderError, Renderer, Report, RunSummary};
use std::collections::BTreeMap;

use crate::data;

/// Dashboard color theme
#[derive(Clone, Debug)]
pub struct DashboardTheme {
    pub primary: String,
    pub accent: String,
    pub success: String,
    pub danger: String,
    pub ordered_color: String,
    pub produced_color: String,
    pub background: String,
    pub card_background: String,
    pub text: String,
    pub text_muted: String,
    pub banner: String,
}

impl Default for DashboardTheme {
    fn default() -> Self {
        Self {
            primary: "#2c3e50".into(),
            accent: "#3498db".into(),
            success: "#27ae60".into(),
            danger: "#e74c3c".into(),
            ordered_color: "#9b59b6".into(),
            produced_color: "#2ecc71".into(),
            background: "#f8f9fa".into(),
            card_background: "#ffffff".into(),
            text: "#2c3e50".into(),
            text_muted: "#7f8c8d".into(),
            banner: "#f39c12".into(),
        }
    }
}

/// HTML dashboard renderer configuration
#[derive(Clone, Debug)]
pub struct DashboardRenderer {
    /// Document and home-view title
    pub title: String,
    /// BCP-47 tag fed to the client-side number formatter
    pub locale: String,
    /// ISO 4217 currency code for amount display
    pub currency: String,
    /// Display names for month keys (0 = whole year)
    pub month_names: MonthNames,
    /// URL of the charting script
    pub chart_script_url: String,
    /// URL of the web font stylesheet
    pub font_stylesheet_url: String,
    /// Color theme
    pub theme: DashboardTheme,
}

impl Default for DashboardRenderer {
    fn default() -> Self {
        Self {
            title: "Budget Dashboard".into(),
            locale: "en-US".into(),
            currency: "EUR".into(),
            month_names: MonthNames::default(),
            chart_script_url: "https://cdn.jsdelivr.net/npm/chart.js".into(),
            font_stylesheet_url:
                "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;600;700&display=swap"
                    .into(),
            theme: DashboardTheme::default(),
        }
    }
}

impl DashboardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dashboard title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the number-formatting locale tag
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the display currency code
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the month display names
    pub fn month_names(mut self, names: MonthNames) -> Self {
        self.month_names = names;
        self
    }

    /// Generate the complete HTML document
    fn generate_html(&self, data_json: &str, summary: &RunSummary) -> Result<String, RenderError> {
        let css = self.generate_css();
        let js = self.generate_js(data_json)?;
        let banner = self.generate_banner(&summary.warnings);

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{chart_src}"></script>
    <link href="{font_href}" rel="stylesheet">
    <style>
{css}
    </style>
</head>
<body>
{banner}
    <!-- VIEW: HOME -->
    <div id="view-home" class="view active">
        <div class="home-container">
            <div class="home-title">{title}</div>
            <div id="year-buttons" class="year-grid"></div>
            <div class="home-compare">
                <button class="year-btn compare-btn" onclick="goToComparison()">Compare Years</button>
            </div>
            <div class="home-meta">
                Last updated: <strong>{last_update}</strong>
                <span class="meta-sep">&bull;</span>
                Holidays loaded: <strong>{holidays}</strong>
                <span class="meta-sep">&bull;</span>
                Budget rows: <strong>{budget_rows}</strong>
                <span class="meta-sep">&bull;</span>
                Result rows: <strong>{result_rows}</strong>
            </div>
        </div>
    </div>

    <!-- VIEW: COMPARISON -->
    <div id="view-comparison" class="view">
        <div class="top-bar">
            <button class="back-btn" onclick="goHome()">&larr; Back to home</button>
            <h1 class="comparison-title">Year Comparison</h1>
        </div>
        <div class="panel">
            <div class="comp-controls">
                <strong>Show years:</strong>
                <div id="comp-toggles"></div>
            </div>
            <div class="chart-wrapper tall">
                <canvas id="comp-chart"></canvas>
            </div>
        </div>
    </div>

    <!-- VIEW: DASHBOARD -->
    <div id="view-dashboard" class="view">
        <div class="top-bar">
            <button class="back-btn" onclick="goHome()">&larr; Choose another year</button>
            <div class="controls">
                <h1 id="year-display"></h1>
                <select id="month-selector" onchange="selectMonth(this.value)"></select>
            </div>
        </div>

        <div class="kpi-grid">
            <div class="kpi-card kpi-days-card">
                <div class="kpi-title">Working Days</div>
                <div class="kpi-value" id="kpi-days">-</div>
            </div>
            <div class="kpi-card kpi-budget-card">
                <div class="kpi-title">Budget Target</div>
                <div class="kpi-value" id="kpi-budget">-</div>
            </div>
            <div class="kpi-card" id="kpi-card-perf">
                <div class="kpi-title">Realization</div>
                <div class="kpi-value" id="kpi-percent">-%</div>
            </div>
        </div>

        <div class="row">
            <div class="panel">
                <h2>Period Performance</h2>
                <div class="metric-row">
                    <span>Shipped</span>
                    <span class="metric-val" id="val-shipped">-</span>
                </div>
                <div class="metric-row">
                    <span>Variance vs Budget</span>
                    <span class="metric-val" id="val-diff">-</span>
                </div>
                <h2 class="panel-section">Orders &amp; Production</h2>
                <div class="metric-row">
                    <span>Ordered</span>
                    <span class="metric-val" id="val-ordered">-</span>
                </div>
                <div class="metric-row">
                    <span>Produced</span>
                    <span class="metric-val" id="val-produced">-</span>
                </div>
            </div>
            <div class="panel">
                <h2>Cumulative Trend</h2>
                <div class="chart-wrapper">
                    <canvas id="main-chart"></canvas>
                </div>
            </div>
        </div>
    </div>

    <script>
{js}
    </script>
</body>
</html>"#,
            title = html_escape(&self.title),
            chart_src = html_escape(&self.chart_script_url),
            font_href = html_escape(&self.font_stylesheet_url),
            css = css,
            banner = banner,
            last_update = html_escape(&summary.last_update_label()),
            holidays = summary.holidays_loaded,
            budget_rows = summary.budget_rows,
            result_rows = summary.result_rows,
            js = js,
        ))
    }

    /// Warning banner markup; empty string when the run was clean
    fn generate_banner(&self, warnings: &[String]) -> String {
        if warnings.is_empty() {
            return String::new();
        }
        let messages = warnings
            .iter()
            .map(|w| html_escape(w))
            .collect::<Vec<_>>()
            .join("<br>");
        format!(r#"    <div class="warning-banner">{messages}</div>"#)
    }

    fn generate_css(&self) -> String {
        format!(
            r#"        :root {{
            --primary: {primary};
            --accent: {accent};
            --success: {success};
            --danger: {danger};
            --ordered: {ordered};
            --produced: {produced};
            --bg: {bg};
            --card-bg: {card_bg};
            --text: {text};
            --text-muted: {muted};
        }}
        body {{
            font-family: 'Inter', system-ui, sans-serif;
            background: var(--bg);
            color: var(--text);
            margin: 0;
            padding: 0;
            min-height: 100vh;
        }}
        .warning-banner {{
            background: {banner};
            color: white;
            text-align: center;
            padding: 10px;
            font-weight: 600;
        }}
        .view {{
            display: none;
            padding: 2rem;
            max-width: 1200px;
            margin: 0 auto;
            animation: fadein 0.3s;
        }}
        .view.active {{ display: block; }}
        @keyframes fadein {{
            from {{ opacity: 0; transform: translateY(10px); }}
            to {{ opacity: 1; transform: translateY(0); }}
        }}
        .home-container {{ text-align: center; margin-top: 10vh; }}
        .home-title {{
            font-size: 2.5rem;
            font-weight: 700;
            margin-bottom: 3rem;
            color: var(--primary);
        }}
        .year-grid {{
            display: flex;
            justify-content: center;
            gap: 2rem;
            flex-wrap: wrap;
        }}
        .year-btn {{
            background: var(--card-bg);
            border: 2px solid var(--accent);
            color: var(--accent);
            font-size: 2rem;
            padding: 2rem 4rem;
            border-radius: 12px;
            cursor: pointer;
            transition: all 0.2s ease;
            box-shadow: 0 4px 6px rgba(0,0,0,0.05);
            font-weight: 600;
        }}
        .year-btn:hover {{
            background: var(--accent);
            color: white;
            transform: translateY(-5px);
        }}
        .home-compare {{ margin-top: 3rem; }}
        .compare-btn {{
            font-size: 1.2rem;
            padding: 1rem 2rem;
            border-color: var(--ordered);
            color: var(--ordered);
        }}
        .compare-btn:hover {{ background: var(--ordered); }}
        .home-meta {{
            margin-top: 3rem;
            color: var(--text-muted);
            font-size: 0.9rem;
        }}
        .meta-sep {{ margin: 0 10px; }}
        .top-bar {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 2rem;
        }}
        .back-btn {{
            background: none;
            border: none;
            color: var(--text-muted);
            font-weight: 600;
            cursor: pointer;
            font-size: 1rem;
            padding: 0.5rem 1rem;
            border-radius: 6px;
        }}
        .back-btn:hover {{ background: rgba(0,0,0,0.05); color: var(--primary); }}
        .controls {{ display: flex; gap: 1rem; align-items: center; }}
        .controls h1 {{ margin: 0; font-size: 1.5rem; }}
        .comparison-title {{ margin: 0; font-size: 1.5rem; color: var(--ordered); }}
        select {{
            padding: 0.8rem 1.5rem;
            border-radius: 8px;
            border: 1px solid #ddd;
            font-size: 1rem;
            font-family: inherit;
            cursor: pointer;
            background: white;
            outline: none;
        }}
        .kpi-grid {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 1.5rem;
            margin-bottom: 2rem;
        }}
        .kpi-card {{
            background: var(--card-bg);
            padding: 1.5rem;
            border-radius: 12px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.03);
            border-left: 5px solid transparent;
        }}
        .kpi-days-card {{ border-color: var(--accent); }}
        .kpi-budget-card {{ border-color: var(--primary); }}
        .kpi-title {{
            font-size: 0.85rem;
            text-transform: uppercase;
            color: var(--text-muted);
            letter-spacing: 0.5px;
            margin-bottom: 0.5rem;
        }}
        .kpi-value {{ font-size: 1.8rem; font-weight: 700; color: var(--primary); }}
        .row {{
            display: grid;
            grid-template-columns: 1fr 2fr;
            gap: 2rem;
            margin-bottom: 2rem;
        }}
        @media (max-width: 900px) {{ .row {{ grid-template-columns: 1fr; }} }}
        .panel {{
            background: var(--card-bg);
            padding: 2rem;
            border-radius: 12px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.03);
        }}
        .panel h2 {{
            margin-top: 0;
            border-bottom: 1px solid #eee;
            padding-bottom: 1rem;
            font-size: 1.2rem;
        }}
        .panel-section {{ margin-top: 2rem; }}
        .metric-row {{
            display: flex;
            justify-content: space-between;
            padding: 1rem 0;
            border-bottom: 1px solid #f0f0f0;
        }}
        .metric-row:last-child {{ border-bottom: none; }}
        .metric-val {{ font-family: 'Consolas', monospace; font-weight: 600; }}
        .comp-controls {{ margin-bottom: 1rem; }}
        #comp-toggles {{
            display: flex;
            gap: 1rem;
            flex-wrap: wrap;
            margin-top: 0.5rem;
        }}
        #comp-toggles label {{
            display: flex;
            align-items: center;
            gap: 5px;
            cursor: pointer;
            user-select: none;
        }}
        .chart-wrapper {{ position: relative; height: 400px; width: 100%; }}
        .chart-wrapper.tall {{ height: 500px; }}
        .positive {{ color: var(--success); }}
        .negative {{ color: var(--danger); }}"#,
            primary = self.theme.primary,
            accent = self.theme.accent,
            success = self.theme.success,
            danger = self.theme.danger,
            ordered = self.theme.ordered_color,
            produced = self.theme.produced_color,
            bg = self.theme.background,
            card_bg = self.theme.card_background,
            text = self.theme.text,
            muted = self.theme.text_muted,
            banner = self.theme.banner,
        )
    }

    /// Generate the view/state script with the record tree embedded
    fn generate_js(&self, data_json: &str) -> Result<String, RenderError> {
        let month_names: BTreeMap<String, String> = (0u32..=12)
            .map(|m| (m.to_string(), self.month_names.label(m)))
            .collect();
        let month_names_json =
            serde_json::to_string(&month_names).map_err(|e| RenderError::Format(e.to_string()))?;
        // JSON string literals double as safely quoted JS literals
        let locale_js =
            serde_json::to_string(&self.locale).map_err(|e| RenderError::Format(e.to_string()))?;
        let currency_js = serde_json::to_string(&self.currency)
            .map_err(|e| RenderError::Format(e.to_string()))?;

        Ok(format!(
            r#"        const DB_DATA = {data};
        const MONTH_NAMES = {month_names};
        const LOCALE = {locale};
        const CURRENCY = {currency};

        const SERIES_COLORS = {{
            budget: '{danger}',
            shipped: '{accent}',
            ordered: '{ordered}',
            produced: '{produced}'
        }};
        const COMPARE_COLORS = ['{accent}', '{danger}', '{ordered}', '{produced}', '#f1c40f', '#34495e'];

        let currentYear = null;
        let currentMonth = null;
        let mainChart = null;
        let compChart = null;

        const money = new Intl.NumberFormat(LOCALE, {{ style: 'currency', currency: CURRENCY }});
        const wholeMoney = new Intl.NumberFormat(LOCALE, {{
            style: 'currency', currency: CURRENCY, maximumFractionDigits: 0
        }});

        function formatMoney(amount) {{
            return money.format(amount);
        }}

        function show(viewId) {{
            document.querySelectorAll('.view').forEach(v => v.classList.remove('active'));
            document.getElementById(viewId).classList.add('active');
        }}

        function initHome() {{
            const container = document.getElementById('year-buttons');
            container.innerHTML = '';
            const years = Object.keys(DB_DATA).sort((a, b) => a - b);
            years.forEach(y => {{
                const btn = document.createElement('div');
                btn.className = 'year-btn';
                btn.innerText = y;
                btn.onclick = () => selectYear(y);
                container.appendChild(btn);
            }});
        }}

        function goHome() {{
            show('view-home');
        }}

        function selectYear(year) {{
            currentYear = year;
            show('view-dashboard');
            document.getElementById('year-display').innerText = year;

            const monthSelect = document.getElementById('month-selector');
            monthSelect.innerHTML = '';
            // "0" sorts first, so the whole-year view is the default
            const months = Object.keys(DB_DATA[year]).sort((a, b) => parseInt(a) - parseInt(b));
            months.forEach(m => {{
                const opt = document.createElement('option');
                opt.value = m;
                opt.innerText = MONTH_NAMES[m] || m;
                monthSelect.appendChild(opt);
            }});
            if (months.length > 0) {{
                selectMonth(months[0]);
            }}
        }}

        function selectMonth(m) {{
            currentMonth = m;
            document.getElementById('month-selector').value = m;
            updateDashboard();
        }}

        function updateDashboard() {{
            if (!currentYear || currentMonth === null) return;
            const data = DB_DATA[currentYear][currentMonth];

            document.getElementById('kpi-days').innerText = data.working_days;
            document.getElementById('kpi-budget').innerText = formatMoney(data.budget);

            const percent = data.budget > 0 ? (data.shipped / data.budget * 100) : 0;
            const kpiPercent = document.getElementById('kpi-percent');
            kpiPercent.innerText = percent.toFixed(1) + '%';
            const onTarget = percent >= 100;
            document.getElementById('kpi-card-perf').style.borderColor =
                onTarget ? 'var(--success)' : 'var(--danger)';
            kpiPercent.className = 'kpi-value ' + (onTarget ? 'positive' : 'negative');

            document.getElementById('val-shipped').innerText = formatMoney(data.shipped);
            document.getElementById('val-ordered').innerText = formatMoney(data.ordered);
            document.getElementById('val-produced').innerText = formatMoney(data.produced);

            const diff = data.shipped - data.budget;
            const diffEl = document.getElementById('val-diff');
            diffEl.innerText = (diff > 0 ? '+' : '') + formatMoney(diff);
            diffEl.className = 'metric-val ' + (diff >= 0 ? 'positive' : 'negative');

            updateChart(data);
        }}

        // Split a 13-slot histogram into a monthly dataset and a total-only
        // dataset so the TOTAL bar can live on its own axis
        function splitSlots(series) {{
            return {{
                months: [...series.slice(0, 12), null],
                total: [...Array(12).fill(null), series[12]]
            }};
        }}

        function updateChart(data) {{
            const ctx = document.getElementById('main-chart').getContext('2d');
            if (mainChart) {{
                mainChart.destroy();
            }}

            const isHistogram = data.series_kind === 'monthly_histogram';
            const scales = {{
                y: {{ beginAtZero: true, position: 'left', grid: {{ color: '#f0f0f0' }} }},
                x: {{ grid: {{ display: false }} }}
            }};
            let datasets;

            if (isHistogram) {{
                scales.y.title = {{ display: true, text: 'Monthly' }};
                scales.y1 = {{
                    beginAtZero: true,
                    position: 'right',
                    grid: {{ drawOnChartArea: false }},
                    title: {{ display: true, text: 'Annual Total' }}
                }};

                const budget = splitSlots(data.chart_budget);
                const shipped = splitSlots(data.chart_shipped);
                const ordered = splitSlots(data.chart_ordered);
                const produced = splitSlots(data.chart_produced);

                datasets = [
                    {{ label: 'Budget', data: budget.months, type: 'line', borderColor: SERIES_COLORS.budget,
                       backgroundColor: SERIES_COLORS.budget, borderWidth: 2, pointRadius: 3, tension: 0.1, yAxisID: 'y' }},
                    {{ label: 'Budget (Total)', data: budget.total, backgroundColor: SERIES_COLORS.budget,
                       borderColor: SERIES_COLORS.budget, borderWidth: 1, yAxisID: 'y1' }},
                    {{ label: 'Shipped', data: shipped.months, backgroundColor: SERIES_COLORS.shipped,
                       borderColor: SERIES_COLORS.shipped, borderWidth: 1, yAxisID: 'y' }},
                    {{ label: 'Shipped (Total)', data: shipped.total, backgroundColor: SERIES_COLORS.shipped,
                       borderColor: SERIES_COLORS.shipped, borderWidth: 1, yAxisID: 'y1' }},
                    {{ label: 'Ordered', data: ordered.months, backgroundColor: SERIES_COLORS.ordered,
                       borderColor: SERIES_COLORS.ordered, borderWidth: 1, yAxisID: 'y' }},
                    {{ label: 'Ordered (Total)', data: ordered.total, backgroundColor: SERIES_COLORS.ordered,
                       borderColor: SERIES_COLORS.ordered, borderWidth: 1, yAxisID: 'y1' }},
                    {{ label: 'Produced', data: produced.months, backgroundColor: SERIES_COLORS.produced,
                       borderColor: SERIES_COLORS.produced, borderWidth: 1, yAxisID: 'y' }},
                    {{ label: 'Produced (Total)', data: produced.total, backgroundColor: SERIES_COLORS.produced,
                       borderColor: SERIES_COLORS.produced, borderWidth: 1, yAxisID: 'y1' }}
                ];
            }} else {{
                datasets = [
                    {{ label: 'Budget Pacing', data: data.chart_budget, type: 'line',
                       borderColor: SERIES_COLORS.budget, backgroundColor: 'transparent',
                       borderWidth: 2, borderDash: [2, 2], pointRadius: 0, tension: 0.1 }},
                    {{ label: 'Shipped', data: data.chart_shipped, borderColor: SERIES_COLORS.shipped,
                       backgroundColor: 'rgba(52, 152, 219, 0.1)', borderWidth: 3, fill: true, tension: 0.4 }},
                    {{ label: 'Ordered', data: data.chart_ordered, borderColor: SERIES_COLORS.ordered,
                       backgroundColor: 'transparent', borderWidth: 2, borderDash: [5, 5], tension: 0.4 }},
                    {{ label: 'Produced', data: data.chart_produced, borderColor: SERIES_COLORS.produced,
                       backgroundColor: 'transparent', borderWidth: 2, tension: 0.4 }}
                ];
            }}

            mainChart = new Chart(ctx, {{
                type: isHistogram ? 'bar' : 'line',
                data: {{ labels: data.labels, datasets: datasets }},
                options: {{
                    responsive: true,
                    maintainAspectRatio: false,
                    interaction: {{ mode: 'index', intersect: false }},
                    plugins: {{
                        legend: {{ position: 'bottom' }},
                        tooltip: {{
                            callbacks: {{
                                label: function(context) {{
                                    let label = context.dataset.label || '';
                                    if (label) label += ': ';
                                    if (context.parsed.y !== null) {{
                                        label += wholeMoney.format(context.parsed.y);
                                    }}
                                    return label;
                                }}
                            }}
                        }}
                    }},
                    scales: scales
                }}
            }});
        }}

        function goToComparison() {{
            show('view-comparison');
            initComparison();
        }}

        function initComparison() {{
            const years = Object.keys(DB_DATA).sort((a, b) => a - b);
            const container = document.getElementById('comp-toggles');
            container.innerHTML = '';
            years.forEach(y => {{
                const label = document.createElement('label');
                const cb = document.createElement('input');
                cb.type = 'checkbox';
                cb.value = y;
                cb.checked = true;
                cb.onchange = updateCompChart;
                label.appendChild(cb);
                label.appendChild(document.createTextNode(y));
                container.appendChild(label);
            }});
            updateCompChart();
        }}

        function updateCompChart() {{
            const checkboxes = document.querySelectorAll('#comp-toggles input[type="checkbox"]');
            const selectedYears = Array.from(checkboxes).filter(cb => cb.checked).map(cb => cb.value);

            const ctx = document.getElementById('comp-chart').getContext('2d');
            if (compChart) {{
                compChart.destroy();
            }}

            const datasets = [];
            selectedYears.forEach((y, idx) => {{
                const annual = DB_DATA[y] && DB_DATA[y]['0'];
                if (!annual) return;
                const shipped = splitSlots(annual.chart_shipped);
                const color = COMPARE_COLORS[idx % COMPARE_COLORS.length];
                datasets.push({{
                    label: y, data: shipped.months, backgroundColor: color,
                    borderColor: color, borderWidth: 1, yAxisID: 'y'
                }});
                datasets.push({{
                    label: y + ' (Total)', data: shipped.total, backgroundColor: color,
                    borderColor: color, borderWidth: 1, yAxisID: 'y1'
                }});
            }});

            compChart = new Chart(ctx, {{
                type: 'bar',
                data: {{
                    labels: ['01', '02', '03', '04', '05', '06', '07', '08', '09', '10', '11', '12', 'TOTAL'],
                    datasets: datasets
                }},
                options: {{
                    responsive: true,
                    maintainAspectRatio: false,
                    interaction: {{ mode: 'index', intersect: false }},
                    plugins: {{
                        legend: {{
                            position: 'top',
                            labels: {{
                                filter: function(item) {{
                                    return !item.text.includes('(Total)');
                                }}
                            }}
                        }},
                        tooltip: {{
                            callbacks: {{
                                label: function(context) {{
                                    let label = context.dataset.label.replace(' (Total)', '') + ': ';
                                    if (context.parsed.y !== null) {{
                                        label += wholeMoney.format(context.parsed.y);
                                    }}
                                    return label;
                                }}
                            }}
                        }}
                    }},
                    scales: {{
                        y: {{
                            beginAtZero: true,
                            position: 'left',
                            title: {{ display: true, text: 'Monthly' }},
                            grid: {{ color: '#f0f0f0' }}
                        }},
                        y1: {{
                            beginAtZero: true,
                            position: 'right',
                            title: {{ display: true, text: 'Annual Total' }},
                            grid: {{ drawOnChartArea: false }}
                        }}
                    }}
                }}
            }});
        }}

        initHome();"#,
            data = data_json,
            month_names = month_names_json,
            locale = locale_js,
            currency = currency_js,
            danger = self.theme.danger,
            accent = self.theme.accent,
            ordered = self.theme.ordered_color,
            produced = self.theme.produced_color,
        ))
    }
}

impl Renderer for DashboardRenderer {
    type Output = String;

    fn render(&self, report: &Report, summary: &RunSummary) -> Result<String, RenderError> {
        let assembled = data::assemble(report);
        let data_json =
            serde_json::to_string(&assembled).map_err(|e| RenderError::Format(e.to_string()))?;
        self.generate_html(&data_json, summary)
    }
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
