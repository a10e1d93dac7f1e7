//! Dashboard CSS styles
//!
//! Uses CSS custom properties (variables) for theming.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #0d1117;
    --card: #161b22;
    --border: #30363d;
    --text: #c9d1d9;
    --text-dim: #8b949e;
    --green: #3fb950;
    --red: #f85149;
    --blue: #58a6ff;
    --yellow: #d29922;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    padding: 20px;
    min-height: 100vh;
}

.container { max-width: 960px; margin: 0 auto; }

header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 24px;
    padding-bottom: 16px;
    border-bottom: 1px solid var(--border);
}

h1 { font-size: 24px; font-weight: 600; }
h3 { font-size: 18px; font-weight: 600; }

.refresh-time { font-size: 12px; color: var(--text-dim); }

/* Grid Layout */
.grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
    gap: 16px;
}

/* Cards */
.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 20px;
    height: 100%;
}

.card-loading {
    display: flex;
    align-items: center;
    justify-content: center;
    min-height: 200px;
}

.spinner {
    width: 32px;
    height: 32px;
    border: 3px solid var(--border);
    border-top-color: var(--text-dim);
    border-radius: 50%;
    animation: spin 0.8s linear infinite;
}

@keyframes spin { to { transform: rotate(360deg); } }

.card-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 16px;
}

.card-title {
    font-size: 14px;
    color: var(--text-dim);
    text-transform: uppercase;
    letter-spacing: 0.5px;
}

.card-value { font-size: 28px; font-weight: 700; margin-top: 8px; }
.card-error { color: var(--red); }

.btn-icon {
    background: none;
    border: none;
    border-radius: 50%;
    padding: 6px;
    cursor: pointer;
    font-size: 16px;
}

.btn-icon:hover { background: var(--border); }

.muted { color: var(--text-dim); }
.small { font-size: 12px; }
.placeholder { color: var(--text-dim); }
.divider { border-top: 1px solid var(--border); }

/* Weather */
.weather { display: flex; justify-content: space-between; align-items: center; }
.weather-icon { font-size: 40px; }

.clocks {
    display: grid;
    grid-template-columns: auto 1fr 1fr;
    gap: 12px;
    margin-top: 16px;
    padding-top: 16px;
    border-top: 1px solid var(--border);
    font-size: 13px;
    color: var(--text-dim);
}

.clock-label { color: var(--text); font-weight: 500; }

/* Crypto */
.prices { margin-bottom: 8px; }
.price-row {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 12px 0;
}

.price-asset { display: flex; align-items: center; gap: 12px; }
.asset-icon { font-size: 22px; }
.asset-pair { font-weight: 500; }
.price { font-size: 20px; font-weight: 700; }

/* Portfolios */
.portfolios { list-style: none; display: flex; flex-direction: column; gap: 10px; }

.portfolio {
    display: flex;
    gap: 12px;
    background: rgba(255, 255, 255, 0.03);
    border-radius: 8px;
    padding: 12px;
}

.portfolio-name { font-weight: 500; margin-bottom: 4px; }

/* Colors */
.positive { color: var(--green); }
.negative { color: var(--red); }

/* Responsive */
@media (max-width: 600px) {
    .grid { grid-template-columns: 1fr; }
    header { flex-direction: column; gap: 12px; }
}
";
