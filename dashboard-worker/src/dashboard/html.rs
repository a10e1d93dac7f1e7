//! Dashboard HTML template
//!
//! Header plus one slot per card. Slots start with the loading card and are
//! replaced by the fragments served under `/cards/`.

pub const TEMPLATE: &str = r#"
    <div class="container">
        <header>
            <div>
                <h1>📊 Dashboard</h1>
                <span class="refresh-time" id="refreshTime">Loading...</span>
            </div>
        </header>

        <div class="grid">
            <section id="weather-card">{loading}</section>
            <section id="crypto-card">{loading}</section>
            <section id="portfolios-card">{loading}</section>
        </div>
    </div>
"#;
