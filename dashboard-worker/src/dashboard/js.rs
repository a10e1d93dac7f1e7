//! Dashboard JavaScript
//!
//! Browser side of the page controller:
//! - fetches each card fragment once on load
//! - re-fetches each card on its own interval
//! - refresh buttons call `refreshCard(name)`
//! - intervals are cleared when the page is torn down
//!
//! Expects a `CONFIG` object with `cards` (name -> interval ms) and
//! `loadingCard` (markup shown while a card is fetching).

pub const SCRIPT: &str = r#"
// ============================================================================
// State
// ============================================================================
const timers = [];

function escapeText(text) {
    const div = document.createElement('div');
    div.textContent = text;
    return div.innerHTML;
}

function updateTimestamp() {
    document.getElementById('refreshTime').textContent = 'Updated: ' + new Date().toLocaleTimeString();
}

// ============================================================================
// Card refresh
// ============================================================================
async function refreshCard(name) {
    const slot = document.getElementById(name + '-card');
    slot.innerHTML = CONFIG.loadingCard;

    try {
        const res = await fetch('/cards/' + name);
        slot.innerHTML = await res.text();
        updateTimestamp();
    } catch (e) {
        console.error(`Error refreshing ${name}:`, e);
        slot.innerHTML = '<div class="card"><div class="card-error">' + escapeText(e.message) + '</div></div>';
    }
}

// ============================================================================
// Initialization
// ============================================================================
for (const [name, interval] of Object.entries(CONFIG.cards)) {
    refreshCard(name);
    timers.push(setInterval(() => refreshCard(name), interval));
}

window.addEventListener('pagehide', () => {
    timers.forEach(clearInterval);
    timers.length = 0;
});
"#;
