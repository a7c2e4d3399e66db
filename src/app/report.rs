use crate::core::catalog::SetCatalog;
use crate::core::reducer::AggregateState;
use std::fmt::Write;

/// Renders the sweep result. While requests are pending only a loading line
/// is produced; cards are shown once the state has settled.
pub fn render_state(state: &AggregateState) -> String {
    let mut out = String::new();

    let Some(cards) = state.settled_cards() else {
        let _ = writeln!(out, "Loading ({} request(s) in flight)", state.pending_requests().len());
        return out;
    };

    if cards.is_empty() {
        let _ = writeln!(out, "No priced cards found.");
    } else {
        let name_width = cards.iter().map(|c| c.name.chars().count()).max().unwrap_or(4).max(4);
        let _ = writeln!(out, "{:>10}  {:<6}  {:<name_width$}  IMAGE", "EUR", "SET", "NAME");
        for card in cards {
            let _ = writeln!(
                out,
                "{:>10}  {:<6}  {:<name_width$}  {}",
                card.price().unwrap_or("-"),
                card.set,
                card.name,
                card.image_url().unwrap_or("-"),
            );
        }
    }

    if !state.failures().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Failed sets (results above are partial):");
        for (source, failure) in state.failures() {
            let _ = writeln!(out, "  {}: {}", source, failure.reason);
        }
    }

    out
}

pub fn render_sets(catalog: &SetCatalog) -> String {
    let mut out = String::new();
    for set in catalog.sets() {
        let _ = writeln!(
            out,
            "{:<6}  {:<10}  {}{}",
            set.code,
            set.released_at.as_deref().unwrap_or(""),
            set.name,
            if set.digital { " (digital)" } else { "" }
        );
    }
    out
}
