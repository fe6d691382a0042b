//! Primary signal selection.

use crate::types::{NamedSignal, PrimarySignal};
use std::cmp::Reverse;

/// Select the primary signal: stable-sort the applicable signals
/// descending by strength rank (ties keep rule order) and take the
/// strongest. An empty set yields the fixed HOLD/NEUTRAL default.
pub fn aggregate(mut signals: Vec<NamedSignal>) -> PrimarySignal {
    let active = signals.len();
    if active == 0 {
        return PrimarySignal::default_hold();
    }

    signals.sort_by_key(|s| Reverse(s.signal.strength.rank()));
    let strongest = signals.swap_remove(0).signal;
    let color = strongest.kind.color();

    PrimarySignal {
        signal: strongest,
        active_strategies: active,
        color,
    }
}
