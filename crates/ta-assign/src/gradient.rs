//! Gradient-projection flow adjustment.

use ta_column::ColumnPool;

/// Denominator floor for the relative cost difference.
const MIN_COST: f64 = 1e-4;

/// Shift flow toward each key's cheapest column.
///
/// For every key with at least two columns, column `c` gives up
///
/// ```text
/// min(vol_c, step × od_volume × (cost_c − cost_min) / max(cost_min, 1e-4))
/// ```
///
/// with `step = 1 / (inner_iter + 2)`, and the cheapest column (lowest
/// index on ties) receives the sum.  Key totals are unchanged and no volume
/// goes negative.  Column costs are read, not refreshed.
///
/// Returns the total volume moved.
pub fn update_column_gradient_and_flow(columns: &mut ColumnPool, inner_iter: u16) -> f64 {
    let step = 1.0 / (f64::from(inner_iter) + 2.0);
    let mut total_moved = 0.0;

    for (_, cv) in columns.iter_mut() {
        if cv.len() < 2 {
            continue;
        }
        let Some(best) = cv.min_cost_index() else {
            continue;
        };
        let od_volume = cv.od_volume();
        let min_cost = cv.columns()[best].travel_time;
        let denom = min_cost.max(MIN_COST);

        let mut moved = 0.0;
        for (i, col) in cv.columns_mut().iter_mut().enumerate() {
            if i == best || col.volume <= 0.0 {
                continue;
            }
            let diff = col.travel_time - min_cost;
            // NaN (both infinite) and ties move nothing.
            if diff.is_nan() || diff <= 0.0 {
                continue;
            }
            let shift = (step * od_volume * diff / denom).min(col.volume);
            col.volume -= shift;
            moved += shift;
        }
        cv.columns_mut()[best].volume += moved;
        total_moved += moved;
    }
    total_moved
}
