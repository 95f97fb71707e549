//! Deterministic CSV generators.
//!
//! These generators create predictable, verifiable data so rendered output
//! can be compared byte-for-byte across runs.

/// Creates a two-column numeric CSV with `rows` rows.
///
/// Column `x` counts from 0; column `y` is `x * slope + (x % 3)`, giving a
/// mostly linear series with a small repeating wobble.
///
/// # Example
///
/// ```
/// use test_utils::create_linear_csv;
///
/// let csv = create_linear_csv(3, 2.0);
/// assert_eq!(csv, "x,y\n0,0\n1,3\n2,6\n");
/// ```
pub fn create_linear_csv(rows: usize, slope: f64) -> String {
    let mut out = String::from("x,y\n");
    for i in 0..rows {
        let x = i as f64;
        let y = x * slope + (i % 3) as f64;
        out.push_str(&format!("{},{}\n", x, y));
    }
    out
}

/// Creates a CSV with `columns` numeric columns named `c0..cN`.
///
/// Column `k` holds `row * (k + 1)` plus a per-column phase, so every pair
/// is strongly but not perfectly correlated.
pub fn create_numeric_table(rows: usize, columns: usize) -> String {
    let header: Vec<String> = (0..columns).map(|k| format!("c{}", k)).collect();
    let mut out = header.join(",");
    out.push('\n');
    for row in 0..rows {
        let cells: Vec<String> = (0..columns)
            .map(|k| {
                let value = (row * (k + 1)) as f64 + ((row + k) % 4) as f64 * 0.5;
                format!("{}", value)
            })
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

/// Creates a grouped CSV with `groups` categories of `per_group` samples.
///
/// Categories are named `g0..gN` and appear in round-robin order.
pub fn create_grouped_csv(groups: usize, per_group: usize) -> String {
    let mut out = String::from("group,value\n");
    for i in 0..per_group {
        for g in 0..groups {
            let value = g as f64 * 10.0 + (i as f64 * 1.7) % 5.0;
            out.push_str(&format!("g{},{}\n", g, value));
        }
    }
    out
}
