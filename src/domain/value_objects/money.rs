//! Monetary amounts are integer minor currency units; tax rates are basis
//! points (23.00% = 2300). Intermediate math runs in i64 so a maximum
//! amount times a maximum rate cannot overflow.

/// Tax due on a net amount, rounded half up.
pub fn tax_total_minor(net_minor: i32, tax_rate_bp: i32) -> i32 {
    let scaled = i64::from(net_minor) * i64::from(tax_rate_bp);
    ((scaled + 5_000) / 10_000) as i32
}

/// Net amount plus tax. A missing rate means tax does not apply.
pub fn gross_minor(net_minor: i32, tax_rate_bp: Option<i32>) -> i32 {
    match tax_rate_bp {
        Some(rate) => net_minor + tax_total_minor(net_minor, rate),
        None => net_minor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_whole_percentages() {
        // 23% of 100.00
        assert_eq!(tax_total_minor(10_000, 2_300), 2_300);
    }

    #[test]
    fn rounds_half_up() {
        // 25% of 0.50 = 0.125 -> 0.13
        assert_eq!(tax_total_minor(50, 2_500), 13);
        // 23% of 1.01 = 0.2323 -> 0.23
        assert_eq!(tax_total_minor(101, 2_300), 23);
    }

    #[test]
    fn zero_rate_and_missing_rate_add_nothing() {
        assert_eq!(tax_total_minor(10_000, 0), 0);
        assert_eq!(gross_minor(10_000, None), 10_000);
        assert_eq!(gross_minor(10_000, Some(2_300)), 12_300);
    }
}
