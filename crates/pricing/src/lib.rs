//! Percentage adjustment of formatted price strings.
//!
//! Prices reach this crate as display strings ("₹1,200", "$12.50", "Market
//! Price"). [`adjust`] rewrites only the first numeral run and leaves every
//! surrounding character (currency glyph, decimal tail, suffix) untouched,
//! re-applying the grouping convention the input used. A string without any
//! numerals passes through unchanged.

use carta_menu::{MenuItem, Price, SizeTier};
use log::debug;
use serde::{Deserialize, Serialize};

/// A transient, signed percentage applied to every price in a document.
/// Never written back to the catalog it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAdjustment {
    pub percent: f64,
}

impl PriceAdjustment {
    pub fn new(percent: f64) -> Self {
        Self { percent }
    }

    pub fn apply(&self, price: &str) -> String {
        adjust(price, self.percent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    /// No separators in the source ("1200").
    None,
    /// Groups of three ("1,200", "123,456").
    Thousands,
    /// Lakh/crore style: last group of three, then groups of two ("1,00,000").
    Indian,
}

/// Applies a signed percentage to the first numeral run of `price`.
///
/// The amount is rounded half-up. Results are not clamped; a percentage
/// below -100 produces a negative price.
pub fn adjust(price: &str, percent: f64) -> String {
    let Some((start, end)) = numeral_run(price) else {
        debug!("no numeral run in price {:?}, passing through", price);
        return price.to_string();
    };

    let run = &price[start..end];
    let digits: String = run.chars().filter(char::is_ascii_digit).collect();
    let Ok(amount) = digits.parse::<u64>() else {
        // Absurdly long runs overflow; treat like an unparsable price.
        debug!("numeral run {:?} does not fit an amount, passing through", run);
        return price.to_string();
    };

    // (a * (100 + p)) / 100 keeps whole-currency amounts exact in f64,
    // where a * (1 + p/100) already drifts for common percentages.
    let grouping = detect_grouping(run);
    let adjusted = round_half_up(amount as f64 * (100.0 + percent) / 100.0);
    let formatted = format_amount(adjusted, grouping);

    let mut result = String::with_capacity(price.len() + 4);
    result.push_str(&price[..start]);
    result.push_str(&formatted);
    result.push_str(&price[end..]);
    result
}

/// Byte range of the first maximal run of digits and grouping commas,
/// trimmed so it starts and ends on a digit.
fn numeral_run(s: &str) -> Option<(usize, usize)> {
    let start = s.char_indices().find(|(_, c)| c.is_ascii_digit())?.0;
    let mut end = start;
    for (i, c) in s[start..].char_indices() {
        if c.is_ascii_digit() || c == ',' {
            end = start + i + c.len_utf8();
        } else {
            break;
        }
    }
    // A trailing comma belongs to the surrounding text, not the amount.
    while s[start..end].ends_with(',') {
        end -= 1;
    }
    Some((start, end))
}

fn detect_grouping(run: &str) -> Grouping {
    let groups: Vec<&str> = run.split(',').collect();
    if groups.len() <= 1 {
        return Grouping::None;
    }
    let middles_are_pairs = groups[1..groups.len() - 1].iter().all(|g| g.len() == 2);
    if groups.len() >= 3 && middles_are_pairs && groups[groups.len() - 1].len() == 3 {
        Grouping::Indian
    } else {
        Grouping::Thousands
    }
}

/// Round half-up: exact halves go toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn format_amount(amount: i64, grouping: Grouping) -> String {
    let digits = amount.unsigned_abs().to_string();
    let grouped = match grouping {
        Grouping::None => digits,
        Grouping::Thousands => group_from_right(&digits, |_| 3),
        Grouping::Indian => group_from_right(&digits, |i| if i == 0 { 3 } else { 2 }),
    };
    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Splits `digits` into comma groups working from the right; `width(i)`
/// gives the size of the i-th group counted from the right.
fn group_from_right(digits: &str, width: impl Fn(usize) -> usize) -> String {
    let mut groups: Vec<&str> = Vec::new();
    let mut end = digits.len();
    let mut i = 0;
    while end > 0 {
        let w = width(i).min(end);
        groups.push(&digits[end - w..end]);
        end -= w;
        i += 1;
    }
    groups.reverse();
    groups.join(",")
}

/// Returns a copy of `price` with every populated field adjusted.
pub fn adjust_price(price: &Price, percent: f64) -> Price {
    match price {
        Price::Single(p) => Price::Single(adjust(p, percent)),
        Price::HalfFull { half, full } => Price::HalfFull {
            half: adjust(half, percent),
            full: adjust(full, percent),
        },
        Price::Tiered(tiers) => Price::Tiered(
            tiers
                .iter()
                .map(|tier| SizeTier {
                    label: tier.label.clone(),
                    price: adjust(&tier.price, percent),
                })
                .collect(),
        ),
    }
}

/// Returns a copy of `item` with its price form adjusted. Everything else
/// is cloned verbatim.
pub fn adjust_item(item: &MenuItem, percent: f64) -> MenuItem {
    MenuItem {
        price: adjust_price(&item.price, percent),
        ..item.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_increase() {
        assert_eq!(adjust("₹500", 10.0), "₹550");
    }

    #[test]
    fn test_grouped_decrease() {
        assert_eq!(adjust("₹1,200", -5.0), "₹1,140");
    }

    #[test]
    fn test_zero_percent_is_identity() {
        for price in ["₹500", "₹1,200", "₹1,00,000", "$12.50", "1200", "Market Price"] {
            assert_eq!(adjust(price, 0.0), price);
        }
    }

    #[test]
    fn test_no_numerals_pass_through() {
        assert_eq!(adjust("Seasonal", 25.0), "Seasonal");
        assert_eq!(adjust("", 25.0), "");
    }

    #[test]
    fn test_indian_grouping_preserved() {
        assert_eq!(adjust("₹1,00,000", 10.0), "₹1,10,000");
        assert_eq!(adjust("₹99,999", 0.0), "₹99,999");
    }

    #[test]
    fn test_ungrouped_stays_ungrouped() {
        assert_eq!(adjust("₹1200", 10.0), "₹1320");
    }

    #[test]
    fn test_decimal_tail_untouched() {
        // Only the integer run is adjusted; the fraction is surrounding text.
        assert_eq!(adjust("$12.50", 100.0), "$24.50");
    }

    #[test]
    fn test_suffix_untouched() {
        assert_eq!(adjust("₹250 per plate", 20.0), "₹300 per plate");
    }

    #[test]
    fn test_round_half_up() {
        // 15% of 150 is 172.5, which rounds up.
        assert_eq!(adjust("₹150", 15.0), "₹173");
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
    }

    #[test]
    fn test_negative_result_not_clamped() {
        assert_eq!(adjust("₹100", -150.0), "₹-50");
    }

    #[test]
    fn test_trailing_comma_not_part_of_run() {
        assert_eq!(adjust("₹500, incl. tax", 10.0), "₹550, incl. tax");
    }

    #[test]
    fn test_adjust_price_covers_every_form() {
        let half_full = Price::HalfFull { half: "₹100".into(), full: "₹180".into() };
        assert_eq!(
            adjust_price(&half_full, 10.0),
            Price::HalfFull { half: "₹110".into(), full: "₹198".into() }
        );

        let tiered = Price::Tiered(vec![
            SizeTier { label: "Quarter".into(), price: "₹200".into() },
            SizeTier { label: "Full".into(), price: "₹700".into() },
        ]);
        match adjust_price(&tiered, 50.0) {
            Price::Tiered(tiers) => {
                assert_eq!(tiers[0].price, "₹300");
                // "₹700" carries no separator, so the result stays ungrouped.
                assert_eq!(tiers[1].price, "₹1050");
            }
            other => panic!("expected tiered, got {:?}", other),
        }
    }
}
