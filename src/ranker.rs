use crate::model::Deal;

/// Highest discount first. The sort is stable, so equal discounts keep
/// their incoming order.
pub fn rank_by_discount(deals: &mut [Deal]) {
    deals.sort_by(|a, b| b.discount_pct.cmp(&a.discount_pct));
}

pub fn top(deals: &[Deal], limit: usize) -> &[Deal] {
    &deals[..deals.len().min(limit)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;

    fn deal(name: &str, price: f64, original: f64) -> Deal {
        Deal::new(name.to_string(), price, original, String::new(), Source::Wtso, Vec::new())
    }

    #[test]
    fn ranks_by_discount_with_stable_ties() {
        // discounts: 20, 50, 35, 50, 10
        let mut deals = vec![
            deal("a", 80.0, 100.0),
            deal("b", 50.0, 100.0),
            deal("c", 65.0, 100.0),
            deal("d", 25.0, 50.0),
            deal("e", 90.0, 100.0),
        ];
        rank_by_discount(&mut deals);

        let order: Vec<(&str, u8)> =
            deals.iter().map(|d| (d.name.as_str(), d.discount_pct)).collect();
        assert_eq!(order, vec![("b", 50), ("d", 50), ("c", 35), ("a", 20), ("e", 10)]);
    }

    #[test]
    fn top_slice_caps_what_goes_to_the_notifier() {
        let mut deals = vec![
            deal("a", 80.0, 100.0),
            deal("b", 50.0, 100.0),
            deal("c", 65.0, 100.0),
            deal("d", 25.0, 50.0),
            deal("e", 90.0, 100.0),
        ];
        rank_by_discount(&mut deals);

        let picked = top(&deals, 3);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked[0].name, "b");
        assert_eq!(picked[2].name, "c");

        assert_eq!(top(&deals[..2], 3).len(), 2);
    }
}
