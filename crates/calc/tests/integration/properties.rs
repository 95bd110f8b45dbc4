//! Arithmetic properties of groups and aggregates.

use formtype_calc::prelude::*;
use proptest::prelude::*;

fn cents() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(-1_000_000_i64..1_000_000, 0..16)
}

proptest! {
    #[test]
    fn group_addition_matches_sum(values in cents()) {
        let group = values
            .iter()
            .fold(Group::new(), |group, &c| group.plus(Number(c as f64)));
        let sum = Aggregate::sum().with(values.iter().map(|&c| c as f64).collect::<List>());

        let expected: i64 = values.iter().sum();
        let group = group.evaluate().unwrap();
        if values.is_empty() {
            prop_assert_eq!(group, CalcValue::Null);
        } else {
            prop_assert_eq!(group, CalcValue::Number(expected as f64));
        }
        prop_assert_eq!(sum.evaluate().unwrap(), CalcValue::Number(expected as f64));
    }

    #[test]
    fn nulls_never_change_a_group(values in cents(), nulls in 0_usize..4) {
        let mut plain = Group::new();
        let mut padded = Group::new();
        for &c in &values {
            plain = plain.plus(Number(c as f64));
            padded = padded.plus(Number(c as f64));
            for _ in 0..nulls {
                padded = padded.times(Null);
            }
        }
        prop_assert_eq!(plain.evaluate().unwrap(), padded.evaluate().unwrap());
    }

    #[test]
    fn a_nan_anywhere_poisons(values in cents(), at in 0_usize..16) {
        let at = at.min(values.len());
        let mut group = Group::new();
        for (i, &c) in values.iter().enumerate() {
            if i == at {
                group = group.plus(NaN);
            }
            group = group.plus(Number(c as f64));
        }
        if at == values.len() {
            group = group.plus(NaN);
        }
        prop_assert_eq!(group.evaluate().unwrap(), CalcValue::NaN);
    }
}
