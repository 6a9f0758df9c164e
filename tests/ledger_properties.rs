use proptest::prelude::*;

use splitledger::engine::{compute_balances, plan_settlement, SETTLED_THRESHOLD};
use splitledger::models::{Expense, GroupId, Member, MemberId, Money, Payment, Split};

fn members(n: usize) -> Vec<Member> {
    (0..n)
        .map(|i| Member::with_id(format!("m{}", i), format!("Member {}", i)))
        .collect()
}

fn group() -> GroupId {
    GroupId::from("g")
}

/// Pick the members flagged in `mask`, falling back to the payer
fn participants(members: &[Member], mask: &[bool], payer: usize) -> Vec<MemberId> {
    let picked: Vec<MemberId> = members
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(m, _)| m.id.clone())
        .collect();
    if picked.is_empty() {
        vec![members[payer].id.clone()]
    } else {
        picked
    }
}

#[derive(Debug, Clone)]
struct RawExpense {
    payer: usize,
    cents: i64,
    mask: Vec<bool>,
    custom: bool,
}

fn raw_expense(n: usize) -> impl Strategy<Value = RawExpense> {
    (0..n, 1i64..100_000, prop::collection::vec(any::<bool>(), n), any::<bool>()).prop_map(
        |(payer, cents, mask, custom)| RawExpense {
            payer,
            cents,
            mask,
            custom,
        },
    )
}

fn scenario() -> impl Strategy<Value = (usize, Vec<RawExpense>)> {
    (2usize..7).prop_flat_map(|n| (Just(n), prop::collection::vec(raw_expense(n), 0..15)))
}

/// Equal splits with arbitrary amounts (sub-cent shares)
fn build_any(members: &[Member], raw: &[RawExpense]) -> Vec<Expense> {
    raw.iter()
        .map(|r| {
            Expense::equal(
                group(),
                "e",
                Money::from_cents(r.cents),
                members[r.payer].id.clone(),
                participants(members, &r.mask, r.payer),
            )
        })
        .collect()
}

/// Expenses whose shares are all whole cents: equal splits use an amount
/// divisible by the head count, custom splits give every share in cents
fn build_exact(members: &[Member], raw: &[RawExpense]) -> Vec<Expense> {
    raw.iter()
        .map(|r| {
            let among = participants(members, &r.mask, r.payer);
            let per_head = r.cents;
            if r.custom {
                let splits: Vec<Split> = among
                    .iter()
                    .enumerate()
                    .map(|(i, id)| Split::new(id.clone(), Money::from_cents(per_head + i as i64)))
                    .collect();
                let total = splits.iter().map(|s| s.amount).sum();
                Expense::custom(group(), "e", total, members[r.payer].id.clone(), splits)
            } else {
                let total = Money::from_cents(per_head * among.len() as i64);
                Expense::equal(group(), "e", total, members[r.payer].id.clone(), among)
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn balances_are_conserved((n, raw) in scenario()) {
        let members = members(n);
        let expenses = build_any(&members, &raw);

        let sheet = compute_balances(&members, &expenses, &[]);
        prop_assert_eq!(sheet.balances().len(), n);
        prop_assert!(sheet.is_clean());
        // Each member's rounding moves the sum by at most half a cent
        prop_assert!(sheet.total().cents().abs() <= n as i64);
    }

    #[test]
    fn exact_expenses_sum_to_zero((n, raw) in scenario()) {
        let members = members(n);
        let expenses = build_exact(&members, &raw);

        let sheet = compute_balances(&members, &expenses, &[]);
        prop_assert_eq!(sheet.total(), Money::zero());
    }

    #[test]
    fn planning_is_deterministic((n, raw) in scenario()) {
        let members = members(n);
        let sheet = compute_balances(&members, &build_any(&members, &raw), &[]);

        prop_assert_eq!(plan_settlement(sheet.balances()), plan_settlement(sheet.balances()));
    }

    #[test]
    fn transfers_are_positive_and_between_different_members((n, raw) in scenario()) {
        let members = members(n);
        let sheet = compute_balances(&members, &build_any(&members, &raw), &[]);

        for transfer in plan_settlement(sheet.balances()).transfers {
            prop_assert!(transfer.amount.is_positive());
            prop_assert_ne!(transfer.debtor_id, transfer.creditor_id);
        }
    }

    #[test]
    fn applying_the_plan_settles_everyone((n, raw) in scenario()) {
        let members = members(n);
        let expenses = build_exact(&members, &raw);

        let sheet = compute_balances(&members, &expenses, &[]);
        let plan = plan_settlement(sheet.balances());
        prop_assert!(plan.unresolved.is_empty());

        let payments: Vec<Payment> = plan
            .transfers
            .iter()
            .map(|t| Payment::new(group(), t.debtor_id.clone(), t.creditor_id.clone(), t.amount))
            .collect();

        let after = compute_balances(&members, &expenses, &payments);
        for balance in after.balances() {
            prop_assert!(balance.balance.abs() <= SETTLED_THRESHOLD, "{:?}", balance);
        }
        prop_assert!(plan_settlement(after.balances()).is_settled());
    }

    #[test]
    fn custom_splits_override_split_among((n, raw) in scenario()) {
        let members = members(n);
        let custom_only = build_exact(&members, &raw);

        // Same expenses, but every custom one also lists all members in split_among
        let with_among: Vec<Expense> = custom_only
            .iter()
            .cloned()
            .map(|mut e| {
                if e.uses_custom_splits() {
                    e.split_among = members.iter().map(|m| m.id.clone()).collect();
                }
                e
            })
            .collect();

        prop_assert_eq!(
            compute_balances(&members, &custom_only, &[]),
            compute_balances(&members, &with_among, &[])
        );
    }
}

#[test]
fn one_hundred_split_three_ways_still_settles() {
    let members = members(3);
    let among: Vec<MemberId> = members.iter().map(|m| m.id.clone()).collect();
    let expense = Expense::equal(
        group(),
        "Dinner",
        Money::from_cents(10_000),
        members[0].id.clone(),
        among,
    );

    let sheet = compute_balances(&members, &[expense], &[]);
    let cents: Vec<i64> = sheet.balances().iter().map(|b| b.balance.cents()).collect();
    assert_eq!(cents, vec![6_667, -3_333, -3_333]);

    let plan = plan_settlement(sheet.balances());
    assert_eq!(plan.transfers.len(), 2);
    assert!(plan.unresolved.is_empty());
}
