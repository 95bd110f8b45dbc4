//! An invoice with line items, a discount and an average.

use std::sync::Arc;

use formtype_calc::prelude::*;
use pretty_assertions::assert_eq;

struct Line {
    quantity: Arc<MemoryConnection>,
    price: Arc<MemoryConnection>,
}

fn line(manager: &Arc<dyn TypeManager>, n: usize) -> Line {
    Line {
        quantity: Arc::new(
            MemoryConnection::new(format!("qty{n}")).with_type_manager(Arc::clone(manager)),
        ),
        price: Arc::new(
            MemoryConnection::new(format!("price{n}")).with_type_manager(Arc::clone(manager)),
        ),
    }
}

fn amount(line: &Line) -> Group {
    Group::new()
        .plus(Element::new(line.quantity.clone()))
        .times(Element::new(line.price.clone()))
}

fn float() -> Arc<dyn TypeManager> {
    Arc::new(Float::new(CultureInfo::en_us().into()))
}

#[test]
fn subtotal_ignores_empty_lines() {
    let float = float();
    let lines: Vec<Line> = (0..3).map(|n| line(&float, n)).collect();
    let subtotal = lines
        .iter()
        .fold(Aggregate::sum(), |sum, line| sum.with(amount(line)));

    assert_eq!(subtotal.evaluate().unwrap(), CalcValue::Number(0.0));

    lines[0].quantity.set_text("2");
    lines[0].price.set_text("10.50");
    lines[2].quantity.set_text("1");
    lines[2].price.set_text("4");
    assert_eq!(subtotal.evaluate().unwrap(), CalcValue::Number(25.0));

    lines[1].price.set_text("ten");
    assert_eq!(subtotal.evaluate().unwrap(), CalcValue::NaN);
}

#[test]
fn discount_applies_only_to_members() {
    let float = float();
    let order = line(&float, 0);
    let member = Arc::new(MemoryConnection::new("member"));
    let is_member = RegExp::new(member.clone(), "^(?i:yes)$");

    let total = Round::new(
        Group::new()
            .plus(amount(&order))
            .times(
                Conditional::new(is_member, Number(0.9), Number(1.0))
                    .when_cannot_evaluate(Number(1.0)),
            ),
    )
    .with_decimals(2);

    order.quantity.set_text("3");
    order.price.set_text("9.99");
    assert_eq!(total.evaluate().unwrap(), CalcValue::Number(29.97));
    member.set_text("YES");
    assert_eq!(total.evaluate().unwrap(), CalcValue::Number(26.97));
    member.set_text("no");
    assert_eq!(total.evaluate().unwrap(), CalcValue::Number(29.97));
}

#[test]
fn average_rating_skips_unanswered() {
    let integer: Arc<dyn TypeManager> = Arc::new(Integer::new(CultureInfo::en_us().into()));
    let answers: Vec<Arc<MemoryConnection>> = (0..4)
        .map(|n| {
            Arc::new(
                MemoryConnection::new(format!("q{n}")).with_type_manager(Arc::clone(&integer)),
            )
        })
        .collect();
    let ratings = answers.iter().fold(List::new(), |list, answer| {
        list.with(Element::new(answer.clone()).when_null(Null))
    });
    let average = Fix::new(Aggregate::avg().with(ratings)).when_nan(Null);

    assert_eq!(average.evaluate().unwrap(), CalcValue::Null);

    answers[0].set_text("2");
    answers[1].set_text("4");
    answers[3].set_text("6");
    assert_eq!(average.evaluate().unwrap(), CalcValue::Number(4.0));
}

#[test]
fn hours_worked_from_durations() {
    let hours: Arc<dyn TypeManager> = Arc::new(
        Duration::with_options(
            CultureInfo::en_us().into(),
            DurationOptions {
                time_unit: TimeUnit::Hours,
                ..DurationOptions::default()
            },
        )
        .unwrap(),
    );
    let monday = Arc::new(MemoryConnection::new("mon").with_text("7:30"));
    let tuesday = Arc::new(MemoryConnection::new("tue").with_text("8:15"));
    let week = Aggregate::sum()
        .with(Element::new(monday).with_type_manager(Arc::clone(&hours)))
        .with(Element::new(tuesday).with_type_manager(hours));
    assert_eq!(week.evaluate().unwrap(), CalcValue::Number(15.75));
}

#[test]
fn setup_errors_stop_the_calculation() {
    let bare = Arc::new(MemoryConnection::new("bare").with_text("1"));
    let total = Group::new().plus(Number(1.0)).plus(Element::new(bare));
    let err = total.evaluate().unwrap_err();
    assert_eq!(err.code(), "CALC_NO_TYPE_MANAGER");
    assert!(err.to_string().contains("`bare`"));
}
