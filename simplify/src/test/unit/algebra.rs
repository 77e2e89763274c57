use tessera_ir::prelude::*;

use crate::test::{array_f32, constant_f32, op_of, param, root, root_op, run_default, scalar_f32};

fn exp(comp: &mut Computation, operand: InstructionId) -> InstructionId {
    let shape = comp.instruction(operand).unwrap().shape().clone();
    comp.add(Op::Unary(UnaryOp::Exp, operand), shape)
}

#[test]
fn power_zero_becomes_one() {
    let mut comp = Computation::new("pow_zero");
    let p = param(&mut comp, 0, scalar_f32());
    let zero = constant_f32(&mut comp, 0.0);
    let pow = comp.add(Op::Binary(BinaryOp::Power, p, zero), scalar_f32());
    comp.set_root(pow);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    match root_op(&module) {
        Op::Constant(literal) => assert!(literal.is_all(1)),
        other => panic!("expected constant one, got {}", other.kind()),
    }
}

#[test]
fn power_zero_over_an_array_broadcasts_the_one() {
    let mut comp = Computation::new("pow_zero_array");
    let p = param(&mut comp, 0, array_f32(&[2, 3]));
    let zero = constant_f32(&mut comp, 0.0);
    let pow = comp.add(Op::Binary(BinaryOp::Power, p, zero), array_f32(&[2, 3]));
    comp.set_root(pow);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    let Op::Broadcast { operand, .. } = root_op(&module) else {
        panic!("expected broadcast of one, got {}", root_op(&module).kind());
    };
    assert_eq!(root(&module).shape(), &array_f32(&[2, 3]));
    match op_of(&module, *operand) {
        Op::Constant(literal) => assert!(literal.is_all(1)),
        other => panic!("expected constant one, got {}", other.kind()),
    }
}

#[test]
fn power_two_becomes_self_multiplication() {
    let mut comp = Computation::new("pow_two");
    let p = param(&mut comp, 0, scalar_f32());
    let two = constant_f32(&mut comp, 2.0);
    let pow = comp.add(Op::Binary(BinaryOp::Power, p, two), scalar_f32());
    comp.set_root(pow);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    assert_eq!(root_op(&module), &Op::Binary(BinaryOp::Multiply, p, p));
}

#[test]
fn power_negative_one_becomes_reciprocal() {
    let mut comp = Computation::new("pow_neg_one");
    let p = param(&mut comp, 0, scalar_f32());
    let neg_one = constant_f32(&mut comp, -1.0);
    let pow = comp.add(Op::Binary(BinaryOp::Power, p, neg_one), scalar_f32());
    comp.set_root(pow);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    let Op::Binary(BinaryOp::Divide, one, denom) = root_op(&module) else {
        panic!("expected a reciprocal, got {}", root_op(&module).kind());
    };
    assert_eq!(*denom, p);
    match op_of(&module, *one) {
        Op::Constant(literal) => assert!(literal.is_all(1)),
        other => panic!("expected constant one, got {}", other.kind()),
    }
}

#[test]
fn power_of_exp_folds_into_exp() {
    let mut comp = Computation::new("pow_exp");
    let a = param(&mut comp, 0, scalar_f32());
    let b = param(&mut comp, 1, scalar_f32());
    let exp_a = exp(&mut comp, a);
    let pow = comp.add(Op::Binary(BinaryOp::Power, exp_a, b), scalar_f32());
    comp.set_root(pow);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    let Op::Unary(UnaryOp::Exp, product) = root_op(&module) else {
        panic!("expected exp, got {}", root_op(&module).kind());
    };
    assert_eq!(op_of(&module, *product), &Op::Binary(BinaryOp::Multiply, a, b));
}

#[test]
fn product_of_exps_becomes_exp_of_sum() {
    let mut comp = Computation::new("exp_mul");
    let a = param(&mut comp, 0, scalar_f32());
    let b = param(&mut comp, 1, scalar_f32());
    let exp_a = exp(&mut comp, a);
    let exp_b = exp(&mut comp, b);
    let mul = comp.add(Op::Binary(BinaryOp::Multiply, exp_a, exp_b), scalar_f32());
    comp.set_root(mul);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    let Op::Unary(UnaryOp::Exp, sum) = root_op(&module) else {
        panic!("expected exp, got {}", root_op(&module).kind());
    };
    assert_eq!(op_of(&module, *sum), &Op::Binary(BinaryOp::Add, a, b));
}

#[test]
fn quotient_of_exps_becomes_exp_of_difference() {
    let mut comp = Computation::new("exp_div");
    let a = param(&mut comp, 0, scalar_f32());
    let b = param(&mut comp, 1, scalar_f32());
    let exp_a = exp(&mut comp, a);
    let exp_b = exp(&mut comp, b);
    let div = comp.add(Op::Binary(BinaryOp::Divide, exp_a, exp_b), scalar_f32());
    comp.set_root(div);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    let Op::Unary(UnaryOp::Exp, difference) = root_op(&module) else {
        panic!("expected exp, got {}", root_op(&module).kind());
    };
    assert_eq!(op_of(&module, *difference), &Op::Binary(BinaryOp::Subtract, a, b));
}

#[test]
fn dividing_by_exp_multiplies_by_exp_of_negation() {
    let mut comp = Computation::new("div_exp");
    let a = param(&mut comp, 0, scalar_f32());
    let b = param(&mut comp, 1, scalar_f32());
    let exp_b = exp(&mut comp, b);
    let div = comp.add(Op::Binary(BinaryOp::Divide, a, exp_b), scalar_f32());
    comp.set_root(div);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    let Op::Binary(BinaryOp::Multiply, lhs, rhs) = root_op(&module) else {
        panic!("expected multiply, got {}", root_op(&module).kind());
    };
    assert_eq!(*lhs, a);
    let Op::Unary(UnaryOp::Exp, negated) = op_of(&module, *rhs) else {
        panic!("expected exp");
    };
    assert_eq!(op_of(&module, *negated), &Op::Unary(UnaryOp::Negate, b));
}

#[test]
fn dividing_by_power_multiplies_by_negated_exponent_power() {
    let mut comp = Computation::new("div_pow");
    let a = param(&mut comp, 0, scalar_f32());
    let b = param(&mut comp, 1, scalar_f32());
    let c = param(&mut comp, 2, scalar_f32());
    let pow = comp.add(Op::Binary(BinaryOp::Power, b, c), scalar_f32());
    let div = comp.add(Op::Binary(BinaryOp::Divide, a, pow), scalar_f32());
    comp.set_root(div);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    let Op::Binary(BinaryOp::Multiply, lhs, rhs) = root_op(&module) else {
        panic!("expected multiply, got {}", root_op(&module).kind());
    };
    assert_eq!(*lhs, a);
    let Op::Binary(BinaryOp::Power, base, exponent) = op_of(&module, *rhs) else {
        panic!("expected power");
    };
    assert_eq!(*base, b);
    assert_eq!(op_of(&module, *exponent), &Op::Unary(UnaryOp::Negate, c));
}

#[test]
fn nested_quotients_flatten() {
    // (a/b) / (c/d) -> (a*d) / (b*c)
    let mut comp = Computation::new("div_div");
    let ids: Vec<_> = (0..4).map(|i| param(&mut comp, i, scalar_f32())).collect();
    let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
    let lhs = comp.add(Op::Binary(BinaryOp::Divide, a, b), scalar_f32());
    let rhs = comp.add(Op::Binary(BinaryOp::Divide, c, d), scalar_f32());
    let div = comp.add(Op::Binary(BinaryOp::Divide, lhs, rhs), scalar_f32());
    comp.set_root(div);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    let Op::Binary(BinaryOp::Divide, numerator, denominator) = root_op(&module) else {
        panic!("expected divide, got {}", root_op(&module).kind());
    };
    assert_eq!(op_of(&module, *numerator), &Op::Binary(BinaryOp::Multiply, a, d));
    assert_eq!(op_of(&module, *denominator), &Op::Binary(BinaryOp::Multiply, b, c));
}

#[test]
fn quotient_in_the_numerator_folds_into_the_denominator() {
    // (a/b) / c -> a / (b*c)
    let mut comp = Computation::new("div_lhs");
    let a = param(&mut comp, 0, scalar_f32());
    let b = param(&mut comp, 1, scalar_f32());
    let c = param(&mut comp, 2, scalar_f32());
    let inner = comp.add(Op::Binary(BinaryOp::Divide, a, b), scalar_f32());
    let div = comp.add(Op::Binary(BinaryOp::Divide, inner, c), scalar_f32());
    comp.set_root(div);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    let Op::Binary(BinaryOp::Divide, numerator, denominator) = root_op(&module) else {
        panic!("expected divide, got {}", root_op(&module).kind());
    };
    assert_eq!(*numerator, a);
    assert_eq!(op_of(&module, *denominator), &Op::Binary(BinaryOp::Multiply, b, c));
}

#[test]
fn quotient_in_the_denominator_flips_up() {
    // a / (b/c) -> (a*c) / b
    let mut comp = Computation::new("div_rhs");
    let a = param(&mut comp, 0, scalar_f32());
    let b = param(&mut comp, 1, scalar_f32());
    let c = param(&mut comp, 2, scalar_f32());
    let inner = comp.add(Op::Binary(BinaryOp::Divide, b, c), scalar_f32());
    let div = comp.add(Op::Binary(BinaryOp::Divide, a, inner), scalar_f32());
    comp.set_root(div);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    let Op::Binary(BinaryOp::Divide, numerator, denominator) = root_op(&module) else {
        panic!("expected divide, got {}", root_op(&module).kind());
    };
    assert_eq!(*denominator, b);
    assert_eq!(op_of(&module, *numerator), &Op::Binary(BinaryOp::Multiply, a, c));
}

#[test]
fn log_of_exp_cancels() {
    let mut comp = Computation::new("ln_exp");
    let a = param(&mut comp, 0, scalar_f32());
    let exp_a = exp(&mut comp, a);
    let log = comp.add(Op::Unary(UnaryOp::Log, exp_a), scalar_f32());
    comp.set_root(log);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    assert_eq!(root(&module).id(), a);
}

#[test]
fn log_of_exp_quotient_becomes_difference() {
    let mut comp = Computation::new("ln_div");
    let a = param(&mut comp, 0, scalar_f32());
    let b = param(&mut comp, 1, scalar_f32());
    let exp_a = exp(&mut comp, a);
    let exp_b = exp(&mut comp, b);
    let div = comp.add(Op::Binary(BinaryOp::Divide, exp_a, exp_b), scalar_f32());
    let log = comp.add(Op::Unary(UnaryOp::Log, div), scalar_f32());
    comp.set_root(log);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    assert_eq!(root_op(&module), &Op::Binary(BinaryOp::Subtract, a, b));
}

#[test]
fn log_of_power_pulls_the_exponent_out() {
    let mut comp = Computation::new("ln_pow");
    let a = param(&mut comp, 0, scalar_f32());
    let b = param(&mut comp, 1, scalar_f32());
    let pow = comp.add(Op::Binary(BinaryOp::Power, a, b), scalar_f32());
    let log = comp.add(Op::Unary(UnaryOp::Log, pow), scalar_f32());
    comp.set_root(log);
    let mut module = Module::new("test", comp);

    assert!(run_default(&mut module));
    let Op::Binary(BinaryOp::Multiply, lhs, rhs) = root_op(&module) else {
        panic!("expected multiply, got {}", root_op(&module).kind());
    };
    assert_eq!(op_of(&module, *lhs), &Op::Unary(UnaryOp::Log, a));
    assert_eq!(*rhs, b);
}
