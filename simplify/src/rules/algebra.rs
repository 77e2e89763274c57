//! Exponential, logarithm, power, and division algebra.
//!
//! All of these hold exactly over the reals and are accepted as
//! simplifications under floating-point semantics, matching the usual
//! compiler treatment of `exp`/`log`/`pow` chains.

use tessera_ir::{BinaryOp, Computation, InstructionId, Op, Shape, UnaryOp};

use crate::reasoner::is_all;

use super::{binary, integer_constant_like, result_shape, unary};

fn unary_operand(comp: &Computation, id: InstructionId, which: UnaryOp) -> Option<InstructionId> {
    match comp.get(id)?.op() {
        Op::Unary(op, operand) if *op == which => Some(*operand),
        _ => None,
    }
}

fn exp_operand(comp: &Computation, id: InstructionId) -> Option<InstructionId> {
    unary_operand(comp, id, UnaryOp::Exp)
}

fn divide_operands(comp: &Computation, id: InstructionId) -> Option<(InstructionId, InstructionId)> {
    match comp.get(id)?.op() {
        Op::Binary(BinaryOp::Divide, lhs, rhs) => Some((*lhs, *rhs)),
        _ => None,
    }
}

fn power_operands(comp: &Computation, id: InstructionId) -> Option<(InstructionId, InstructionId)> {
    match comp.get(id)?.op() {
        Op::Binary(BinaryOp::Power, lhs, rhs) => Some((*lhs, *rhs)),
        _ => None,
    }
}

pub(crate) fn simplify_binary(
    comp: &mut Computation,
    id: InstructionId,
    op: BinaryOp,
    lhs: InstructionId,
    rhs: InstructionId,
) -> Option<InstructionId> {
    match op {
        BinaryOp::Multiply => simplify_multiply(comp, id, lhs, rhs),
        BinaryOp::Divide => simplify_divide(comp, id, lhs, rhs),
        BinaryOp::Power => simplify_power(comp, id, lhs, rhs),
        _ => None,
    }
}

pub(crate) fn simplify_unary(
    comp: &mut Computation,
    id: InstructionId,
    op: UnaryOp,
    operand: InstructionId,
) -> Option<InstructionId> {
    match op {
        UnaryOp::Log => simplify_log(comp, id, operand),
        _ => None,
    }
}

/// `exp(A) * exp(B) -> exp(A + B)`
fn simplify_multiply(
    comp: &mut Computation,
    id: InstructionId,
    lhs: InstructionId,
    rhs: InstructionId,
) -> Option<InstructionId> {
    let (a, b) = (exp_operand(comp, lhs)?, exp_operand(comp, rhs)?);
    let shape = result_shape(comp, id)?;
    let sum = binary(comp, BinaryOp::Add, a, b)?;
    Some(comp.add(Op::Unary(UnaryOp::Exp, sum), shape))
}

fn simplify_divide(
    comp: &mut Computation,
    id: InstructionId,
    lhs: InstructionId,
    rhs: InstructionId,
) -> Option<InstructionId> {
    let shape = result_shape(comp, id)?;

    // exp(A) / exp(B) -> exp(A - B)
    if let (Some(a), Some(b)) = (exp_operand(comp, lhs), exp_operand(comp, rhs)) {
        let difference = binary(comp, BinaryOp::Subtract, a, b)?;
        return Some(comp.add(Op::Unary(UnaryOp::Exp, difference), shape));
    }

    // A / exp(B) -> A * exp(-B)
    if let Some(b) = exp_operand(comp, rhs) {
        let negated = unary(comp, UnaryOp::Negate, b)?;
        let exp = unary(comp, UnaryOp::Exp, negated)?;
        return Some(comp.add(Op::Binary(BinaryOp::Multiply, lhs, exp), shape));
    }

    // A / pow(B, C) -> A * pow(B, -C)
    if let Some((b, c)) = power_operands(comp, rhs) {
        let negated = unary(comp, UnaryOp::Negate, c)?;
        let pow = binary(comp, BinaryOp::Power, b, negated)?;
        return Some(comp.add(Op::Binary(BinaryOp::Multiply, lhs, pow), shape));
    }

    // (A/B) / (C/D) -> (A*D) / (B*C)
    if let (Some((a, b)), Some((c, d))) = (divide_operands(comp, lhs), divide_operands(comp, rhs)) {
        let numerator = binary(comp, BinaryOp::Multiply, a, d)?;
        let denominator = binary(comp, BinaryOp::Multiply, b, c)?;
        return Some(comp.add(Op::Binary(BinaryOp::Divide, numerator, denominator), shape));
    }

    // (A/B) / C -> A / (B*C)
    if let Some((a, b)) = divide_operands(comp, lhs) {
        let denominator = binary(comp, BinaryOp::Multiply, b, rhs)?;
        return Some(comp.add(Op::Binary(BinaryOp::Divide, a, denominator), shape));
    }

    // A / (B/C) -> (A*C) / B
    if let Some((b, c)) = divide_operands(comp, rhs) {
        let numerator = binary(comp, BinaryOp::Multiply, lhs, c)?;
        return Some(comp.add(Op::Binary(BinaryOp::Divide, numerator, b), shape));
    }

    None
}

fn simplify_power(
    comp: &mut Computation,
    id: InstructionId,
    lhs: InstructionId,
    rhs: InstructionId,
) -> Option<InstructionId> {
    let shape = result_shape(comp, id)?;

    // pow(A, 0) -> 1
    if is_all(comp, rhs, 0) {
        return Some(integer_constant_like(comp, &shape, 1));
    }

    // pow(A, 2) -> A * A
    if is_all(comp, rhs, 2) {
        return Some(comp.add(Op::Binary(BinaryOp::Multiply, lhs, lhs), shape));
    }

    // pow(A, -1) -> 1 / A
    if is_all(comp, rhs, -1) {
        let one = integer_constant_like(comp, &Shape::scalar(shape.element_type()), 1);
        return Some(comp.add(Op::Binary(BinaryOp::Divide, one, lhs), shape));
    }

    // pow(exp(A), B) -> exp(A * B)
    if let Some(a) = exp_operand(comp, lhs) {
        let product = binary(comp, BinaryOp::Multiply, a, rhs)?;
        return Some(comp.add(Op::Unary(UnaryOp::Exp, product), shape));
    }

    None
}

fn simplify_log(
    comp: &mut Computation,
    id: InstructionId,
    operand: InstructionId,
) -> Option<InstructionId> {
    // ln(exp(A)) -> A
    if let Some(a) = exp_operand(comp, operand) {
        return Some(a);
    }

    let shape = result_shape(comp, id)?;

    // ln(exp(A) / exp(B)) -> A - B
    if let Some((x, y)) = divide_operands(comp, operand) {
        if let (Some(a), Some(b)) = (exp_operand(comp, x), exp_operand(comp, y)) {
            return Some(comp.add(Op::Binary(BinaryOp::Subtract, a, b), shape));
        }
    }

    // ln(pow(A, B)) -> ln(A) * B
    if let Some((a, b)) = power_operands(comp, operand) {
        let log = unary(comp, UnaryOp::Log, a)?;
        return Some(comp.add(Op::Binary(BinaryOp::Multiply, log, b), shape));
    }

    None
}
