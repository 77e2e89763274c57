use tessera_ir::prelude::*;

use crate::test::{array_f32, constant_f32, param, root, run_default, scalar_f32, splat_f32};

fn single_root_module(comp: Computation) -> Module {
    Module::new("test", comp)
}

#[test]
fn add_zero_is_removed() {
    let mut comp = Computation::new("add_zero");
    let p = param(&mut comp, 0, scalar_f32());
    let zero = constant_f32(&mut comp, 0.0);
    let add = comp.add(Op::Binary(BinaryOp::Add, p, zero), scalar_f32());
    comp.set_root(add);
    let mut module = single_root_module(comp);

    assert!(run_default(&mut module));
    assert_eq!(root(&module).id(), p);
}

#[test]
fn zero_on_the_left_is_removed_too() {
    let mut comp = Computation::new("zero_add");
    let p = param(&mut comp, 0, scalar_f32());
    let zero = constant_f32(&mut comp, 0.0);
    let add = comp.add(Op::Binary(BinaryOp::Add, zero, p), scalar_f32());
    comp.set_root(add);
    let mut module = single_root_module(comp);

    assert!(run_default(&mut module));
    assert_eq!(root(&module).id(), p);
}

#[test]
fn add_broadcast_zero_is_removed() {
    let mut comp = Computation::new("add_bcast_zero");
    let p = param(&mut comp, 0, array_f32(&[3, 2]));
    let zeros = splat_f32(&mut comp, 0.0, &[3, 2]);
    let add = comp.add(Op::Binary(BinaryOp::Add, p, zeros), array_f32(&[3, 2]));
    comp.set_root(add);
    let mut module = single_root_module(comp);

    assert!(run_default(&mut module));
    assert_eq!(root(&module).id(), p);
}

#[test]
fn add_nonzero_is_kept() {
    let mut comp = Computation::new("add_one");
    let p = param(&mut comp, 0, scalar_f32());
    let one = constant_f32(&mut comp, 1.0);
    let add = comp.add(Op::Binary(BinaryOp::Add, p, one), scalar_f32());
    comp.set_root(add);
    let mut module = single_root_module(comp);

    assert!(!run_default(&mut module));
    assert!(matches!(root(&module).op(), Op::Binary(BinaryOp::Add, ..)));
}

#[test]
fn subtract_zero_is_removed() {
    let mut comp = Computation::new("sub_zero");
    let p = param(&mut comp, 0, scalar_f32());
    let zero = constant_f32(&mut comp, 0.0);
    let sub = comp.add(Op::Binary(BinaryOp::Subtract, p, zero), scalar_f32());
    comp.set_root(sub);
    let mut module = single_root_module(comp);

    assert!(run_default(&mut module));
    assert_eq!(root(&module).id(), p);
}

#[test]
fn multiply_one_is_removed_on_either_side() {
    for one_on_lhs in [false, true] {
        let mut comp = Computation::new("mul_one");
        let p = param(&mut comp, 0, scalar_f32());
        let one = constant_f32(&mut comp, 1.0);
        let (lhs, rhs) = if one_on_lhs { (one, p) } else { (p, one) };
        let mul = comp.add(Op::Binary(BinaryOp::Multiply, lhs, rhs), scalar_f32());
        comp.set_root(mul);
        let mut module = single_root_module(comp);

        assert!(run_default(&mut module));
        assert_eq!(root(&module).id(), p);
    }
}

#[test]
fn divide_and_power_by_one_are_removed() {
    for op in [BinaryOp::Divide, BinaryOp::Power] {
        let mut comp = Computation::new("by_one");
        let p = param(&mut comp, 0, array_f32(&[4]));
        let ones = splat_f32(&mut comp, 1.0, &[4]);
        let node = comp.add(Op::Binary(op, p, ones), array_f32(&[4]));
        comp.set_root(node);
        let mut module = single_root_module(comp);

        assert!(run_default(&mut module));
        assert_eq!(root(&module).id(), p);
    }
}

#[test]
fn scalar_zero_against_array_is_not_taken_as_replacement() {
    // add({2}, scalar 0): the scalar cannot stand in for the array result,
    // but the array side can.
    let mut comp = Computation::new("shape_guard");
    let p = param(&mut comp, 0, array_f32(&[2]));
    let zero = constant_f32(&mut comp, 0.0);
    let add = comp.add(Op::Binary(BinaryOp::Add, p, zero), array_f32(&[2]));
    comp.set_root(add);
    let mut module = single_root_module(comp);

    assert!(run_default(&mut module));
    assert_eq!(root(&module).id(), p);
}

#[test]
fn convert_to_same_type_is_removed() {
    let mut comp = Computation::new("convert_noop");
    let p = param(&mut comp, 0, scalar_f32());
    let convert = comp.add(Op::Convert(p), scalar_f32());
    comp.set_root(convert);
    let mut module = single_root_module(comp);

    assert!(run_default(&mut module));
    assert_eq!(root(&module).id(), p);
}

#[test]
fn convert_to_other_type_is_kept() {
    let mut comp = Computation::new("convert_real");
    let p = param(&mut comp, 0, scalar_f32());
    let convert = comp.add(Op::Convert(p), Shape::scalar(ElementType::S32));
    comp.set_root(convert);
    let mut module = single_root_module(comp);

    assert!(!run_default(&mut module));
    assert!(matches!(root(&module).op(), Op::Convert(_)));
}

#[test]
fn get_tuple_element_of_tuple_selects_directly() {
    let mut comp = Computation::new("gte_tuple");
    let a = param(&mut comp, 0, scalar_f32());
    let b = param(&mut comp, 1, scalar_f32());
    let tuple = comp.add(Op::Tuple([a, b].into_iter().collect()), scalar_f32());
    let gte = comp.add(Op::GetTupleElement { operand: tuple, index: 1 }, scalar_f32());
    comp.set_root(gte);
    let mut module = single_root_module(comp);

    assert!(run_default(&mut module));
    assert_eq!(root(&module).id(), b);
}
