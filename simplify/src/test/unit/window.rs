use smallvec::smallvec;
use tessera_ir::prelude::*;

use crate::test::{array_f32, op_of, param, root_op, run_default, scalar_f32};

/// `max(p0, p1)` as an embedded reducer computation.
fn max_reducer(module: &mut Module) -> ComputationId {
    let mut comp = Computation::new("max_reducer");
    let a = param(&mut comp, 0, scalar_f32());
    let b = param(&mut comp, 1, scalar_f32());
    let max = comp.add(Op::Binary(BinaryOp::Maximum, a, b), scalar_f32());
    comp.set_root(max);
    module.add_computation(comp)
}

fn window_1d(size: usize) -> Window {
    Window {
        dims: smallvec![WindowDimension {
            size,
            stride: 1,
            padding_low: 0,
            padding_high: 0,
            window_dilation: 1,
            base_dilation: 1,
        }],
    }
}

fn pad_1d(low: i64, high: i64, interior: i64) -> PaddingConfig {
    PaddingConfig { dims: smallvec![PadDimension { low, high, interior }] }
}

#[test]
fn pad_with_the_init_value_folds_into_the_window() {
    let mut module = Module::new("test", Computation::new("main"));
    let reducer = max_reducer(&mut module);
    let comp = module.entry_mut();
    let p = param(comp, 0, array_f32(&[8]));
    let value = comp.add(Op::Constant(Literal::scalar_f32(0.0)), scalar_f32());
    let pad = comp.add(
        Op::Pad { operand: p, value, config: pad_1d(1, 1, 0) },
        array_f32(&[10]),
    );
    let init = comp.add(Op::Constant(Literal::scalar_f32(0.0)), scalar_f32());
    let rw = comp.add(
        Op::ReduceWindow { operand: pad, init, window: window_1d(2), reducer },
        array_f32(&[9]),
    );
    comp.set_root(rw);

    assert!(run_default(&mut module));
    let Op::ReduceWindow { operand, window, .. } = root_op(&module) else {
        panic!("expected reduce-window, got {}", root_op(&module).kind());
    };
    assert_eq!(*operand, p);
    assert_eq!(window.dims[0].padding_low, 1);
    assert_eq!(window.dims[0].padding_high, 1);
    assert!(matches!(op_of(&module, *operand), Op::Parameter { .. }));
}

#[test]
fn pad_with_a_different_value_is_not_folded() {
    let mut module = Module::new("test", Computation::new("main"));
    let reducer = max_reducer(&mut module);
    let comp = module.entry_mut();
    let p = param(comp, 0, array_f32(&[8]));
    let value = comp.add(Op::Constant(Literal::scalar_f32(1.0)), scalar_f32());
    let pad = comp.add(
        Op::Pad { operand: p, value, config: pad_1d(1, 1, 0) },
        array_f32(&[10]),
    );
    let init = comp.add(Op::Constant(Literal::scalar_f32(0.0)), scalar_f32());
    let rw = comp.add(
        Op::ReduceWindow { operand: pad, init, window: window_1d(2), reducer },
        array_f32(&[9]),
    );
    comp.set_root(rw);

    assert!(!run_default(&mut module));
    let Op::ReduceWindow { operand, .. } = root_op(&module) else {
        panic!("expected reduce-window, got {}", root_op(&module).kind());
    };
    assert!(matches!(op_of(&module, *operand), Op::Pad { .. }));
}

#[test]
fn interior_padding_blocks_the_fold() {
    let mut module = Module::new("test", Computation::new("main"));
    let reducer = max_reducer(&mut module);
    let comp = module.entry_mut();
    let p = param(comp, 0, array_f32(&[5]));
    let value = comp.add(Op::Constant(Literal::scalar_f32(0.0)), scalar_f32());
    let pad = comp.add(
        Op::Pad { operand: p, value, config: pad_1d(0, 0, 1) },
        array_f32(&[9]),
    );
    let init = comp.add(Op::Constant(Literal::scalar_f32(0.0)), scalar_f32());
    let rw = comp.add(
        Op::ReduceWindow { operand: pad, init, window: window_1d(2), reducer },
        array_f32(&[8]),
    );
    comp.set_root(rw);

    assert!(!run_default(&mut module));
    assert!(matches!(root_op(&module), Op::ReduceWindow { .. }));
}

#[test]
fn broadcast_pad_value_matching_the_init_still_folds() {
    let mut module = Module::new("test", Computation::new("main"));
    let reducer = max_reducer(&mut module);
    let comp = module.entry_mut();
    let p = param(comp, 0, array_f32(&[8]));
    let scalar = comp.add(Op::Constant(Literal::scalar_f32(0.0)), scalar_f32());
    let value = comp.add(Op::Broadcast { operand: scalar, dimensions: Dims::new() }, scalar_f32());
    let pad = comp.add(
        Op::Pad { operand: p, value, config: pad_1d(2, 0, 0) },
        array_f32(&[10]),
    );
    let init = comp.add(Op::Constant(Literal::scalar_f32(0.0)), scalar_f32());
    let rw = comp.add(
        Op::ReduceWindow { operand: pad, init, window: window_1d(2), reducer },
        array_f32(&[9]),
    );
    comp.set_root(rw);

    assert!(run_default(&mut module));
    let Op::ReduceWindow { operand, window, .. } = root_op(&module) else {
        panic!("expected reduce-window, got {}", root_op(&module).kind());
    };
    assert_eq!(*operand, p);
    assert_eq!(window.dims[0].padding_low, 2);
    assert_eq!(window.dims[0].padding_high, 0);
}
