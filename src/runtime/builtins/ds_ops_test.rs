use crate::runtime::{error::RuntimeError, value::Value, vm::VM};

use super::ds_ops::{builtin_ds_exists, builtin_ds_set_precision};
use super::get_builtin;

fn exists(vm: &mut VM, id: Value, code: i64) -> Value {
    builtin_ds_exists(vm, vec![id, Value::Integer(code)]).unwrap()
}

#[test]
fn exists_checks_kind_code() {
    let mut vm = VM::new();
    let map = vm.call_builtin("ds_map_create", vec![]).unwrap();
    let queue = vm.call_builtin("ds_queue_create", vec![]).unwrap();
    let priority = vm.call_builtin("ds_priority_create", vec![]).unwrap();
    let stack = vm.call_builtin("ds_stack_create", vec![]).unwrap();

    assert_eq!(exists(&mut vm, map.clone(), 0), Value::Integer(1));
    assert_eq!(exists(&mut vm, queue, 4), Value::Integer(1));
    assert_eq!(exists(&mut vm, priority, 5), Value::Integer(1));
    assert_eq!(exists(&mut vm, stack, 2), Value::Integer(1));

    assert_eq!(exists(&mut vm, map.clone(), 1), Value::Integer(0));
    assert_eq!(exists(&mut vm, Value::Integer(7), 0), Value::Integer(0));
    assert_eq!(exists(&mut vm, Value::Integer(-1), 0), Value::Integer(0));

    vm.call_builtin("ds_map_destroy", vec![map.clone()]).unwrap();
    assert_eq!(exists(&mut vm, map, 0), Value::Integer(0));
}

#[test]
fn set_precision_rejects_invalid_tolerance() {
    let mut vm = VM::new();
    let invalid = Err(RuntimeError::InvalidArgument {
        name: "ds_set_precision",
        reason: "precision must be finite and non-negative",
    });
    assert_eq!(
        builtin_ds_set_precision(&mut vm, vec![Value::Real(-1.0)]),
        invalid
    );
    assert_eq!(
        builtin_ds_set_precision(&mut vm, vec![Value::Real(f64::NAN)]),
        invalid
    );
    assert!(builtin_ds_set_precision(&mut vm, vec![Value::from("x")]).is_err());
}

#[test]
fn builtin_table_lookup() {
    let entry = get_builtin("ds_exists").unwrap();
    assert_eq!(entry.signature, "ds_exists(id, type)");
    assert!(get_builtin("ds_grid_create").is_none());
}
