use crate::runtime::{error::RuntimeError, value::Value, vm::VM};

use super::array_ops::{builtin_array_create, builtin_array_get, builtin_array_length};

#[test]
fn create_fills_with_value() {
    let mut vm = VM::new();
    let array = builtin_array_create(&mut vm, vec![Value::Integer(3), Value::from("x")]).unwrap();
    assert_eq!(array.to_string(), "[\"x\", \"x\", \"x\"]");

    let blank = builtin_array_create(&mut vm, vec![Value::Integer(2)]).unwrap();
    assert_eq!(blank.to_string(), "[undefined, undefined]");
    assert_eq!(vm.gc_heap.total_allocations(), 2);
}

#[test]
fn create_rejects_negative_size() {
    let mut vm = VM::new();
    assert_eq!(
        builtin_array_create(&mut vm, vec![Value::Integer(-1)]),
        Err(RuntimeError::IndexOutOfBounds { index: -1, len: 0 })
    );
}

#[test]
fn create_rejects_unallocatable_size() {
    let mut vm = VM::new();
    let expected = Err(RuntimeError::InvalidArgument {
        name: "array_create",
        reason: "size exceeds available memory",
    });
    assert_eq!(
        builtin_array_create(&mut vm, vec![Value::Integer(i64::MAX)]),
        expected
    );
    assert_eq!(
        vm.call_builtin("array_create", vec![Value::Integer(i64::MAX), Value::from("x")]),
        expected
    );
    assert_eq!(vm.gc_heap.total_allocations(), 0);
}

#[test]
fn length_and_get() {
    let mut vm = VM::new();
    let array = vm.make_array(vec![Value::Integer(10), Value::Integer(20)]);

    assert_eq!(
        builtin_array_length(&mut vm, vec![array.clone()]).unwrap(),
        Value::Integer(2)
    );
    assert_eq!(
        builtin_array_get(&mut vm, vec![array.clone(), Value::Integer(1)]).unwrap(),
        Value::Integer(20)
    );
    assert_eq!(
        builtin_array_get(&mut vm, vec![array.clone(), Value::Integer(2)]),
        Err(RuntimeError::IndexOutOfBounds { index: 2, len: 2 })
    );
    assert_eq!(
        builtin_array_get(&mut vm, vec![array, Value::Integer(-1)]),
        Err(RuntimeError::IndexOutOfBounds { index: -1, len: 2 })
    );
}

#[test]
fn scalars_are_not_arrays() {
    let mut vm = VM::new();
    assert_eq!(
        builtin_array_length(&mut vm, vec![Value::Integer(1)]),
        Err(RuntimeError::TypeMismatch {
            expected: "Array",
            got: "Integer"
        })
    );
}
