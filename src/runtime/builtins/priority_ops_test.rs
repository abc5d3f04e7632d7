use crate::runtime::{ds::DsKind, error::RuntimeError, value::Value, vm::VM};

use super::priority_ops::{
    builtin_ds_priority_add, builtin_ds_priority_clear, builtin_ds_priority_create,
    builtin_ds_priority_delete_max, builtin_ds_priority_delete_min, builtin_ds_priority_destroy,
    builtin_ds_priority_empty, builtin_ds_priority_find_max, builtin_ds_priority_find_min,
    builtin_ds_priority_size,
};

fn add(vm: &mut VM, id: &Value, value: &str, priority: i64) {
    builtin_ds_priority_add(
        vm,
        vec![id.clone(), Value::from(value), Value::Integer(priority)],
    )
    .unwrap();
}

#[test]
fn delete_min_follows_priority_then_value() {
    let mut vm = VM::new();
    let id = builtin_ds_priority_create(&mut vm, vec![]).unwrap();
    add(&mut vm, &id, "a", 1);
    add(&mut vm, &id, "b", 1);
    add(&mut vm, &id, "c", 0);

    let mut popped = Vec::new();
    for _ in 0..3 {
        popped.push(builtin_ds_priority_delete_min(&mut vm, vec![id.clone()]).unwrap());
    }
    assert_eq!(
        popped,
        vec![Value::from("c"), Value::from("a"), Value::from("b")]
    );
    assert_eq!(
        builtin_ds_priority_delete_min(&mut vm, vec![id]),
        Err(RuntimeError::EmptyCollection {
            kind: DsKind::Priority,
            op: "pop_min"
        })
    );
}

#[test]
fn find_and_delete_max() {
    let mut vm = VM::new();
    let id = builtin_ds_priority_create(&mut vm, vec![]).unwrap();
    add(&mut vm, &id, "low", -5);
    add(&mut vm, &id, "high", 50);
    add(&mut vm, &id, "mid", 7);

    assert_eq!(
        builtin_ds_priority_find_max(&mut vm, vec![id.clone()]).unwrap(),
        Value::from("high")
    );
    assert_eq!(
        builtin_ds_priority_find_min(&mut vm, vec![id.clone()]).unwrap(),
        Value::from("low")
    );
    assert_eq!(
        builtin_ds_priority_delete_max(&mut vm, vec![id.clone()]).unwrap(),
        Value::from("high")
    );
    assert_eq!(
        builtin_ds_priority_size(&mut vm, vec![id]).unwrap(),
        Value::Integer(2)
    );
}

#[test]
fn clear_empty_destroy() {
    let mut vm = VM::new();
    let id = builtin_ds_priority_create(&mut vm, vec![]).unwrap();
    add(&mut vm, &id, "x", 3);
    assert_eq!(
        builtin_ds_priority_empty(&mut vm, vec![id.clone()]).unwrap(),
        Value::Integer(0)
    );

    builtin_ds_priority_clear(&mut vm, vec![id.clone()]).unwrap();
    assert_eq!(
        builtin_ds_priority_empty(&mut vm, vec![id.clone()]).unwrap(),
        Value::Integer(1)
    );
    assert!(builtin_ds_priority_find_min(&mut vm, vec![id.clone()]).is_err());

    builtin_ds_priority_destroy(&mut vm, vec![id.clone()]).unwrap();
    assert!(matches!(
        builtin_ds_priority_size(&mut vm, vec![id]),
        Err(RuntimeError::InvalidHandle { .. })
    ));
}

#[test]
fn add_rejects_array_priority() {
    let mut vm = VM::new();
    let id = builtin_ds_priority_create(&mut vm, vec![]).unwrap();
    let priority = vm.make_array(vec![]);
    assert_eq!(
        builtin_ds_priority_add(&mut vm, vec![id, Value::from("v"), priority]),
        Err(RuntimeError::UnsupportedKeyType { got: "Array" })
    );
}
