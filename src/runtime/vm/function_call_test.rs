use crate::runtime::{error::RuntimeError, value::Value, vm::VM};

#[test]
fn call_builtin_by_name() {
    let mut vm = VM::new();
    let result = vm.call_builtin("typeof", vec![Value::Real(1.5)]).unwrap();
    assert_eq!(result, Value::from("number"));
}

#[test]
fn unknown_builtin_errors() {
    let mut vm = VM::new();
    assert_eq!(
        vm.call_builtin("ds_list_create", vec![]),
        Err(RuntimeError::UnknownBuiltin("ds_list_create".to_string()))
    );
}

#[test]
fn execute_builtin_call_consumes_arguments_from_stack() {
    let mut vm = VM::new();
    vm.execute_builtin_call("ds_stack_create", 0).unwrap();
    let id = vm.pop().unwrap();

    vm.push(id.clone()).unwrap();
    vm.push(Value::Integer(1)).unwrap();
    vm.push(Value::Integer(2)).unwrap();
    vm.execute_builtin_call("ds_stack_push", 3).unwrap();
    assert_eq!(vm.pop(), Ok(Value::Undefined));
    assert_eq!(vm.stack_len(), 0);

    vm.push(id).unwrap();
    vm.execute_builtin_call("ds_stack_pop", 1).unwrap();
    assert_eq!(vm.pop(), Ok(Value::Integer(2)));
}

#[test]
fn execute_builtin_call_underflow() {
    let mut vm = VM::new();
    vm.push(Value::Integer(0)).unwrap();
    assert_eq!(
        vm.execute_builtin_call("ds_map_find_value", 2),
        Err(RuntimeError::StackUnderflow)
    );
    assert_eq!(vm.stack_len(), 1);
}
