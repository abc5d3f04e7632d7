use crate::runtime::{value::Value, vm::VM};

use super::type_check::{
    builtin_is_array, builtin_is_int64, builtin_is_numeric, builtin_is_real, builtin_is_string,
    builtin_is_undefined, builtin_typeof,
};

#[test]
fn typeof_uses_script_names() {
    let mut vm = VM::new();
    let array = vm.make_array(vec![]);
    let cases = [
        (Value::Undefined, "undefined"),
        (Value::Integer(1), "int64"),
        (Value::Real(1.0), "number"),
        (Value::from("s"), "string"),
        (array, "array"),
        (Value::Handle(4), "ptr"),
    ];
    for (value, expected) in cases {
        assert_eq!(
            builtin_typeof(&mut vm, vec![value]).unwrap(),
            Value::from(expected)
        );
    }
}

#[test]
fn predicates_return_integer_booleans() {
    let mut vm = VM::new();
    let yes = Value::Integer(1);
    let no = Value::Integer(0);

    assert_eq!(builtin_is_real(&mut vm, vec![Value::Real(2.0)]).unwrap(), yes);
    assert_eq!(builtin_is_real(&mut vm, vec![Value::Integer(2)]).unwrap(), no);
    assert_eq!(builtin_is_int64(&mut vm, vec![Value::Integer(2)]).unwrap(), yes);
    assert_eq!(builtin_is_numeric(&mut vm, vec![Value::Integer(2)]).unwrap(), yes);
    assert_eq!(builtin_is_numeric(&mut vm, vec![Value::from("2")]).unwrap(), no);
    assert_eq!(builtin_is_string(&mut vm, vec![Value::from("2")]).unwrap(), yes);
    assert_eq!(builtin_is_undefined(&mut vm, vec![Value::Undefined]).unwrap(), yes);

    let array = vm.make_array(vec![Value::Integer(1)]);
    assert_eq!(builtin_is_array(&mut vm, vec![array]).unwrap(), yes);
    assert_eq!(builtin_is_array(&mut vm, vec![Value::Handle(0)]).unwrap(), no);
}

#[test]
fn predicates_check_arity() {
    let mut vm = VM::new();
    assert!(builtin_is_real(&mut vm, vec![]).is_err());
    assert!(builtin_typeof(&mut vm, vec![Value::Undefined, Value::Undefined]).is_err());
}
