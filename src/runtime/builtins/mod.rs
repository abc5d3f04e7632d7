use crate::runtime::builtin_function::BuiltinFunction;

mod array_ops;
mod ds_ops;
mod helpers;
mod map_ops;
mod priority_ops;
mod queue_ops;
mod stack_ops;
mod type_check;

use array_ops::{builtin_array_create, builtin_array_get, builtin_array_length};
use ds_ops::{builtin_ds_exists, builtin_ds_set_precision};
use map_ops::{
    builtin_ds_map_add, builtin_ds_map_clear, builtin_ds_map_copy, builtin_ds_map_create,
    builtin_ds_map_delete, builtin_ds_map_destroy, builtin_ds_map_empty, builtin_ds_map_exists,
    builtin_ds_map_find_first, builtin_ds_map_find_last, builtin_ds_map_find_next,
    builtin_ds_map_find_previous, builtin_ds_map_find_value, builtin_ds_map_replace,
    builtin_ds_map_size,
};
use priority_ops::{
    builtin_ds_priority_add, builtin_ds_priority_clear, builtin_ds_priority_create,
    builtin_ds_priority_delete_max, builtin_ds_priority_delete_min, builtin_ds_priority_destroy,
    builtin_ds_priority_empty, builtin_ds_priority_find_max, builtin_ds_priority_find_min,
    builtin_ds_priority_size,
};
use queue_ops::{
    builtin_ds_queue_clear, builtin_ds_queue_copy, builtin_ds_queue_create,
    builtin_ds_queue_dequeue, builtin_ds_queue_destroy, builtin_ds_queue_empty,
    builtin_ds_queue_enqueue, builtin_ds_queue_head, builtin_ds_queue_size, builtin_ds_queue_tail,
};
use stack_ops::{
    builtin_ds_stack_clear, builtin_ds_stack_create, builtin_ds_stack_destroy,
    builtin_ds_stack_empty, builtin_ds_stack_pop, builtin_ds_stack_push, builtin_ds_stack_size,
    builtin_ds_stack_top,
};
use type_check::{
    builtin_is_array, builtin_is_int64, builtin_is_numeric, builtin_is_real, builtin_is_string,
    builtin_is_undefined, builtin_typeof,
};

/// Every builtin, in a fixed order. The index of an entry is stable and may
/// be baked into compiled code.
pub static BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction {
        name: "ds_map_create",
        signature: "ds_map_create()",
        func: builtin_ds_map_create,
    },
    BuiltinFunction {
        name: "ds_map_destroy",
        signature: "ds_map_destroy(id)",
        func: builtin_ds_map_destroy,
    },
    BuiltinFunction {
        name: "ds_map_clear",
        signature: "ds_map_clear(id)",
        func: builtin_ds_map_clear,
    },
    BuiltinFunction {
        name: "ds_map_copy",
        signature: "ds_map_copy(id, source)",
        func: builtin_ds_map_copy,
    },
    BuiltinFunction {
        name: "ds_map_exists",
        signature: "ds_map_exists(id, key)",
        func: builtin_ds_map_exists,
    },
    BuiltinFunction {
        name: "ds_map_add",
        signature: "ds_map_add(id, key, value)",
        func: builtin_ds_map_add,
    },
    BuiltinFunction {
        name: "ds_map_replace",
        signature: "ds_map_replace(id, key, value)",
        func: builtin_ds_map_replace,
    },
    BuiltinFunction {
        name: "ds_map_delete",
        signature: "ds_map_delete(id, key)",
        func: builtin_ds_map_delete,
    },
    BuiltinFunction {
        name: "ds_map_empty",
        signature: "ds_map_empty(id)",
        func: builtin_ds_map_empty,
    },
    BuiltinFunction {
        name: "ds_map_size",
        signature: "ds_map_size(id)",
        func: builtin_ds_map_size,
    },
    BuiltinFunction {
        name: "ds_map_find_value",
        signature: "ds_map_find_value(id, key)",
        func: builtin_ds_map_find_value,
    },
    BuiltinFunction {
        name: "ds_map_find_first",
        signature: "ds_map_find_first(id)",
        func: builtin_ds_map_find_first,
    },
    BuiltinFunction {
        name: "ds_map_find_last",
        signature: "ds_map_find_last(id)",
        func: builtin_ds_map_find_last,
    },
    BuiltinFunction {
        name: "ds_map_find_next",
        signature: "ds_map_find_next(id, key)",
        func: builtin_ds_map_find_next,
    },
    BuiltinFunction {
        name: "ds_map_find_previous",
        signature: "ds_map_find_previous(id, key)",
        func: builtin_ds_map_find_previous,
    },
    BuiltinFunction {
        name: "ds_priority_create",
        signature: "ds_priority_create()",
        func: builtin_ds_priority_create,
    },
    BuiltinFunction {
        name: "ds_priority_destroy",
        signature: "ds_priority_destroy(id)",
        func: builtin_ds_priority_destroy,
    },
    BuiltinFunction {
        name: "ds_priority_clear",
        signature: "ds_priority_clear(id)",
        func: builtin_ds_priority_clear,
    },
    BuiltinFunction {
        name: "ds_priority_empty",
        signature: "ds_priority_empty(id)",
        func: builtin_ds_priority_empty,
    },
    BuiltinFunction {
        name: "ds_priority_size",
        signature: "ds_priority_size(id)",
        func: builtin_ds_priority_size,
    },
    BuiltinFunction {
        name: "ds_priority_add",
        signature: "ds_priority_add(id, value, priority)",
        func: builtin_ds_priority_add,
    },
    BuiltinFunction {
        name: "ds_priority_delete_min",
        signature: "ds_priority_delete_min(id)",
        func: builtin_ds_priority_delete_min,
    },
    BuiltinFunction {
        name: "ds_priority_delete_max",
        signature: "ds_priority_delete_max(id)",
        func: builtin_ds_priority_delete_max,
    },
    BuiltinFunction {
        name: "ds_priority_find_min",
        signature: "ds_priority_find_min(id)",
        func: builtin_ds_priority_find_min,
    },
    BuiltinFunction {
        name: "ds_priority_find_max",
        signature: "ds_priority_find_max(id)",
        func: builtin_ds_priority_find_max,
    },
    BuiltinFunction {
        name: "ds_queue_create",
        signature: "ds_queue_create()",
        func: builtin_ds_queue_create,
    },
    BuiltinFunction {
        name: "ds_queue_destroy",
        signature: "ds_queue_destroy(id)",
        func: builtin_ds_queue_destroy,
    },
    BuiltinFunction {
        name: "ds_queue_clear",
        signature: "ds_queue_clear(id)",
        func: builtin_ds_queue_clear,
    },
    BuiltinFunction {
        name: "ds_queue_copy",
        signature: "ds_queue_copy(id)",
        func: builtin_ds_queue_copy,
    },
    BuiltinFunction {
        name: "ds_queue_empty",
        signature: "ds_queue_empty(id)",
        func: builtin_ds_queue_empty,
    },
    BuiltinFunction {
        name: "ds_queue_size",
        signature: "ds_queue_size(id)",
        func: builtin_ds_queue_size,
    },
    BuiltinFunction {
        name: "ds_queue_enqueue",
        signature: "ds_queue_enqueue(id, value, ...)",
        func: builtin_ds_queue_enqueue,
    },
    BuiltinFunction {
        name: "ds_queue_dequeue",
        signature: "ds_queue_dequeue(id)",
        func: builtin_ds_queue_dequeue,
    },
    BuiltinFunction {
        name: "ds_queue_head",
        signature: "ds_queue_head(id)",
        func: builtin_ds_queue_head,
    },
    BuiltinFunction {
        name: "ds_queue_tail",
        signature: "ds_queue_tail(id)",
        func: builtin_ds_queue_tail,
    },
    BuiltinFunction {
        name: "ds_stack_create",
        signature: "ds_stack_create()",
        func: builtin_ds_stack_create,
    },
    BuiltinFunction {
        name: "ds_stack_destroy",
        signature: "ds_stack_destroy(id)",
        func: builtin_ds_stack_destroy,
    },
    BuiltinFunction {
        name: "ds_stack_clear",
        signature: "ds_stack_clear(id)",
        func: builtin_ds_stack_clear,
    },
    BuiltinFunction {
        name: "ds_stack_push",
        signature: "ds_stack_push(id, value, ...)",
        func: builtin_ds_stack_push,
    },
    BuiltinFunction {
        name: "ds_stack_pop",
        signature: "ds_stack_pop(id)",
        func: builtin_ds_stack_pop,
    },
    BuiltinFunction {
        name: "ds_stack_top",
        signature: "ds_stack_top(id)",
        func: builtin_ds_stack_top,
    },
    BuiltinFunction {
        name: "ds_stack_size",
        signature: "ds_stack_size(id)",
        func: builtin_ds_stack_size,
    },
    BuiltinFunction {
        name: "ds_stack_empty",
        signature: "ds_stack_empty(id)",
        func: builtin_ds_stack_empty,
    },
    BuiltinFunction {
        name: "ds_exists",
        signature: "ds_exists(id, type)",
        func: builtin_ds_exists,
    },
    BuiltinFunction {
        name: "ds_set_precision",
        signature: "ds_set_precision(epsilon)",
        func: builtin_ds_set_precision,
    },
    BuiltinFunction {
        name: "typeof",
        signature: "typeof(x)",
        func: builtin_typeof,
    },
    BuiltinFunction {
        name: "is_real",
        signature: "is_real(x)",
        func: builtin_is_real,
    },
    BuiltinFunction {
        name: "is_int64",
        signature: "is_int64(x)",
        func: builtin_is_int64,
    },
    BuiltinFunction {
        name: "is_numeric",
        signature: "is_numeric(x)",
        func: builtin_is_numeric,
    },
    BuiltinFunction {
        name: "is_string",
        signature: "is_string(x)",
        func: builtin_is_string,
    },
    BuiltinFunction {
        name: "is_array",
        signature: "is_array(x)",
        func: builtin_is_array,
    },
    BuiltinFunction {
        name: "is_undefined",
        signature: "is_undefined(x)",
        func: builtin_is_undefined,
    },
    BuiltinFunction {
        name: "array_create",
        signature: "array_create(size, [value])",
        func: builtin_array_create,
    },
    BuiltinFunction {
        name: "array_length",
        signature: "array_length(array)",
        func: builtin_array_length,
    },
    BuiltinFunction {
        name: "array_get",
        signature: "array_get(array, index)",
        func: builtin_array_get,
    },
];

pub fn get_builtin(name: &str) -> Option<&'static BuiltinFunction> {
    BUILTINS.iter().find(|b| b.name == name)
}

pub fn get_builtin_index(name: &str) -> Option<usize> {
    BUILTINS.iter().position(|b| b.name == name)
}

pub fn get_builtin_by_index(index: usize) -> Option<&'static BuiltinFunction> {
    BUILTINS.get(index)
}

#[cfg(test)]
mod array_ops_test;
#[cfg(test)]
mod ds_ops_test;
#[cfg(test)]
mod priority_ops_test;
#[cfg(test)]
mod type_check_test;
