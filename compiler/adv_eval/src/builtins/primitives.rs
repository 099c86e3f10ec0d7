//! `String` operations plus the `Object` defaults.

use adv_ir::prelude::{OBJECT, STRING};

use super::BuiltinRegistry;
use crate::errors::user_exception;

pub(super) fn register(registry: &mut BuiltinRegistry) {
    registry.register(OBJECT, "toString", false, |call| {
        let name = call.this.class_name();
        Ok(Some(call.interpreter.string(name)))
    });

    registry.register(OBJECT, "throw", false, |call| {
        Err(user_exception(call.str_arg(0)?))
    });

    registry.register(STRING, "equals", false, |call| {
        let equal = call.this_str()? == call.str_arg(0)?;
        Ok(Some(call.interpreter.boolean(equal)))
    });

    registry.register(STRING, "+", false, |call| {
        let joined = format!("{}{}", call.this_str()?, call.str_arg(0)?);
        Ok(Some(call.interpreter.string(joined)))
    });

    // Out-of-range indices yield Null rather than an error.
    registry.register(STRING, "at", false, |call| {
        let text = call.this_str()?;
        let index = call.int_arg(0)?;
        let ch = usize::try_from(index)
            .ok()
            .and_then(|i| text.chars().nth(i));
        Ok(ch.map(|ch| call.interpreter.string(ch.to_string())))
    });

    registry.register(STRING, "length", false, |call| {
        let len = call.this_str()?.chars().count();
        Ok(Some(call.interpreter.string(len.to_string())))
    });

    registry.register(STRING, "toString", false, |call| {
        call.this_str()?;
        Ok(Some(call.this.clone()))
    });

    registry.register(STRING, "fromCharCode", false, |call| {
        let code = call.int_arg(0)?;
        let ch = u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| call.invalid_argument())?;
        Ok(Some(call.interpreter.string(ch.to_string())))
    });
}
