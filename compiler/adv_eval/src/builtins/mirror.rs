//! `Mirror`: reflection over the class graph.
//!
//! `instantiate` and `typeName` work on their arguments. The other methods
//! reflect over the class named by the mirror's own `toReflect` field and
//! only ever report members the class declares itself.

use adv_ir::prelude::{MIRROR, TO_REFLECT_FIELD};
use adv_ir::{Class, Field, Member, Method};

use super::{BuiltinRegistry, NativeCall};
use crate::errors::{name_not_found, EvalResult};
use crate::object::ObjRef;

/// The class named by the receiver's `toReflect` field.
fn reflected<'a>(call: &NativeCall<'a>) -> EvalResult<&'a Class> {
    let field = call.interpreter.get_field(call.this, TO_REFLECT_FIELD);
    let name = call.expect_str(&field)?;
    call.interpreter
        .library()
        .class_by_name(name)
        .ok_or_else(|| name_not_found(name))
}

/// Name of the `index`-th own member of the reflected class, or Null.
fn own_member<M: Member>(call: &NativeCall<'_>) -> EvalResult<Option<ObjRef>> {
    let class = reflected(call)?;
    let index = call.int_arg(0)?;
    let member = usize::try_from(index)
        .ok()
        .and_then(|i| M::own(class).get(i));
    Ok(member.map(|m| call.interpreter.string(m.name())))
}

pub(super) fn register(registry: &mut BuiltinRegistry) {
    registry.register(MIRROR, "instantiate", false, |call| {
        let name = call.str_arg(0)?;
        let class = call
            .interpreter
            .library()
            .class_id(name)
            .ok_or_else(|| name_not_found(name))?;
        call.interpreter.instantiate(class).map(Some)
    });

    registry.register(MIRROR, "typeName", false, |call| {
        let name = call.arg(0)?.class_name();
        Ok(Some(call.interpreter.string(name)))
    });

    registry.register(MIRROR, "parent", false, |call| {
        let class = reflected(call)?;
        let library = call.interpreter.library();
        Ok(class
            .parent
            .map(|parent| call.interpreter.string(library.class(parent).name.as_str())))
    });

    registry.register(MIRROR, "isAbstract", false, |call| {
        let class = reflected(call)?;
        Ok(Some(call.interpreter.boolean(class.is_abstract)))
    });

    registry.register(MIRROR, "field", false, own_member::<Field>);
    registry.register(MIRROR, "method", false, own_member::<Method>);
}
