//! Console builtins. Both need program context.

use adv_ir::prelude::{INPUT, OUTPUT};

use super::BuiltinRegistry;

/// Prompt printed before `Input.read` waits for a line.
const PROMPT: &str = "> ";

pub(super) fn register(registry: &mut BuiltinRegistry) {
    registry.register(OUTPUT, "write", true, |call| {
        let text = call.interpreter.display(call.arg(0)?)?;
        call.interpreter.print_handler().println(&text);
        Ok(None)
    });

    registry.register(INPUT, "read", true, |call| {
        call.interpreter.print_handler().print(PROMPT);
        Ok(call
            .interpreter
            .input_handler()
            .read_line()
            .map(|line| call.interpreter.string(line)))
    });
}
