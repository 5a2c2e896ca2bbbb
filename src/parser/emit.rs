//! Rendering of parsed calls as call-expression text
//!
//! A call renders as `name(arg, arg, ...)`. A call used as an argument is
//! wrapped in one more pair of parentheses than its own, so `(add 1 (mul 2 3))`
//! renders as `add(1, (mul(2, 3)))`.

use super::ast::{Argument, Call};
use std::fmt;

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Number(text) | Argument::Operator(text) => f.write_str(text),
            Argument::Call(call) => write!(f, "({})", call),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{Argument, Call, SourceLocation};

    #[test]
    fn test_render_flat() {
        let call = Call::new("add", SourceLocation::default())
            .with_arg(Argument::number("1"))
            .with_arg(Argument::operator("*"))
            .with_arg(Argument::number("-2.5"));
        assert_eq!(call.to_string(), "add(1, *, -2.5)");
    }

    #[test]
    fn test_render_empty_args() {
        assert_eq!(Call::new("now", SourceLocation::default()).to_string(), "now()");
    }

    #[test]
    fn test_render_nested_double_wrap() {
        let loc = SourceLocation::default();
        let inner = Call::new("mul", loc)
            .with_arg(Argument::number("2"))
            .with_arg(Argument::number("3"));
        let outer = Call::new("add", loc)
            .with_arg(Argument::number("1"))
            .with_arg(Argument::Call(inner));
        assert_eq!(outer.to_string(), "add(1, (mul(2, 3)))");
    }
}
