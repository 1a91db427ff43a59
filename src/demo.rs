use std::io::Write;

use anyhow::Result;

const A: i32 = 10;
const B: i32 = 5;

/// Fixed four-operation demonstration plus a comparison. No inputs,
/// no error paths.
pub fn run(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Sum: {}", A + B)?;
    writeln!(out, "Difference: {}", A - B)?;
    writeln!(out, "Product: {}", A * B)?;
    writeln!(out, "Quotient: {:.2}", A as f32 / B as f32)?;

    if A > B {
        writeln!(out, "a is greater than b")?;
    } else {
        writeln!(out, "b is greater than or equal to a")?;
    }

    Ok(())
}
