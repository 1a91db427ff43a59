use std::convert::TryFrom;
use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("Division by zero!")]
    DivisionByZero,
    #[error("Invalid operator: {0:?}")]
    UnknownOperator(char),
}

/// Recursive factorial. Overflows u64 for n > 20, a known accepted
/// limitation; negative input is rejected at the prompt layer.
pub fn factorial(n: u64) -> u64 {
    if n <= 1 {
        1
    } else {
        n * factorial(n - 1)
    }
}

/// Trial division by every i with i * i <= n. False for anything below 2.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl TryFrom<char> for Op {
    type Error = CalcError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            '+' => Ok(Op::Add),
            '-' => Ok(Op::Sub),
            '*' => Ok(Op::Mul),
            '/' => Ok(Op::Div),
            '^' => Ok(Op::Pow),
            other => Err(CalcError::UnknownOperator(other)),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Pow => '^',
        };
        write!(f, "{}", symbol)
    }
}

/// Applies a binary operator. Division by zero is an error value here;
/// the interactive layer maps it back to the sentinel 0 result line.
pub fn calculate(a: f64, b: f64, op: Op) -> Result<f64, CalcError> {
    match op {
        Op::Add => Ok(a + b),
        Op::Sub => Ok(a - b),
        Op::Mul => Ok(a * b),
        Op::Div => {
            if b == 0.0 {
                Err(CalcError::DivisionByZero)
            } else {
                Ok(a / b)
            }
        }
        Op::Pow => Ok(a.powf(b)),
    }
}

/// One interactive calculator session: menu choice, then operands.
/// All domain errors are reported in-band and the session still
/// returns Ok, so the process exits 0 regardless.
pub fn run(mut input: impl BufRead, out: &mut impl Write) -> Result<()> {
    writeln!(out, "=== Calculator Program ===")?;
    writeln!(out, "1. Factorial")?;
    writeln!(out, "2. Prime Check")?;
    writeln!(out, "3. Arithmetic Operations")?;

    let choice = match prompt(&mut input, out, "Enter your choice: ")?.parse::<u32>() {
        Ok(choice) => choice,
        Err(_) => {
            writeln!(out, "Invalid choice!")?;
            return Ok(());
        }
    };

    match choice {
        1 => {
            let n: i64 = match prompt(&mut input, out, "Enter a number: ")?.parse() {
                Ok(n) => n,
                Err(_) => return report_bad_number(out),
            };
            if n < 0 {
                writeln!(out, "Error: Factorial of negative number is undefined.")?;
            } else {
                writeln!(out, "Factorial of {} is {}", n, factorial(n as u64))?;
            }
        }
        2 => {
            let n: i64 = match prompt(&mut input, out, "Enter a number: ")?.parse() {
                Ok(n) => n,
                Err(_) => return report_bad_number(out),
            };
            if is_prime(n) {
                writeln!(out, "{} is a prime number.", n)?;
            } else {
                writeln!(out, "{} is not a prime number.", n)?;
            }
        }
        3 => {
            let a: f64 = match prompt(&mut input, out, "Enter first number: ")?.parse() {
                Ok(a) => a,
                Err(_) => return report_bad_number(out),
            };
            let symbol = prompt(&mut input, out, "Enter operator (+, -, *, /, ^): ")?
                .chars()
                .next()
                .unwrap_or(' ');
            let b: f64 = match prompt(&mut input, out, "Enter second number: ")?.parse() {
                Ok(b) => b,
                Err(_) => return report_bad_number(out),
            };

            // Sentinel behavior: the error is reported and the result
            // line still prints, with 0 standing in for the value.
            let result = Op::try_from(symbol)
                .and_then(|op| calculate(a, b, op))
                .unwrap_or_else(|err| {
                    let _ = writeln!(out, "Error: {}", err);
                    0.0
                });
            writeln!(out, "Result: {:.2} {} {:.2} = {:.2}", a, symbol, b, result)?;
        }
        _ => writeln!(out, "Invalid choice!")?,
    }

    Ok(())
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write, text: &str) -> Result<String> {
    write!(out, "{}", text)?;
    out.flush()?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read input line")?;
    Ok(line.trim().to_string())
}

fn report_bad_number(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Error: Invalid number input!")?;
    Ok(())
}
