//! Sample sources shared by the scanner benchmarks.

/// Simple let statement
pub const LET_STATEMENT: &str = "let x = 5;";

/// Function definition and call
pub const FUNCTION: &str = r#"
let add = fn(x, y) {
    x + y;
};
let result = add(five, ten);
"#;

/// Conditionals and comparisons
pub const CONDITIONAL: &str = r#"
if (5 < 10) {
    return true;
} else {
    return !false;
}
"#;

/// Every integer notation
pub const NUMERALS: &str = "let n = 1_000 + 0b1010_1010 * 0o755 - 0xDEAD_beef / 0;";

/// Builds a large program by repeating the samples `copies` times.
pub fn large_program(copies: usize) -> String {
    [FUNCTION, CONDITIONAL, NUMERALS, "\n"].concat().repeat(copies)
}
