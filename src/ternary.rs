/// Inline conditional.  Rust's `if` is already an expression, but
/// `cargo fmt` spreads it over five lines, and the border tables in
/// the energy builder read far better one case per line.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
