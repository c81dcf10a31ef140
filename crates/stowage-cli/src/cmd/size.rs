use stowage_core::size::{format_size, parse_size, parse_size_with_default};

pub(crate) fn run_size(
    expr: &str,
    default_unit: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = match default_unit {
        Some(unit) => parse_size_with_default(expr, unit)?,
        None => parse_size(expr)?,
    };
    println!("{bytes} bytes ({})", format_size(bytes));
    Ok(())
}
