/// Returns `InputError::DimensionMismatch` from the enclosing function when the two
/// expressions differ.
#[macro_export]
macro_rules! ensure_eq {
    ($expr1: expr, $expr2: expr) => {
        if $expr1 != $expr2 {
            return Err($crate::error::InputError::DimensionMismatch {
                what: format!("{} != {}", stringify!($expr1), stringify!($expr2)),
                left: format!("{:?}", $expr1),
                right: format!("{:?}", $expr2),
            })?;
        }
    };
}

#[macro_export]
macro_rules! dbg_display {
    ($e: expr) => {{
        let val = $e;
        log::debug!(
            "[{}/{}:{}] {} = {}",
            file!(),
            line!(),
            column!(),
            stringify!($e),
            val
        );
        val
    }};
}

/// Formats `val` with at most `precision` decimals, dropping trailing zeros.
pub fn f64_rounded_string(val: &f64, precision: usize) -> String {
    let rounded = format!("{val:.precision$}");
    let trimmed = if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.')
    } else {
        &rounded
    };
    match trimmed {
        "-0" => "0".to_owned(),
        other => other.to_owned(),
    }
}

/// Formats `val` with exactly `precision` decimals. A value that rounds to zero loses its sign.
pub fn f64_fixed_string(val: &f64, precision: usize) -> String {
    let fixed = format!("{val:.precision$}");
    match fixed.strip_prefix('-') {
        Some(digits) if digits.chars().all(|c| c == '0' || c == '.') => digits.to_owned(),
        _ => fixed,
    }
}
