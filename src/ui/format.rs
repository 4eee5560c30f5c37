// Text rendering of stack values

/// Format a value like C's `%.{precision}g`
///
/// `precision` significant digits, trailing zeros removed, scientific
/// notation when the exponent is below -4 or at least `precision`.
pub fn format_number(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    // Rounding to `precision` digits can carry into the next decade, so the
    // exponent is read back from the rounded scientific form.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Render the top of the stack for display
///
/// `top_first` holds at most `depth` values, top first; `size` is the full
/// stack size. Values are listed deepest first, numbered down to `1` for the
/// top element.
pub fn render_stack(top_first: &[f64], size: usize, depth: usize, precision: usize) -> String {
    let mut out = String::from("\n");
    match size {
        0 => out.push_str("Stack currently empty.\n"),
        1 => out.push_str("Top element of stack (size = 1):\n"),
        n if n <= depth => out.push_str(&format!("Top {n} elements of stack (size = {n}):\n")),
        n => out.push_str(&format!("Top {depth} elements of stack (size = {n}):\n")),
    }
    for (i, value) in top_first.iter().enumerate().rev() {
        out.push_str(&format!("{}:\t{}\n", i + 1, format_number(*value, precision)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(7.0, 12), "7");
        assert_eq!(format_number(-42.0, 12), "-42");
        assert_eq!(format_number(0.0, 12), "0");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_number(0.1 + 0.2, 12), "0.3");
        assert_eq!(format_number(2.5, 12), "2.5");
        assert_eq!(format_number(FRAC_PI_2, 12), "1.57079632679");
        assert_eq!(format_number(PI, 6), "3.14159");
        assert_eq!(format_number(0.0001, 12), "0.0001");
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_number(0.00001, 12), "1e-05");
        assert_eq!(format_number(1e20, 12), "1e+20");
        assert_eq!(format_number(123456789.0, 4), "1.235e+08");
        assert_eq!(format_number(-2.5e-7, 12), "-2.5e-07");
    }

    #[test]
    fn test_format_rounding_carry() {
        assert_eq!(format_number(9.9999999, 3), "10");
        assert_eq!(format_number(999.6, 3), "1e+03");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::NAN, 12), "nan");
        assert_eq!(format_number(f64::INFINITY, 12), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY, 12), "-inf");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_stack(&[], 0, 4, 12), "\nStack currently empty.\n");
    }

    #[test]
    fn test_render_single() {
        assert_eq!(
            render_stack(&[3.0], 1, 4, 12),
            "\nTop element of stack (size = 1):\n1:\t3\n"
        );
    }

    #[test]
    fn test_render_deepest_first() {
        assert_eq!(
            render_stack(&[3.0, 2.0, 1.0], 3, 4, 12),
            "\nTop 3 elements of stack (size = 3):\n3:\t1\n2:\t2\n1:\t3\n"
        );
    }

    #[test]
    fn test_render_truncated() {
        assert_eq!(
            render_stack(&[6.0, 5.0], 6, 2, 12),
            "\nTop 2 elements of stack (size = 6):\n2:\t5\n1:\t6\n"
        );
    }
}
