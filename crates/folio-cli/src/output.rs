use serde::Serialize;

/// Render a serializable response as JSON.
pub fn render<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<String> {
    if compact {
        Ok(serde_json::to_string(value)?)
    } else {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Print a serializable response to stdout.
pub fn output<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let rendered = render(value, compact)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_output_is_single_line() {
        let value = json!({ "a": [1, 2] });
        assert_eq!(render(&value, true).unwrap(), r#"{"a":[1,2]}"#);
        assert!(render(&value, false).unwrap().contains('\n'));
    }
}
