use std::io::Write;

pub const PROMPT: &str = "habitquest> ";

/// Print the prompt and read one line. `None` on end of input.
pub fn readline() -> Result<Option<String>, String> {
    write!(std::io::stdout(), "{PROMPT}").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;

    let mut buffer = String::new();
    let read = std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}

/// Split a shell line into clap arguments, program name first
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "habitquest".to_string());
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_quoted_arguments() {
        let args = split_line(r#"add-task "Walk the dog" --category health"#).unwrap();
        assert_eq!(
            args,
            vec!["habitquest", "add-task", "Walk the dog", "--category", "health"]
        );
    }

    #[test]
    fn rejects_unbalanced_quotes() {
        assert!(split_line(r#"invite "sam"#).is_err());
    }
}
