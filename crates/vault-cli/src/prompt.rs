//! Terminal input helpers
//!
//! Plain stdin reads for metadata, `rpassword` for anything secret so it
//! never echoes.

use std::io::{self, BufRead, Write};

/// Print a prompt and read one trimmed line from stdin
pub fn line(msg: &str) -> io::Result<String> {
    print!("{msg}");
    io::stdout().flush()?;

    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

/// Like [`line`] but re-prompts until the input is non-empty
pub fn required(msg: &str) -> io::Result<String> {
    loop {
        let value = line(msg)?;
        if !value.is_empty() {
            return Ok(value);
        }
        println!("Must not be an empty string");
    }
}

/// Yes/no confirmation, defaulting to no
pub fn confirm(msg: &str) -> io::Result<bool> {
    let answer = line(&format!("{msg} [y/N]: "))?;
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Read a password without echoing it
pub fn password(msg: &str) -> io::Result<String> {
    rpassword::prompt_password(msg)
}

/// Prompt for a new password with confirmation, re-prompting until the
/// two entries match and are non-empty
pub fn new_password() -> io::Result<String> {
    loop {
        let first = password("Password: ")?;
        if first.is_empty() {
            println!("Must not be an empty string");
            continue;
        }

        let second = password("Confirm Password: ")?;
        if first == second {
            return Ok(first);
        }
        println!("Passwords do not match");
    }
}
