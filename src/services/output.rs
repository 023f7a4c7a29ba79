use crate::domain::models::{ErrorBody, ErrorOut, JsonOut};
use serde::Serialize;

/// Table output. Text mode prints the tab-separated header first so empty
/// tables still show their columns.
pub fn print_out<T: Serialize>(
    json: bool,
    header: &[&str],
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", header.join("\t"));
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

pub fn error_envelope(code: &str, message: &str) -> ErrorOut {
    ErrorOut {
        ok: false,
        error: ErrorBody {
            code: code.to_string(),
            message: message.to_string(),
        },
    }
}

/// JSON mode reports failures on stdout so callers parse one stream.
pub fn print_error(json: bool, code: &str, message: &str) {
    if json {
        match serde_json::to_string_pretty(&error_envelope(code, message)) {
            Ok(s) => println!("{}", s),
            Err(_) => println!(
                "{{\"ok\":false,\"error\":{{\"code\":\"INTERNAL\",\"message\":\"failed to encode error\"}}}}"
            ),
        }
    } else {
        eprintln!("error [{}]: {}", code, message);
    }
}
